use chrono::Duration;
use std::fmt;
use thiserror::Error;

/// Days in a "month" for relative advancement.
///
/// Months are approximated, not calendar-accurate.
pub const DAYS_PER_MONTH: i64 = 30;

/// Unit of a relative time jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Months,
    Weeks,
    Days,
    Hours,
}

impl TimeUnit {
    /// Span covered by `count` of this unit, or `None` on overflow
    pub fn span(self, count: i64) -> Option<Duration> {
        match self {
            TimeUnit::Months => count
                .checked_mul(DAYS_PER_MONTH)
                .and_then(Duration::try_days),
            TimeUnit::Weeks => Duration::try_weeks(count),
            TimeUnit::Days => Duration::try_days(count),
            TimeUnit::Hours => Duration::try_hours(count),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Months => "months",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
        };
        f.write_str(name)
    }
}

/// Rejected relative advancement
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceError {
    #[error("Time cannot move backwards ({unit} = {value})")]
    Negative { unit: TimeUnit, value: i64 },

    #[error("Advancing by {value} {unit} overflows the time range")]
    Overflow { unit: TimeUnit, value: i64 },
}

/// Relative jump forward in time, one optional count per unit.
///
/// ```ignore
/// let step = AdvanceBy::default().months(1).days(2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceBy {
    pub months: Option<i64>,
    pub weeks: Option<i64>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
}

impl AdvanceBy {
    pub fn months(mut self, months: i64) -> Self {
        self.months = Some(months);
        self
    }

    pub fn weeks(mut self, weeks: i64) -> Self {
        self.weeks = Some(weeks);
        self
    }

    pub fn days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    pub fn hours(mut self, hours: i64) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Units in application order
    pub fn units(&self) -> [(TimeUnit, Option<i64>); 4] {
        [
            (TimeUnit::Months, self.months),
            (TimeUnit::Weeks, self.weeks),
            (TimeUnit::Days, self.days),
            (TimeUnit::Hours, self.hours),
        ]
    }

    /// Total forward offset.
    ///
    /// Every unit is checked for sign before anything is summed, so a
    /// rejected advancement never yields a partial offset.
    pub fn offset(&self) -> Result<Duration, AdvanceError> {
        let units = self.units();

        for (unit, value) in units {
            if let Some(value) = value {
                if value < 0 {
                    return Err(AdvanceError::Negative { unit, value });
                }
            }
        }

        units
            .into_iter()
            .filter_map(|(unit, value)| value.map(|v| (unit, v)))
            .try_fold(Duration::zero(), |total, (unit, value)| {
                unit.span(value)
                    .and_then(|span| total.checked_add(&span))
                    .ok_or(AdvanceError::Overflow { unit, value })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_is_thirty_days() {
        let month = AdvanceBy::default().months(1).offset().unwrap();
        let days = AdvanceBy::default().days(30).offset().unwrap();

        assert_eq!(month, days);
    }

    #[test]
    fn test_units_are_summed() {
        let offset = AdvanceBy::default()
            .months(1)
            .weeks(1)
            .days(2)
            .hours(3)
            .offset()
            .unwrap();

        assert_eq!(offset, Duration::days(39) + Duration::hours(3));
    }

    #[test]
    fn test_empty_and_zero_are_zero() {
        assert_eq!(AdvanceBy::default().offset().unwrap(), Duration::zero());
        assert_eq!(
            AdvanceBy::default().days(0).hours(0).offset().unwrap(),
            Duration::zero()
        );
    }

    #[test]
    fn test_any_negative_unit_rejected() {
        let err = AdvanceBy::default().days(5).hours(-1).offset().unwrap_err();

        assert_eq!(
            err,
            AdvanceError::Negative {
                unit: TimeUnit::Hours,
                value: -1
            }
        );
        assert!(err.to_string().contains("cannot move backwards"));
    }

    #[test]
    fn test_overflow_rejected() {
        let err = AdvanceBy::default().months(i64::MAX).offset().unwrap_err();

        assert!(matches!(
            err,
            AdvanceError::Overflow {
                unit: TimeUnit::Months,
                ..
            }
        ));
    }
}
