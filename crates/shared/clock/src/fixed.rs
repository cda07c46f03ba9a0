use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use traveller_core::Timestamp;
use traveller_ports::Clock;

/// Clock that only moves when told to
///
/// Clones share state, so a test can keep one handle and give another to
/// the code under test.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Arc<RwLock<Timestamp>>,
}

impl FixedClock {
    /// Create a clock frozen at `time`
    pub fn at(time: Timestamp) -> Self {
        Self {
            current: Arc::new(RwLock::new(time)),
        }
    }

    /// Create a clock frozen at the current wall time
    pub fn now_frozen() -> Self {
        Self::at(Utc::now())
    }

    /// Move the clock by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.write();
        *current += duration;
    }

    /// Explicitly set the time
    pub fn set_time(&self, time: Timestamp) {
        *self.current.write() = time;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_time_does_not_advance() {
        let clock = FixedClock::now_frozen();
        let t1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let t2 = clock.now();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_advance_time() {
        let clock = FixedClock::now_frozen();
        let t1 = clock.now();
        clock.advance(Duration::seconds(60));
        assert_eq!((clock.now() - t1).num_seconds(), 60);
    }

    #[test]
    fn test_set_time() {
        let clock = FixedClock::now_frozen();
        let target = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        clock.set_time(target);

        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_clone_shares_state() {
        let clock1 = FixedClock::now_frozen();
        let clock2 = clock1.clone();

        clock1.advance(Duration::seconds(100));

        assert_eq!(clock1.now(), clock2.now());
    }
}
