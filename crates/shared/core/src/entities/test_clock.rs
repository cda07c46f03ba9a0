use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ClockStatus, Resource};
use crate::Timestamp;

/// Opaque identifier of a remote test clock
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockId(String);

impl ClockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Handle to a remote test clock as last reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestClock {
    pub id: ClockId,
    pub status: ClockStatus,
    /// Time the remote clock is frozen at
    #[serde(with = "chrono::serde::ts_seconds")]
    pub frozen_time: Timestamp,
}

impl TestClock {
    pub fn new(id: ClockId, status: ClockStatus, frozen_time: Timestamp) -> Self {
        Self {
            id,
            status,
            frozen_time,
        }
    }
}

impl Resource for TestClock {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_clock_serializes_epoch_seconds() {
        let clock = TestClock::new(
            ClockId::new("clock_123"),
            ClockStatus::Ready,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );

        let json = serde_json::to_value(&clock).unwrap();

        assert_eq!(json["id"], "clock_123");
        assert_eq!(json["status"], "ready");
        assert_eq!(json["frozen_time"], 1_704_067_200);
    }

    #[test]
    fn test_clock_is_a_resource_with_status() {
        let clock = TestClock::new(
            ClockId::new("clock_1"),
            ClockStatus::Advancing,
            Utc.timestamp_opt(0, 0).unwrap(),
        );

        assert_eq!(Resource::id(&clock), "clock_1");
        assert_eq!(Resource::status(&clock), Some("advancing"));
    }
}
