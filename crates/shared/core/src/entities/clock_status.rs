use serde::{Deserialize, Serialize};
use std::fmt;

/// Last-known status of a remote test clock
///
/// On the wire this is a plain string. Anything other than `advancing`
/// or `ready` means the clock operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClockStatus {
    /// An advancement is still being processed remotely
    Advancing,
    /// The clock has settled at its frozen time
    Ready,
    /// Any other remote status (e.g. `internal_failure`)
    Other(String),
}

impl ClockStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClockStatus::Advancing => "advancing",
            ClockStatus::Ready => "ready",
            ClockStatus::Other(status) => status,
        }
    }

    /// Returns true while the remote side is still moving the clock
    pub fn is_advancing(&self) -> bool {
        matches!(self, ClockStatus::Advancing)
    }

    /// Returns true for the only successful terminal state
    pub fn is_ready(&self) -> bool {
        matches!(self, ClockStatus::Ready)
    }
}

impl From<&str> for ClockStatus {
    fn from(status: &str) -> Self {
        match status {
            "advancing" => ClockStatus::Advancing,
            "ready" => ClockStatus::Ready,
            other => ClockStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ClockStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "advancing" => ClockStatus::Advancing,
            "ready" => ClockStatus::Ready,
            _ => ClockStatus::Other(status),
        }
    }
}

impl From<ClockStatus> for String {
    fn from(status: ClockStatus) -> Self {
        match status {
            ClockStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
