mod advance;

use chrono::{DateTime, SubsecRound, Utc};

pub use advance::{AdvanceBy, AdvanceError, DAYS_PER_MONTH, TimeUnit};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Drop the sub-second part of a timestamp.
///
/// The test-clock service only understands whole epoch seconds.
pub fn truncate_to_seconds(time: Timestamp) -> Timestamp {
    time.trunc_subsecs(0)
}
