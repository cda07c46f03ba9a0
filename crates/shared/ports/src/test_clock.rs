use async_trait::async_trait;
use traveller_core::{ClockId, TestClock};

use crate::error::RemoteResult;

/// Port for the remote test-clock service
///
/// Times cross this boundary as whole epoch seconds, the resolution the
/// service works in.
#[async_trait]
pub trait TestClockService: Send + Sync {
    /// Create a clock frozen at `frozen_time`
    async fn create(&self, frozen_time: i64) -> RemoteResult<TestClock>;

    /// Ask the service to move the clock forward to `frozen_time`
    ///
    /// The returned handle is usually still `advancing`; the service runs
    /// the triggered side effects in the background.
    async fn advance(&self, id: &ClockId, frozen_time: i64) -> RemoteResult<TestClock>;

    /// Fetch the current state of a clock
    async fn retrieve(&self, id: &ClockId) -> RemoteResult<TestClock>;

    /// Delete a clock together with every object attached to it
    async fn delete(&self, id: &ClockId) -> RemoteResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sessions hold the service as a trait object
    fn _assert_service_object_safe(_: &dyn TestClockService) {}
}
