use traveller_core::Timestamp;

/// Port for wall-clock time
///
/// This allows the harness to use different time sources:
/// - Real system time when talking to a live service
/// - Fixed time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
