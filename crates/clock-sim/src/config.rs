//! Simulator configuration

/// Behaviour of a [`SimulatedClockService`](crate::SimulatedClockService)
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Retrievals a clock stays `advancing` after an unscripted advance
    pub settle_polls: usize,
    /// Prefix of generated clock ids: `clock_...`
    pub clock_prefix: String,
    /// Prefix of generated object ids: `obj_...`
    pub object_prefix: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            settle_polls: 1,
            clock_prefix: "clock".to_string(),
            object_prefix: "obj".to_string(),
        }
    }
}
