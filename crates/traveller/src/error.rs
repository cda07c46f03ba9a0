//! Error types for the traveller crate

use std::time::Duration;
use thiserror::Error;
use traveller_core::{AdvanceError, ClockId, ClockStatus};
use traveller_ports::RemoteError;

#[derive(Error, Debug)]
pub enum TravellerError {
    /// Rejected before any remote call was made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote service error: {0}")]
    RemoteService(#[from] RemoteError),

    #[error("Test clock {clock_id} settled as '{status}' instead of 'ready'")]
    RemoteOperationFailed {
        clock_id: ClockId,
        status: ClockStatus,
    },

    #[error("Timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Wait cancelled by caller")]
    Cancelled,
}

impl From<AdvanceError> for TravellerError {
    fn from(err: AdvanceError) -> Self {
        TravellerError::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TravellerError>;
