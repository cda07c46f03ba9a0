//! Traveller Core Domain
//!
//! Pure domain types for the Traveller test-clock harness.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{ApiObject, ClockId, ClockStatus, Resource, TestClock};
pub use values::{
    AdvanceBy, AdvanceError, DAYS_PER_MONTH, TimeUnit, Timestamp, truncate_to_seconds,
};
