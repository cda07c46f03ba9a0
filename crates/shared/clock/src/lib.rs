//! Traveller Clock Sources
//!
//! Wall-clock sources a session reads when it is acquired:
//!
//! - [`SystemClock`]: real time, for sessions against a live service
//! - [`FixedClock`]: frozen, manually moved time, for deterministic tests
//!
//! ## Usage
//!
//! ```ignore
//! use traveller_clock::{Clock, FixedClock};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
//! clock.advance(Duration::minutes(5));
//! ```

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use traveller_ports::Clock;
