//! Traveller
//!
//! Time-travel harness for exercising time-dependent lifecycle logic
//! (subscriptions, invoices, ...) against a remote service's test clocks,
//! without waiting for real time to pass. Provides:
//! - [`Traveller`]: a scoped session owning one remote test clock, moved
//!   forward with `advance` (relative) or `goto` (absolute)
//! - [`ConditionWaiter`]: a polling loop that re-fetches a resource until a
//!   predicate holds, to synchronize with side effects that land
//!   asynchronously after an advancement
//!
//! ## Flow
//!
//! ```text
//!  acquire ──► create objects tagged ──► advance / goto ──► wait_for ──► assert
//!     │         with clock_id()            (polls until       (polls until
//!     │                                     clock is ready)    predicate holds)
//!     └──────────────────────── release (deletes clock + attached objects)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use traveller::{AdvanceBy, Traveller, TravellerConfig};
//!
//! Traveller::scope(service, TravellerConfig::default(), |t| {
//!     Box::pin(async move {
//!         let subscription = api.create_subscription(t.clock_id()).await?;
//!         t.advance(AdvanceBy::default().days(31)).await?;
//!         let subscription = t.wait_for_status(&api, subscription, "past_due").await?;
//!         Ok(subscription)
//!     })
//! })
//! .await?;
//! ```

pub mod cancel;
pub mod config;
pub mod error;
mod poll;
pub mod session;
pub mod waiter;

// Re-export commonly used types
pub use cancel::{CancelSignal, Canceller, cancel_pair};
pub use config::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT, TravellerConfig};
pub use error::{Result, TravellerError};
pub use session::{ScopeFuture, Traveller};
pub use waiter::ConditionWaiter;

pub use traveller_core::{
    AdvanceBy, ApiObject, ClockId, ClockStatus, Resource, TestClock, Timestamp,
};
pub use traveller_ports::{Clock, RemoteError, RemoteResult, ResourceFetcher, TestClockService};
