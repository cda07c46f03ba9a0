//! Traveller Ports
//!
//! Port definitions (traits) for the Traveller test-clock harness.
//! These define the boundaries between the harness and the remote
//! test-clock service it drives.

mod clock;
mod error;
mod resource;
mod test_clock;

pub use clock::Clock;
pub use error::{RemoteError, RemoteResult};
pub use resource::ResourceFetcher;
pub use test_clock::TestClockService;
