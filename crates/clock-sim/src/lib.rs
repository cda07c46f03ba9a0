//! Clock Sim
//!
//! In-memory stand-in for a remote test-clock service. Implements the
//! [`TestClockService`](traveller_ports::TestClockService) and
//! [`ResourceFetcher`](traveller_ports::ResourceFetcher) ports so sessions
//! and waits can be exercised without network access.
//!
//! The simulator does not model any domain lifecycle. Tests decide how a
//! clock settles ([`SimulatedClockService::script_advance`]) and how an
//! object evolves ([`SimulatedClockService::script_object`]).

pub mod config;
pub mod service;

pub use config::SimConfig;
pub use service::{Operation, SimulatedClockService};
