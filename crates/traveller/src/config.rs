//! Session and waiter configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use traveller_clock::{Clock, SystemClock};

/// Delay between two remote polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Budget for a condition wait when the caller gives none
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration shared by a session and its condition waiter
#[derive(Clone)]
pub struct TravellerConfig {
    /// Sleep between polls, both while a clock advances and while waiting
    pub poll_interval: Duration,
    /// Default budget for `wait_for` / `wait_for_status`
    pub wait_timeout: Duration,
    /// Optional bound on how long a clock may stay `advancing`.
    /// `None` polls until the service settles.
    pub advance_timeout: Option<Duration>,
    /// Wall-clock source read when a session is acquired
    pub clock: Arc<dyn Clock>,
}

impl TravellerConfig {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    pub fn with_advance_timeout(mut self, advance_timeout: Duration) -> Self {
        self.advance_timeout = Some(advance_timeout);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

impl Default for TravellerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            advance_timeout: None,
            clock: Arc::new(SystemClock::new()),
        }
    }
}

impl fmt::Debug for TravellerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravellerConfig")
            .field("poll_interval", &self.poll_interval)
            .field("wait_timeout", &self.wait_timeout)
            .field("advance_timeout", &self.advance_timeout)
            .field("clock", &self.clock.name())
            .finish()
    }
}
