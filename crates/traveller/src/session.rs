//! Clock session - one remote test clock for one scoped lifetime
//!
//! A session freezes "now" (to the second), creates a remote test clock at
//! that instant and moves it forward on request. Domain objects created
//! with the session's clock id follow the clock instead of real time, and
//! are deleted with it when the session is released.
//!
//! Advancing can take many seconds: the service runs every lifecycle event
//! the jump triggers before the clock settles. Always await an advancement
//! before acting on the objects it affects. `advance`/`goto` take
//! `&mut self`, so two advancements on one session can never overlap.

use futures_util::FutureExt;
use log::{debug, info, warn};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use tokio::time::Instant;
use traveller_core::{
    AdvanceBy, ClockId, ClockStatus, Resource, TestClock, Timestamp, truncate_to_seconds,
};
use traveller_ports::{ResourceFetcher, TestClockService};

use crate::cancel::CancelSignal;
use crate::config::TravellerConfig;
use crate::error::{Result, TravellerError};
use crate::poll::pause;
use crate::waiter::ConditionWaiter;

/// Future returned by the body of [`Traveller::scope`]
pub type ScopeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Owner of a single remote test clock
///
/// Release it with [`Traveller::release`] or run it inside
/// [`Traveller::scope`]. A session dropped without release (panic, aborted
/// task) still schedules the remote delete on the current tokio runtime.
pub struct Traveller {
    service: Arc<dyn TestClockService>,
    /// Last handle reported by the service
    clock: TestClock,
    /// Local source of truth for the clock's time; only moves forward
    frozen_time: Timestamp,
    config: TravellerConfig,
    waiter: ConditionWaiter,
    cancel: Option<CancelSignal>,
    released: bool,
}

impl Traveller {
    /// Freeze the current time and create a remote clock at that instant
    pub async fn acquire(
        service: Arc<dyn TestClockService>,
        config: TravellerConfig,
    ) -> Result<Self> {
        let frozen_time = truncate_to_seconds(config.clock.now());
        let clock = service.create(frozen_time.timestamp()).await?;

        info!(
            "Acquired test clock {} frozen at {} (source: {})",
            clock.id,
            frozen_time,
            config.clock.name()
        );

        let waiter = ConditionWaiter::new(&config);
        Ok(Self {
            service,
            clock,
            frozen_time,
            config,
            waiter,
            cancel: None,
            released: false,
        })
    }

    /// Run `body` against a fresh session, then release it.
    ///
    /// Release happens whether the body succeeds, fails, returns early or
    /// panics. A panic is resumed once the clock is deleted. A body error
    /// takes precedence over a release error, which is then only logged.
    ///
    /// ```ignore
    /// let invoice = Traveller::scope(service, config, |t| {
    ///     Box::pin(async move {
    ///         t.advance(AdvanceBy::default().months(1)).await?;
    ///         t.wait_for_status(&api, invoice, "paid").await
    ///     })
    /// })
    /// .await?;
    /// ```
    pub async fn scope<T, F>(
        service: Arc<dyn TestClockService>,
        config: TravellerConfig,
        body: F,
    ) -> Result<T>
    where
        F: for<'a> FnOnce(&'a mut Traveller) -> ScopeFuture<'a, T>,
    {
        let mut traveller = Self::acquire(service, config).await?;
        let clock_id = traveller.clock.id.clone();

        let outcome = AssertUnwindSafe(body(&mut traveller))
            .catch_unwind()
            .await;
        let released = traveller.release().await;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(payload) => {
                if let Err(release_err) = released {
                    warn!(
                        "Releasing test clock {} failed after scope panic: {}",
                        clock_id, release_err
                    );
                }
                panic::resume_unwind(payload);
            }
        };

        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(release_err)) => Err(release_err),
            (Err(body_err), Ok(())) => Err(body_err),
            (Err(body_err), Err(release_err)) => {
                warn!(
                    "Releasing test clock {} failed after scope error: {}",
                    clock_id, release_err
                );
                Err(body_err)
            }
        }
    }

    /// Delete the remote clock and everything attached to it
    ///
    /// If this future is dropped before the delete completes, the `Drop`
    /// fallback still schedules one.
    pub async fn release(mut self) -> Result<()> {
        let deleted = self.service.delete(&self.clock.id).await;
        self.released = true;
        deleted?;
        info!("Released test clock {}", self.clock.id);
        Ok(())
    }

    pub fn clock_id(&self) -> &ClockId {
        &self.clock.id
    }

    pub fn clock(&self) -> &TestClock {
        &self.clock
    }

    pub fn status(&self) -> &ClockStatus {
        &self.clock.status
    }

    pub fn frozen_time(&self) -> Timestamp {
        self.frozen_time
    }

    /// Epoch seconds of the frozen time
    pub fn timestamp(&self) -> i64 {
        self.frozen_time.timestamp()
    }

    pub fn config(&self) -> &TravellerConfig {
        &self.config
    }

    pub fn waiter(&self) -> &ConditionWaiter {
        &self.waiter
    }

    /// Attach a cancellation signal to advancements and waits
    pub fn set_cancel(&mut self, signal: CancelSignal) {
        self.waiter.set_cancel(Some(signal.clone()));
        self.cancel = Some(signal);
    }

    /// Move the clock forward relative to the frozen time.
    ///
    /// Months count as 30 days. An all-empty (or all-zero) advancement does
    /// nothing and makes no remote call.
    pub async fn advance(&mut self, by: AdvanceBy) -> Result<&mut Self> {
        let offset = by.offset()?;
        let target = self.frozen_time.checked_add_signed(offset).ok_or_else(|| {
            TravellerError::InvalidArgument(format!(
                "Advancing {} by {} leaves the supported time range",
                self.frozen_time, offset
            ))
        })?;

        if target == self.frozen_time {
            debug!("Empty advancement of clock {} ignored", self.clock.id);
            return Ok(self);
        }

        self.goto(target).await
    }

    /// Move the clock forward to an absolute time and wait until it settles
    pub async fn goto(&mut self, target: Timestamp) -> Result<&mut Self> {
        if target < self.frozen_time {
            return Err(TravellerError::InvalidArgument(format!(
                "Time cannot move backwards: {} is before {}",
                target, self.frozen_time
            )));
        }

        self.frozen_time = target;
        info!("Advancing test clock {} to {}", self.clock.id, target);

        self.clock = self
            .service
            .advance(&self.clock.id, self.frozen_time.timestamp())
            .await?;
        self.settle().await?;

        Ok(self)
    }

    /// Poll the clock until it leaves `advancing`
    async fn settle(&mut self) -> Result<()> {
        let started = Instant::now();
        let mut polls: u32 = 0;

        while self.clock.status.is_advancing() {
            if let Some(limit) = self.config.advance_timeout {
                if started.elapsed() >= limit {
                    warn!(
                        "Test clock {} still advancing after {:?}",
                        self.clock.id, limit
                    );
                    return Err(TravellerError::Timeout { timeout: limit });
                }
            }

            pause(self.config.poll_interval, self.cancel.as_ref()).await?;
            self.clock = self.service.retrieve(&self.clock.id).await?;
            polls += 1;
            debug!(
                "Test clock {} is {} after {} polls",
                self.clock.id, self.clock.status, polls
            );
        }

        if !self.clock.status.is_ready() {
            warn!(
                "Test clock {} settled as {}",
                self.clock.id, self.clock.status
            );
            return Err(TravellerError::RemoteOperationFailed {
                clock_id: self.clock.id.clone(),
                status: self.clock.status.clone(),
            });
        }

        info!(
            "Test clock {} ready at {} after {} polls",
            self.clock.id, self.frozen_time, polls
        );
        Ok(())
    }

    /// [`ConditionWaiter::wait_for`] with this session's configuration
    pub async fn wait_for<R, F, P>(&self, fetcher: &F, resource: R, predicate: P) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
        P: Fn(&R) -> bool,
    {
        self.waiter.wait_for(fetcher, resource, predicate).await
    }

    /// [`ConditionWaiter::wait_for_within`] with this session's configuration
    pub async fn wait_for_within<R, F, P>(
        &self,
        fetcher: &F,
        resource: R,
        predicate: P,
        timeout: chrono::Duration,
    ) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
        P: Fn(&R) -> bool,
    {
        self.waiter
            .wait_for_within(fetcher, resource, predicate, timeout)
            .await
    }

    /// [`ConditionWaiter::wait_for_status`] with this session's configuration
    pub async fn wait_for_status<R, F>(&self, fetcher: &F, resource: R, target: &str) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
    {
        self.waiter.wait_for_status(fetcher, resource, target).await
    }

    /// [`ConditionWaiter::wait_for_status_within`] with this session's configuration
    pub async fn wait_for_status_within<R, F>(
        &self,
        fetcher: &F,
        resource: R,
        target: &str,
        timeout: chrono::Duration,
    ) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
    {
        self.waiter
            .wait_for_status_within(fetcher, resource, target, timeout)
            .await
    }
}

impl Drop for Traveller {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let service = Arc::clone(&self.service);
        let clock_id = self.clock.id.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(
                    "Test clock {} dropped without release, deleting in background",
                    clock_id
                );
                handle.spawn(async move {
                    if let Err(err) = service.delete(&clock_id).await {
                        warn!("Background delete of test clock {} failed: {}", clock_id, err);
                    }
                });
            }
            Err(_) => {
                warn!(
                    "Test clock {} dropped outside a runtime and was not deleted",
                    clock_id
                );
            }
        }
    }
}
