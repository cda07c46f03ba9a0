//! Condition waiter - poll a remote resource until a predicate holds
//!
//! Side effects of a clock advancement (webhooks, invoice finalization, ...)
//! land asynchronously. The waiter bridges that gap by re-fetching a
//! resource until the caller's predicate accepts it.
//!
//! A successful wait says *that* the resource changed, not *why*. Wait for a
//! clear signal (e.g. a subscription reaching `canceled`) and then validate
//! the state you actually care about on the returned snapshot.

use log::{debug, warn};
use std::time::Duration;
use tokio::time::Instant;
use traveller_core::Resource;
use traveller_ports::ResourceFetcher;

use crate::cancel::CancelSignal;
use crate::config::TravellerConfig;
use crate::error::{Result, TravellerError};
use crate::poll::pause;

/// Reusable polling loop. Holds no per-wait state.
#[derive(Debug, Clone)]
pub struct ConditionWaiter {
    poll_interval: Duration,
    default_timeout: Duration,
    cancel: Option<CancelSignal>,
}

impl ConditionWaiter {
    pub fn new(config: &TravellerConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            default_timeout: config.wait_timeout,
            cancel: None,
        }
    }

    /// Attach a cancellation signal to every subsequent wait
    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub(crate) fn set_cancel(&mut self, signal: Option<CancelSignal>) {
        self.cancel = signal;
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Wait with the configured default timeout
    pub async fn wait_for<R, F, P>(&self, fetcher: &F, resource: R, predicate: P) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
        P: Fn(&R) -> bool,
    {
        self.poll_until(fetcher, resource, predicate, self.default_timeout)
            .await
    }

    /// Wait until `predicate` accepts a snapshot of `resource`.
    ///
    /// A snapshot that already satisfies the predicate is returned without
    /// any remote call. A negative `timeout` is rejected before fetching.
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
        let timeout = timeout.to_std().map_err(|_| {
            TravellerError::InvalidArgument(format!("Timeout cannot be negative ({})", timeout))
        })?;

        self.poll_until(fetcher, resource, predicate, timeout).await
    }

    /// Wait for the resource's status to become `target`, default timeout
    pub async fn wait_for_status<R, F>(&self, fetcher: &F, resource: R, target: &str) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
    {
        ensure_has_status(&resource)?;
        self.wait_for(fetcher, resource, move |r: &R| r.status() == Some(target))
            .await
    }

    /// Wait for the resource's status to become `target`
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
        ensure_has_status(&resource)?;
        self.wait_for_within(
            fetcher,
            resource,
            move |r: &R| r.status() == Some(target),
            timeout,
        )
        .await
    }

    async fn poll_until<R, F, P>(
        &self,
        fetcher: &F,
        mut resource: R,
        predicate: P,
        timeout: Duration,
    ) -> Result<R>
    where
        R: Resource,
        F: ResourceFetcher<R> + ?Sized,
        P: Fn(&R) -> bool,
    {
        let started = Instant::now();
        let mut polls: u32 = 0;

        while !predicate(&resource) {
            if started.elapsed() >= timeout {
                warn!(
                    "Resource {} did not satisfy condition within {:?} ({} polls)",
                    resource.id(),
                    timeout,
                    polls
                );
                return Err(TravellerError::Timeout { timeout });
            }

            pause(self.poll_interval, self.cancel.as_ref()).await?;

            let id = resource.id().to_string();
            resource = fetcher.retrieve(&id).await?;
            polls += 1;
            debug!("Polled resource {} ({} so far)", id, polls);
        }

        if polls > 0 {
            debug!(
                "Resource {} satisfied condition after {} polls",
                resource.id(),
                polls
            );
        }
        Ok(resource)
    }
}

impl Default for ConditionWaiter {
    fn default() -> Self {
        Self::new(&TravellerConfig::default())
    }
}

fn ensure_has_status<R: Resource>(resource: &R) -> Result<()> {
    if resource.status().is_none() {
        return Err(TravellerError::InvalidArgument(format!(
            "Resource {} has no status to wait on",
            resource.id()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use traveller_core::ApiObject;
    use traveller_ports::{RemoteError, RemoteResult};

    /// Hands out queued snapshots, repeating the last one
    struct Script {
        snapshots: Mutex<VecDeque<ApiObject>>,
        fetches: AtomicUsize,
    }

    impl Script {
        fn new(snapshots: Vec<ApiObject>) -> Self {
            Self {
                snapshots: Mutex::new(snapshots.into()),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceFetcher<ApiObject> for Script {
        async fn retrieve(&self, id: &str) -> RemoteResult<ApiObject> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let mut snapshots = self.snapshots.lock();
            let next = if snapshots.len() > 1 {
                snapshots.pop_front()
            } else {
                snapshots.front().cloned()
            };
            next.ok_or_else(|| RemoteError::NotFound(id.to_string()))
        }
    }

    fn invoice(status: &str) -> ApiObject {
        ApiObject::new("in_1").with_field("status", status)
    }

    #[tokio::test(start_paused = true)]
    async fn test_satisfied_resource_returned_without_fetch() {
        let script = Script::new(vec![]);
        let waiter = ConditionWaiter::default();

        let result = waiter
            .wait_for_within(
                &script,
                invoice("paid"),
                |r| r.status() == Some("paid"),
                chrono::Duration::zero(),
            )
            .await
            .unwrap();

        assert_eq!(result.status(), Some("paid"));
        assert_eq!(script.fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_timeout_rejected() {
        let script = Script::new(vec![invoice("paid")]);
        let waiter = ConditionWaiter::default();

        let result = waiter
            .wait_for_within(
                &script,
                invoice("open"),
                |_| false,
                chrono::Duration::seconds(-1),
            )
            .await;

        assert!(matches!(result, Err(TravellerError::InvalidArgument(_))));
        assert_eq!(script.fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_wait_polls_until_match() {
        let script = Script::new(vec![invoice("open"), invoice("paid")]);
        let waiter = ConditionWaiter::default();

        let result = waiter
            .wait_for_status(&script, invoice("draft"), "paid")
            .await
            .unwrap();

        assert_eq!(result.status(), Some("paid"));
        assert_eq!(script.fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_propagates() {
        let script = Script::new(vec![]);
        let waiter = ConditionWaiter::default();

        let result = waiter.wait_for(&script, invoice("open"), |_| false).await;

        assert!(matches!(
            result,
            Err(TravellerError::RemoteService(RemoteError::NotFound(_)))
        ));
    }
}
