//! Caller-driven cancellation of poll loops

use tokio::sync::watch;

/// Owner side: flips every attached [`CancelSignal`]
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

/// Observer side, attached to a session or a waiter
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Create a connected canceller/signal pair
pub fn cancel_pair() -> (Canceller, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (Canceller { tx }, CancelSignal { rx })
}

impl Canceller {
    /// Cancel all pending and future polls observing this canceller
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Get another signal for this canceller
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancelled. Never resolves if the canceller is dropped
    /// without cancelling.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_reaches_every_signal() {
        let (canceller, signal) = cancel_pair();
        let other = canceller.signal();

        assert!(!signal.is_cancelled());
        canceller.cancel();

        assert!(signal.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_canceller_never_fires() {
        let (canceller, mut signal) = cancel_pair();
        drop(canceller);

        let fired = tokio::time::timeout(Duration::from_secs(5), signal.cancelled()).await;
        assert!(fired.is_err());
    }
}
