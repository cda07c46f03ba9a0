use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use crate::cancel::CancelSignal;
use crate::error::{Result, TravellerError};

/// Sleep between two polls, yielding to other tasks.
///
/// The only suspension point of both poll loops.
pub(crate) async fn pause(interval: Duration, cancel: Option<&CancelSignal>) -> Result<()> {
    let Some(signal) = cancel else {
        sleep(interval).await;
        return Ok(());
    };

    if signal.is_cancelled() {
        return Err(TravellerError::Cancelled);
    }

    let mut signal = signal.clone();
    tokio::select! {
        _ = sleep(interval) => Ok(()),
        _ = signal.cancelled() => {
            debug!("Poll cancelled during {:?} pause", interval);
            Err(TravellerError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancel_pair;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_full_interval() {
        let start = Instant::now();
        pause(Duration::from_secs(1), None).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_does_not_sleep() {
        let (canceller, signal) = cancel_pair();
        canceller.cancel();

        let start = Instant::now();
        let result = pause(Duration::from_secs(1), Some(&signal)).await;

        assert!(matches!(result, Err(TravellerError::Cancelled)));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_sleep() {
        let (canceller, signal) = cancel_pair();

        let pending =
            tokio::spawn(async move { pause(Duration::from_secs(60), Some(&signal)).await });
        tokio::time::sleep(Duration::from_secs(5)).await;
        canceller.cancel();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(TravellerError::Cancelled)));
    }
}
