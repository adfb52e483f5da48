//! Periodic background refresh

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::service::{RefreshOutcome, TranslationService};

/// `tokio::time::interval` rejects a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);
/// Longer periods would overflow the timer's deadline arithmetic.
const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Handle to the background task that runs the staleness check on a timer.
///
/// Dropping the handle leaves the task running; call [`RefreshTask::shutdown`]
/// to stop it.
#[derive(Debug)]
pub struct RefreshTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
    period: Duration,
}

impl RefreshTask {
    pub(crate) fn spawn(service: TranslationService, period: Duration) -> Self {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(service, period, cancel.clone()));

        Self {
            cancel,
            handle,
            period,
        }
    }

    /// The tick period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Asks the task to stop after its current check.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            error!("Catalog refresh task ended abnormally: {}", e);
        }
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn run(service: TranslationService, period: Duration, cancel: CancellationToken) {
    let now = Instant::now();
    let mut ticker = interval_at(now.checked_add(period).unwrap_or(now), period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_secs = period.as_secs(), "Catalog refresh task started");

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                debug!("Scheduled catalog staleness check");
                match service.refresh_if_stale().await {
                    RefreshOutcome::Refreshed => info!("Scheduled refresh updated the translation catalog"),
                    RefreshOutcome::Failed => warn!("Scheduled catalog refresh failed, will retry next tick"),
                    RefreshOutcome::NotNeeded | RefreshOutcome::Shared => {}
                }
            }
        }
    }

    info!("Catalog refresh task stopped");
}
