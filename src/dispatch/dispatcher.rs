use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use super::Launch;
use super::interval::{MIN_TICK, inter_launch_interval};
use crate::args::{PositiveU64, PositiveUsize};
use crate::config::Configuration;
use crate::shutdown::ShutdownSender;

/// Counters collected over one dispatcher run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub launched: u64,
    pub dropped: u64,
}

/// Launches one task per tick without waiting for earlier ones.
///
/// At most `max_in_flight` tasks run at once. A tick that finds the cap
/// reached is dropped, so the launch cadence never shifts.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    interval: Duration,
    max_in_flight: usize,
}

impl Dispatcher {
    #[must_use]
    pub fn new(requests_per_second: PositiveU64, max_in_flight: PositiveUsize) -> Self {
        let interval = inter_launch_interval(requests_per_second);
        if interval < MIN_TICK {
            warn!(
                rps = requests_per_second.get(),
                "Requested rate exceeds one launch per millisecond; capping at 1000 rps."
            );
        }
        // acquire_many takes a u32, and the semaphore has its own ceiling.
        let max_in_flight = max_in_flight
            .get()
            .min(usize::try_from(u32::MAX).unwrap_or(usize::MAX))
            .min(Semaphore::MAX_PERMITS);
        Self {
            interval,
            max_in_flight,
        }
    }

    #[must_use]
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(config.requests_per_second, config.max_in_flight)
    }

    /// Interval derived from the rate, before clamping.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Ticks until shutdown, then waits for in-flight tasks to finish.
    pub async fn run<L: Launch>(
        &self,
        launcher: Arc<L>,
        shutdown_tx: &ShutdownSender,
    ) -> DispatchReport {
        let mut shutdown_rx = shutdown_tx.subscribe();
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut ticker = interval(self.interval.max(MIN_TICK));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut report = DispatchReport::default();

        loop {
            // Subscribed before the select so a shutdown racing the tick
            // still reaches the task launched by it.
            let task_shutdown_rx = shutdown_tx.subscribe();
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    let Ok(permit) = Arc::clone(&permits).try_acquire_owned() else {
                        report.dropped = report.dropped.saturating_add(1);
                        warn!(
                            dropped = report.dropped,
                            max_in_flight = self.max_in_flight,
                            "In-flight limit reached; dropping tick."
                        );
                        continue;
                    };
                    let launcher = Arc::clone(&launcher);
                    tokio::spawn(async move {
                        launcher.launch(task_shutdown_rx).await;
                        drop(permit);
                    });
                    report.launched = report.launched.saturating_add(1);
                }
            }
        }

        debug!(
            in_flight = self.max_in_flight.saturating_sub(permits.available_permits()),
            "Waiting for in-flight probes to stop."
        );
        let all = u32::try_from(self.max_in_flight).unwrap_or(u32::MAX);
        if permits.acquire_many(all).await.is_err() {
            warn!("In-flight tracking closed before probes drained.");
        }
        report
    }
}
