use log::{debug, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::NfsMonitor;
use super::status::check_blocking;
use crate::config::WatchConfig;
use crate::error::ConfigError;
use crate::types::Mount;

/// What happened during one pass over the watched mounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Mounts whose status was checked
    pub checked: usize,
    /// Failed checks the error condition did not consider stale
    pub ignored: usize,
    /// Failed checks classified as stale
    pub stale: usize,
    /// Stale mounts brought back by the remount action
    pub recovered: usize,
    /// Stale mounts still failing after every attempt
    pub exhausted: usize,
    /// Stale mounts left alone because no remount action was set
    pub skipped: usize,
    /// Remount action calls made
    pub attempts: usize,
}

impl TickReport {
    pub fn is_healthy(&self) -> bool {
        self.stale == self.recovered
    }
}

impl NfsMonitor {
    /// Check every watched mount once and remount the stale ones.
    ///
    /// Works on a snapshot of the registry: mounts added, changed or removed
    /// while this runs are picked up on the next call.
    pub async fn check_once(&self, config: &WatchConfig) -> TickReport {
        let mounts = self.registry.snapshot().await;
        let mut report = TickReport::default();

        for mount in &mounts {
            report.checked += 1;

            let err = match check_blocking(self.checker.clone(), mount.dest_path.clone()).await {
                Ok(()) => continue,
                Err(e) => e,
            };

            if !self.hooks.is_stale(&err).await {
                debug!(
                    "🔍 Ignoring status error for {}: {err}",
                    mount.dest_path.display()
                );
                report.ignored += 1;
                continue;
            }

            info!(
                "🚨 Stale mount detected at {}: {err}",
                mount.dest_path.display()
            );
            report.stale += 1;
            self.remount_with_retries(mount, config, &mut report).await;
        }

        report
    }

    async fn remount_with_retries(
        &self,
        mount: &Mount,
        config: &WatchConfig,
        report: &mut TickReport,
    ) {
        let budget = config.attempt_budget();

        for attempt in 1..=budget {
            // Re-read each attempt so a replaced action is used right away
            let Some(action) = self.hooks.remount().await else {
                debug!(
                    "⏭️ No remount action set, skipping {}",
                    mount.dest_path.display()
                );
                report.skipped += 1;
                return;
            };

            report.attempts += 1;
            match action(mount.clone()).await {
                Ok(()) => {
                    info!("✅ Remounted {mount} (attempt {attempt}/{budget})");
                    report.recovered += 1;
                    return;
                }
                Err(e) => {
                    warn!("⚠️ Remount attempt {attempt}/{budget} for {mount} failed: {e}");
                    if attempt < budget {
                        time::sleep(config.retry_delay).await;
                    }
                }
            }
        }

        warn!(
            "❌ Giving up on {} after {budget} attempt(s), will retry next tick",
            mount.dest_path.display()
        );
        report.exhausted += 1;
    }

    /// Run the watch loop until `cancel` fires.
    ///
    /// The first check happens one `interval` after start and each later one
    /// an `interval` after the previous tick finished, so ticks never
    /// overlap. Cancellation is only noticed between ticks. Individual mount
    /// failures are logged and never end the loop.
    pub async fn run(
        &self,
        config: WatchConfig,
        cancel: CancellationToken,
    ) -> Result<(), ConfigError> {
        config.validate()?;

        info!(
            "🔍 Starting mount watcher ({} mount(s), every {:?})",
            self.registry.len().await,
            config.interval
        );

        let mut ticker = time::interval_at(Instant::now() + config.interval, config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("🔍 Stopping mount watcher");
                    break;
                }
                _ = ticker.tick() => {
                    let report = self.check_once(&config).await;
                    debug!("🔍 Tick finished: {report:?}");
                    // Measure the next interval from the end of this tick
                    ticker.reset();
                }
            }
        }

        Ok(())
    }

    /// Start [`NfsMonitor::run`] on its own tokio task
    pub fn spawn(
        self: &Arc<Self>,
        config: WatchConfig,
        cancel: CancellationToken,
    ) -> Result<JoinHandle<()>, ConfigError> {
        config.validate()?;

        let monitor = Arc::clone(self);
        Ok(tokio::spawn(async move {
            if let Err(e) = monitor.run(config, cancel).await {
                warn!("⚠️ Mount watcher exited: {e}");
            }
        }))
    }
}
