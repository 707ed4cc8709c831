use crate::sync::engine::SyncEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Price synchronization scheduler
///
/// Two entry points sharing the same engine: a continuous mode that executes
/// one run per interval for the lifetime of the process, and a
/// fire-and-forget trigger used by the refresh endpoint. Both may overlap;
/// per-symbol serialization inside the engine keeps overlapping runs safe.
pub struct PriceSyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
}

impl PriceSyncScheduler {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// Schedule one synchronization run in the background
    ///
    /// Returns as soon as the task is spawned; the caller is acknowledged
    /// before the run completes.
    pub fn trigger(&self) -> tokio::task::JoinHandle<()> {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            run_tick(engine).await;
        })
    }

    /// Register the repeated synchronization job with the scheduler
    pub async fn register(&self, scheduler: &JobScheduler) -> Result<(), JobSchedulerError> {
        let engine = self.engine.clone();

        let job = Job::new_repeated_async(self.interval, move |_uuid, _lock| {
            let engine = engine.clone();
            Box::pin(async move {
                run_tick(engine).await;
            })
        })?;

        scheduler.add(job).await?;

        tracing::info!(
            "Price sync job registered (runs every {} seconds)",
            self.interval.as_secs()
        );

        Ok(())
    }

    /// Run continuous synchronization for the lifetime of the process
    ///
    /// Blocks the calling task forever; intended to be the whole lifetime of
    /// a dedicated worker process. Tick faults are logged and absorbed, they
    /// never terminate the loop.
    pub async fn run_continuous(&self) -> Result<(), JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;
        self.register(&scheduler).await?;
        scheduler.start().await?;

        tracing::info!("Continuous price synchronization started");

        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Execute one tick, absorbing any fault so the schedule keeps running
async fn run_tick(engine: Arc<SyncEngine>) {
    let handle = tokio::spawn(async move { engine.run_once().await });

    match handle.await {
        Ok(report) => {
            if report.skipped() > 0 {
                tracing::warn!(
                    "Sync tick finished with {} skipped symbols",
                    report.skipped()
                );
            }
        }
        Err(e) => {
            tracing::error!("Sync tick aborted: {}", e);
        }
    }
}
