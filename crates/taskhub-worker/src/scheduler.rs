//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::info;

use taskhub_core::config::worker::WorkerConfig;
use taskhub_core::error::AppError;
use taskhub_service::invite::InviteService;

use crate::jobs::InviteSweepJob;

/// Cron-based scheduler for TaskHub's background tasks.
pub struct WorkerScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
}

impl std::fmt::Debug for WorkerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerScheduler").finish()
    }
}

impl WorkerScheduler {
    /// Create a scheduler with all tasks registered.
    pub async fn new(
        config: &WorkerConfig,
        invite_service: Arc<InviteService>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        let worker = Self { scheduler };
        worker.register_invite_sweep(config, invite_service).await?;

        Ok(worker)
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shut the scheduler down, cancelling pending fires.
    ///
    /// An in-flight sweep finishes its single update statement; nothing
    /// is left half-migrated.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }

    /// Invite expiry sweep on the configured schedule (hourly default).
    async fn register_invite_sweep(
        &self,
        config: &WorkerConfig,
        invite_service: Arc<InviteService>,
    ) -> Result<(), AppError> {
        let sweep = InviteSweepJob::new(invite_service);
        let schedule = config.invite_sweep_schedule.clone();

        let job = CronJob::new_async(schedule.as_str(), move |_uuid, _lock| {
            let sweep = sweep.clone();
            Box::pin(async move {
                sweep.run_logged().await;
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create invite_sweep schedule: {e}"))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add invite_sweep schedule: {e}"))
        })?;

        info!(schedule = %schedule, "Registered: invite_sweep");
        Ok(())
    }
}
