//! Invite expiry sweep job.

use std::sync::Arc;

use tracing::{error, info};

use taskhub_core::result::AppResult;
use taskhub_service::invite::InviteService;

/// Transitions overdue pending invites to expired.
///
/// Backed by one set-based update, so overlapping or repeated runs are
/// harmless: the second run finds nothing left to move.
#[derive(Clone)]
pub struct InviteSweepJob {
    invites: Arc<InviteService>,
}

impl std::fmt::Debug for InviteSweepJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InviteSweepJob").finish()
    }
}

impl InviteSweepJob {
    /// Creates a new sweep job.
    pub fn new(invites: Arc<InviteService>) -> Self {
        Self { invites }
    }

    /// Run one sweep, returning the number of invites expired.
    pub async fn run(&self) -> AppResult<u64> {
        let count = self.invites.cleanup_expired().await?;
        info!(count, "Invite expiry sweep completed");
        Ok(count)
    }

    /// Run one sweep, logging instead of propagating failures.
    ///
    /// Scheduled invocations have no caller to report to.
    pub async fn run_logged(&self) {
        if let Err(e) = self.run().await {
            error!(error = %e, "Invite expiry sweep failed");
        }
    }
}
