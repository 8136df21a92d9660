//! Invite notification seam.
//!
//! Email delivery is an external collaborator. The trait below is the
//! fire-and-forget boundary: callers log delivery failures and continue,
//! they never fail the parent operation on one.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_entity::invite::AccountInvite;

/// Delivers invitation messages to the invited address.
#[async_trait]
pub trait InviteNotifier: Send + Sync {
    /// Send the invitation carrying the raw token.
    async fn send_invite(&self, invite: &AccountInvite, raw_token: &str) -> AppResult<()>;
}

/// Default notifier that records the delivery instead of sending mail.
///
/// Stands in for the real mail integration in development and tests.
#[derive(Debug, Clone, Default)]
pub struct LoggingInviteNotifier;

#[async_trait]
impl InviteNotifier for LoggingInviteNotifier {
    async fn send_invite(&self, invite: &AccountInvite, _raw_token: &str) -> AppResult<()> {
        tracing::info!(
            invite_id = %invite.id,
            email = %invite.email,
            role = %invite.role,
            "Invite notification dispatched"
        );
        Ok(())
    }
}
