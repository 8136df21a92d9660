//! Invitation lifecycle service.
//!
//! Drives the invite state machine {pending, accepted, expired, revoked}.
//! `Pending` is initial, `Accepted` and `Revoked` are terminal, and
//! `Expired` can only be left through a resend. Each transition is
//! enforced twice: by `InviteStatus::can_transition` here and by the
//! status precondition on the matching repository statement, so races
//! between resend, revoke, accept, and the sweeper resolve to exactly
//! one winner.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_database::repositories::{InviteRepository, UserRepository};
use taskhub_entity::invite::{AccountInvite, CreateAccountInvite, InviteStatus};
use taskhub_entity::user::AccountRole;

use taskhub_auth::token::generate_opaque_token;

use crate::notifier::InviteNotifier;

/// One failed entry of a bulk invite request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkInviteFailure {
    /// The email the entry targeted.
    pub email: String,
    /// Why the entry was rejected.
    pub error: String,
}

/// Partition of a bulk invite request into per-entry outcomes.
///
/// The batch never aborts on a single failure; every entry lands in
/// exactly one of the two lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkInviteOutcome {
    /// Invites that were created.
    pub successful: Vec<AccountInvite>,
    /// Entries that were rejected, with the reason.
    pub failed: Vec<BulkInviteFailure>,
}

/// Manages the account invitation lifecycle.
#[derive(Clone)]
pub struct InviteService {
    invites: Arc<InviteRepository>,
    users: Arc<UserRepository>,
    notifier: Arc<dyn InviteNotifier>,
    invite_ttl_days: i64,
}

impl std::fmt::Debug for InviteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InviteService")
            .field("invite_ttl_days", &self.invite_ttl_days)
            .finish()
    }
}

impl InviteService {
    /// Creates a new invite service.
    pub fn new(
        invites: Arc<InviteRepository>,
        users: Arc<UserRepository>,
        notifier: Arc<dyn InviteNotifier>,
        invite_ttl_days: u64,
    ) -> Self {
        Self {
            invites,
            users,
            notifier,
            invite_ttl_days: invite_ttl_days as i64,
        }
    }

    /// Issue a new invitation into the inviter's account.
    ///
    /// Rejects a duplicate while an active (pending, unexpired) invite
    /// already exists for the same email and account. Notification
    /// delivery is fire-and-forget: a failure is logged, never surfaced.
    pub async fn create(
        &self,
        email: &str,
        inviter_id: Uuid,
        role: AccountRole,
    ) -> AppResult<AccountInvite> {
        let inviter = self
            .users
            .find_by_id(inviter_id)
            .await
            .map_err(|e| e.into_retryable("create invite"))?
            .ok_or_else(|| AppError::not_found("Inviter not found"))?;

        let account_id = inviter
            .account_id
            .ok_or_else(|| AppError::validation("Inviter does not belong to an account"))?;

        if self
            .invites
            .find_active(email, account_id)
            .await
            .map_err(|e| e.into_retryable("create invite"))?
            .is_some()
        {
            return Err(AppError::validation(format!(
                "An active invite already exists for {email}"
            )));
        }

        let token = generate_opaque_token();
        let invite = self
            .invites
            .insert(&CreateAccountInvite {
                email: email.to_string(),
                account_id,
                role,
                token: token.clone(),
                expires_at: Utc::now() + chrono::Duration::days(self.invite_ttl_days),
            })
            .await
            .map_err(|e| e.into_retryable("create invite"))?;

        info!(invite_id = %invite.id, email = %invite.email, "Invite created");
        self.dispatch_notification(&invite, &token).await;

        Ok(invite)
    }

    /// Look up an invite by token for the registration flow.
    ///
    /// Read-that-can-mutate: a pending invite found past its expiry is
    /// flipped to expired here and the call fails, which keeps the
    /// stored status eventually consistent between sweeps. Repeated
    /// calls on a lapsed token keep failing the same way.
    pub async fn validate(&self, token: &str) -> AppResult<AccountInvite> {
        let invite = self
            .invites
            .find_by_token(token)
            .await
            .map_err(|e| e.into_retryable("validate invite"))?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        match invite.status {
            InviteStatus::Pending if !invite.is_lapsed() => Ok(invite),
            InviteStatus::Pending => {
                self.invites
                    .mark_expired(invite.id)
                    .await
                    .map_err(|e| e.into_retryable("validate invite"))?;
                Err(AppError::validation("Invite has expired"))
            }
            InviteStatus::Expired => Err(AppError::validation("Invite has expired")),
            InviteStatus::Accepted => {
                Err(AppError::validation("Invite has already been accepted"))
            }
            InviteStatus::Revoked => Err(AppError::not_found("Invite not found")),
        }
    }

    /// Accept a pending invite, escalating the invited user if present.
    ///
    /// Invoked by the registration path, not by the token holder
    /// directly. When a user with the invited email already exists, their
    /// account and role are reassigned to the invite's.
    pub async fn accept(&self, invite_id: Uuid) -> AppResult<AccountInvite> {
        let invite = self
            .invites
            .find_by_id(invite_id)
            .await
            .map_err(|e| e.into_retryable("accept invite"))?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        if invite.accepted || invite.status == InviteStatus::Accepted {
            return Err(AppError::validation("Invite has already been accepted"));
        }
        if !invite.status.can_transition(InviteStatus::Accepted) {
            return Err(AppError::validation(format!(
                "Invite is {} and can no longer be accepted",
                invite.status
            )));
        }
        if invite.is_lapsed() {
            self.invites
                .mark_expired(invite.id)
                .await
                .map_err(|e| e.into_retryable("accept invite"))?;
            return Err(AppError::validation("Invite has expired"));
        }

        let accepted = self
            .invites
            .mark_accepted(invite.id)
            .await
            .map_err(|e| e.into_retryable("accept invite"))?
            .ok_or_else(|| AppError::validation("Invite was modified concurrently"))?;

        if let Some(user) = self
            .users
            .find_by_email(&accepted.email)
            .await
            .map_err(|e| e.into_retryable("accept invite"))?
        {
            self.users
                .assign_account(user.id, accepted.account_id, accepted.role)
                .await
                .map_err(|e| e.into_retryable("accept invite"))?;
            info!(
                invite_id = %accepted.id,
                user_id = %user.id,
                role = %accepted.role,
                "Invite accepted, user reassigned"
            );
        } else {
            info!(invite_id = %accepted.id, "Invite accepted");
        }

        Ok(accepted)
    }

    /// Withdraw an invite.
    ///
    /// When `account_scope` is supplied the invite must belong to that
    /// account, otherwise the caller learns nothing beyond `NotFound`.
    /// Revoking an already-revoked invite is an idempotent no-op;
    /// revoking an accepted invite is rejected, acceptance is terminal.
    pub async fn revoke(
        &self,
        invite_id: Uuid,
        account_scope: Option<Uuid>,
    ) -> AppResult<AccountInvite> {
        let invite = self.find_scoped(invite_id, account_scope).await?;

        match invite.status {
            InviteStatus::Revoked => Ok(invite),
            InviteStatus::Accepted => Err(AppError::validation(
                "An accepted invite can no longer be revoked",
            )),
            InviteStatus::Pending | InviteStatus::Expired => self
                .invites
                .mark_revoked(invite.id)
                .await
                .map_err(|e| e.into_retryable("revoke invite"))?
                .ok_or_else(|| AppError::validation("Invite was modified concurrently")),
        }
    }

    /// Reissue a lapsed invite with a fresh token and expiry.
    ///
    /// A still-valid pending invite is rejected: resend is only
    /// meaningful once the previous token has lapsed.
    pub async fn resend(&self, invite_id: Uuid, account_id: Uuid) -> AppResult<AccountInvite> {
        let invite = self.find_scoped(invite_id, Some(account_id)).await?;

        if invite.is_active() {
            return Err(AppError::validation("Invite is still valid"));
        }
        if !invite.is_renewable() {
            return Err(AppError::validation(format!(
                "Invite is {} and cannot be resent",
                invite.status
            )));
        }

        let token = generate_opaque_token();
        let reissued = self
            .invites
            .reissue(
                invite.id,
                &token,
                Utc::now() + chrono::Duration::days(self.invite_ttl_days),
            )
            .await
            .map_err(|e| e.into_retryable("resend invite"))?
            .ok_or_else(|| AppError::validation("Invite was modified concurrently"))?;

        info!(invite_id = %reissued.id, email = %reissued.email, "Invite reissued");
        self.dispatch_notification(&reissued, &token).await;

        Ok(reissued)
    }

    /// Create many invites, isolating per-entry failures.
    ///
    /// This is the partial-failure contract for batched operations:
    /// every entry is attempted, and the outcome partitions the batch
    /// into `successful` and `failed` without ever throwing for one bad
    /// entry.
    pub async fn bulk_create(
        &self,
        entries: &[(String, AccountRole)],
        inviter_id: Uuid,
    ) -> AppResult<BulkInviteOutcome> {
        let mut outcome = BulkInviteOutcome::default();

        for (email, role) in entries {
            match self.create(email, inviter_id, *role).await {
                Ok(invite) => outcome.successful.push(invite),
                Err(e) => outcome.failed.push(BulkInviteFailure {
                    email: email.clone(),
                    error: e.message,
                }),
            }
        }

        info!(
            successful = outcome.successful.len(),
            failed = outcome.failed.len(),
            "Bulk invite completed"
        );
        Ok(outcome)
    }

    /// Sweep every overdue pending invite to expired.
    ///
    /// One set-based update; re-entrant, and safe to run on any schedule.
    pub async fn cleanup_expired(&self) -> AppResult<u64> {
        let count = self
            .invites
            .expire_overdue()
            .await
            .map_err(|e| e.into_retryable("expire invites"))?;

        if count > 0 {
            info!(count, "Expired overdue invites");
        }
        Ok(count)
    }

    /// Fetch one invite within the caller's account.
    pub async fn get(&self, invite_id: Uuid, account_id: Uuid) -> AppResult<AccountInvite> {
        self.find_scoped(invite_id, Some(account_id)).await
    }

    /// List an account's invites with optional email and status filters.
    pub async fn list(
        &self,
        account_id: Uuid,
        email: Option<&str>,
        status: Option<InviteStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccountInvite>> {
        self.invites
            .list(account_id, email, status, page)
            .await
            .map_err(|e| e.into_retryable("list invites"))
    }

    async fn find_scoped(
        &self,
        invite_id: Uuid,
        account_scope: Option<Uuid>,
    ) -> AppResult<AccountInvite> {
        let invite = self
            .invites
            .find_by_id(invite_id)
            .await
            .map_err(|e| e.into_retryable("load invite"))?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        match account_scope {
            Some(account_id) if invite.account_id != account_id => {
                Err(AppError::not_found("Invite not found"))
            }
            _ => Ok(invite),
        }
    }

    async fn dispatch_notification(&self, invite: &AccountInvite, raw_token: &str) {
        if let Err(e) = self.notifier.send_invite(invite, raw_token).await {
            warn!(invite_id = %invite.id, error = %e, "Invite notification failed");
        }
    }
}
