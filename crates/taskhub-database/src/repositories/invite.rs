//! Account invite repository implementation.
//!
//! Every state-changing statement carries the status precondition that
//! matches the invite transition table, so a mutation racing another
//! observes zero affected rows instead of clobbering the winner.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_entity::invite::{AccountInvite, CreateAccountInvite, InviteStatus};

/// Repository for account invitations.
#[derive(Debug, Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Create a new invite repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new pending invite.
    pub async fn insert(&self, data: &CreateAccountInvite) -> AppResult<AccountInvite> {
        sqlx::query_as::<_, AccountInvite>(
            "INSERT INTO account_invites (email, account_id, role, token, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(data.account_id)
        .bind(data.role)
        .bind(&data.token)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("account_invites_token_key") =>
            {
                AppError::conflict("Invite token collision, please retry")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create invite", e),
        })
    }

    /// Find an invite by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>("SELECT * FROM account_invites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invite", e))
    }

    /// Find an invite by its opaque token, regardless of status.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>("SELECT * FROM account_invites WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find invite by token", e)
            })
    }

    /// Find a pending, not-yet-lapsed invite for an (email, account) pair.
    pub async fn find_active(&self, email: &str, account_id: Uuid) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>(
            "SELECT * FROM account_invites \
             WHERE LOWER(email) = LOWER($1) AND account_id = $2 \
               AND status = 'pending' AND expires_at > NOW()",
        )
        .bind(email)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active invite", e)
        })
    }

    /// List an account's invites with optional email and status filters.
    pub async fn list(
        &self,
        account_id: Uuid,
        email: Option<&str>,
        status: Option<InviteStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccountInvite>> {
        let pattern = email.map(|e| format!("%{e}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM account_invites \
             WHERE account_id = $1 \
               AND ($2::text IS NULL OR email ILIKE $2) \
               AND ($3::invite_status IS NULL OR status = $3)",
        )
        .bind(account_id)
        .bind(&pattern)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count invites", e))?;

        let invites = sqlx::query_as::<_, AccountInvite>(
            "SELECT * FROM account_invites \
             WHERE account_id = $1 \
               AND ($2::text IS NULL OR email ILIKE $2) \
               AND ($3::invite_status IS NULL OR status = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(account_id)
        .bind(&pattern)
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invites", e))?;

        Ok(PageResponse::new(
            invites,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Transition a pending invite to expired.
    ///
    /// Returns the updated row, or `None` when the invite was no longer
    /// pending (a concurrent accept, revoke, or sweep got there first).
    pub async fn mark_expired(&self, id: Uuid) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>(
            "UPDATE account_invites SET status = 'expired' \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to expire invite", e))
    }

    /// Transition a pending invite to accepted.
    pub async fn mark_accepted(&self, id: Uuid) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>(
            "UPDATE account_invites SET status = 'accepted', accepted = TRUE \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to accept invite", e))
    }

    /// Transition a pending or expired invite to revoked.
    pub async fn mark_revoked(&self, id: Uuid) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>(
            "UPDATE account_invites SET status = 'revoked' \
             WHERE id = $1 AND status IN ('pending', 'expired') \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke invite", e))
    }

    /// Reissue a lapsed invite with a fresh token and expiry.
    ///
    /// Forces the status back to pending on the same row. The precondition
    /// keeps a reissue from resurrecting an invite that was accepted or
    /// revoked while the resend was in flight.
    pub async fn reissue(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<AccountInvite>> {
        sqlx::query_as::<_, AccountInvite>(
            "UPDATE account_invites \
             SET status = 'pending', token = $2, expires_at = $3 \
             WHERE id = $1 AND status IN ('pending', 'expired') \
             RETURNING *",
        )
        .bind(id)
        .bind(token)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reissue invite", e))
    }

    /// Sweep every overdue pending invite into the expired state.
    ///
    /// A single set-based statement: re-running it is a no-op past the
    /// first run, and interrupting it cannot leave invites half-migrated.
    pub async fn expire_overdue(&self) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE account_invites SET status = 'expired' \
             WHERE status = 'pending' AND expires_at <= NOW()",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to expire overdue invites", e)
        })?;

        Ok(result.rows_affected())
    }
}
