//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One outstanding (or historical) refresh credential.
///
/// The raw opaque token is never persisted; only a deterministic keyed
/// hash of it is stored in `token_hash`. Rows are revoked rather than
/// deleted so redemption history remains available as an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique token identifier.
    pub id: Uuid,
    /// The user this token belongs to.
    pub user_id: Uuid,
    /// Keyed hash (HMAC-SHA256, hex) of the opaque token value.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// When the token stops being redeemable.
    pub expires_at: DateTime<Utc>,
    /// Whether the token has been consumed or explicitly revoked.
    pub revoked: bool,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Check whether the token has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check whether the token can still be redeemed.
    pub fn is_valid(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}

/// Data required to persist a new refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRefreshToken {
    /// The owning user.
    pub user_id: Uuid,
    /// Keyed hash of the opaque token value.
    pub token_hash: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
