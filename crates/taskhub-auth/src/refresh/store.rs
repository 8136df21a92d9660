//! Issuance, single-use redemption, and revocation of refresh tokens.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_database::repositories::RefreshTokenRepository;
use taskhub_entity::refresh_token::{CreateRefreshToken, RefreshToken};

use crate::token::{TokenHasher, generate_opaque_token};

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct Redemption {
    /// The user the consumed token belonged to.
    pub user_id: Uuid,
    /// The replacement raw token, handed back to the caller.
    pub raw_token: String,
    /// The persisted replacement row.
    pub token: RefreshToken,
}

/// Persists rotating refresh tokens and enforces one-time use.
///
/// Only the deterministic keyed hash of a token is stored; the raw value
/// exists in memory between generation and the HTTP response, nowhere
/// else.
#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    tokens: Arc<RefreshTokenRepository>,
    hasher: TokenHasher,
    refresh_ttl_days: i64,
}

impl RefreshTokenStore {
    /// Creates a new refresh token store.
    pub fn new(
        tokens: Arc<RefreshTokenRepository>,
        hasher: TokenHasher,
        refresh_ttl_days: u64,
    ) -> Self {
        Self {
            tokens,
            hasher,
            refresh_ttl_days: refresh_ttl_days as i64,
        }
    }

    /// Issue a fresh refresh token for a user.
    ///
    /// Returns the raw value for transport; only its hash is persisted.
    pub async fn issue(&self, user_id: Uuid) -> AppResult<(String, RefreshToken)> {
        let raw = generate_opaque_token();
        let token = self
            .tokens
            .insert(&CreateRefreshToken {
                user_id,
                token_hash: self.hasher.hash(&raw),
                expires_at: Utc::now() + chrono::Duration::days(self.refresh_ttl_days),
            })
            .await?;

        Ok((raw, token))
    }

    /// Redeem a raw refresh token, rotating it.
    ///
    /// The matched row is consumed before the replacement is issued.
    /// When two redemptions race on the same raw token, the repository's
    /// conditional update lets exactly one of them through; the loser
    /// fails closed with `Unauthorized`, which is what makes a replayed
    /// token worthless.
    pub async fn redeem(&self, raw: &str) -> AppResult<Redemption> {
        let hash = self.hasher.hash(raw);

        let token = self
            .tokens
            .find_active_by_hash(&hash)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        if token.is_expired() {
            return Err(AppError::unauthorized("Refresh token has expired"));
        }

        if !self.tokens.consume(token.id).await? {
            warn!(user_id = %token.user_id, "Refresh token replay detected");
            return Err(AppError::unauthorized("Refresh token has already been used"));
        }

        let (raw_token, replacement) = self.issue(token.user_id).await?;

        Ok(Redemption {
            user_id: token.user_id,
            raw_token,
            token: replacement,
        })
    }

    /// Revoke a raw refresh token.
    ///
    /// Idempotent: revoking an unknown or already-revoked token is not an
    /// error.
    pub async fn revoke(&self, raw: &str) -> AppResult<()> {
        let hash = self.hasher.hash(raw);
        self.tokens.revoke_by_hash(&hash).await?;
        Ok(())
    }
}
