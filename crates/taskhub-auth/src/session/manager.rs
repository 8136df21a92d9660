//! Session manager composing credential verification, access token
//! issuance, and refresh token rotation.
//!
//! Transport-agnostic: the API layer turns `SessionTokens` into the two
//! auth cookies; this module only handles raw values.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_database::repositories::UserRepository;

use crate::credentials::{CredentialVerifier, Identity};
use crate::jwt::JwtEncoder;
use crate::refresh::RefreshTokenStore;

/// Everything a successful login or refresh hands back.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Raw rotating refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
    /// The identity the tokens were minted for.
    pub identity: Identity,
}

/// The only component that touches both token types.
#[derive(Debug, Clone)]
pub struct SessionManager {
    verifier: CredentialVerifier,
    encoder: JwtEncoder,
    refresh_store: RefreshTokenStore,
    users: Arc<UserRepository>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        verifier: CredentialVerifier,
        encoder: JwtEncoder,
        refresh_store: RefreshTokenStore,
        users: Arc<UserRepository>,
    ) -> Self {
        Self {
            verifier,
            encoder,
            refresh_store,
            users,
        }
    }

    /// Authenticate with credentials and open a session.
    ///
    /// Unknown emails and wrong passwords both surface as `Unauthorized`
    /// to avoid account enumeration.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionTokens> {
        let identity = self.verifier.verify(email, password).await.map_err(|e| {
            if e.kind == ErrorKind::NotFound {
                AppError::unauthorized("Invalid credentials")
            } else {
                e
            }
        })?;

        let tokens = self.open_session(identity).await?;
        info!(user_id = %tokens.identity.id, "User logged in");
        Ok(tokens)
    }

    /// Rotate a refresh token into a new session token pair.
    ///
    /// The identity is re-derived from the owning user rather than from
    /// any stale claim, so a role change lands in the next access token.
    pub async fn refresh(&self, raw_refresh_token: &str) -> AppResult<SessionTokens> {
        let redemption = self.refresh_store.redeem(raw_refresh_token).await?;

        let user = self
            .users
            .find_by_id(redemption.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        let identity = Identity::from(&user);
        let (access_token, access_expires_at) = self.encoder.issue(&identity)?;

        Ok(SessionTokens {
            access_token,
            access_expires_at,
            refresh_token: redemption.raw_token,
            refresh_expires_at: redemption.token.expires_at,
            identity,
        })
    }

    /// Close a session by revoking its refresh token.
    pub async fn logout(&self, raw_refresh_token: &str) -> AppResult<()> {
        self.refresh_store.revoke(raw_refresh_token).await
    }

    async fn open_session(&self, identity: Identity) -> AppResult<SessionTokens> {
        let (access_token, access_expires_at) = self.encoder.issue(&identity)?;
        let (refresh_token, refresh_row) = self.refresh_store.issue(identity.id).await?;

        Ok(SessionTokens {
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at: refresh_row.expires_at,
            identity,
        })
    }
}
