//! Authentication and credential configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Secret key for the deterministic refresh-token lookup hash.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Account invite TTL in days.
    #[serde(default = "default_invite_ttl")]
    pub invite_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether auth cookies carry the `Secure` attribute.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// SameSite=Strict on auth cookies (production); Lax otherwise.
    #[serde(default)]
    pub cookie_same_site_strict: bool,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION_TOO".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_invite_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

fn default_true() -> bool {
    true
}
