//! Opaque token generation and deterministic lookup hashing.
//!
//! Raw refresh and invite tokens are 32 random bytes, base64url-encoded.
//! Refresh tokens are never persisted raw: only a keyed HMAC-SHA256 of
//! the value is stored, which is deterministic and therefore usable as a
//! lookup column, unlike a per-call salted hash.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a raw opaque token.
const TOKEN_BYTES: usize = 32;

/// Generate a new cryptographically random opaque token.
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Computes the deterministic keyed lookup hash of opaque token values.
#[derive(Clone)]
pub struct TokenHasher {
    mac: HmacSha256,
}

impl std::fmt::Debug for TokenHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenHasher").finish()
    }
}

impl TokenHasher {
    /// Creates a new hasher keyed with the server token secret.
    pub fn new(secret: &str) -> AppResult<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| AppError::configuration(format!("Invalid token secret: {e}")))?;
        Ok(Self { mac })
    }

    /// Compute the lookup hash of a raw token value.
    pub fn hash(&self, raw: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(raw.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic() {
        let hasher = TokenHasher::new("test-secret").unwrap();
        let raw = generate_opaque_token();
        assert_eq!(hasher.hash(&raw), hasher.hash(&raw));
    }

    #[test]
    fn different_tokens_hash_differently() {
        let hasher = TokenHasher::new("test-secret").unwrap();
        assert_ne!(
            hasher.hash(&generate_opaque_token()),
            hasher.hash(&generate_opaque_token())
        );
    }

    #[test]
    fn different_keys_hash_differently() {
        let a = TokenHasher::new("secret-a").unwrap();
        let b = TokenHasher::new("secret-b").unwrap();
        assert_ne!(a.hash("same-token"), b.hash("same-token"));
    }

    #[test]
    fn generated_tokens_are_url_safe() {
        let raw = generate_opaque_token();
        assert!(raw.len() >= 42);
        assert!(raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
