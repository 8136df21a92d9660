//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use taskhub_core::config::auth::AuthConfig;
use taskhub_core::error::AppError;

use super::claims::Claims;

/// Validates access token signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate an access token string.
    ///
    /// Every failure mode maps to `Unauthorized` so the caller cannot
    /// probe for the difference between a forged and an expired token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use taskhub_core::config::auth::AuthConfig;
    use taskhub_entity::user::AccountRole;

    use crate::credentials::Identity;
    use crate::jwt::encoder::JwtEncoder;

    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-signing-secret".to_string(),
            token_secret: "unit-test-token-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            invite_ttl_days: 7,
            password_min_length: 8,
            cookie_secure: false,
            cookie_same_site_strict: false,
        }
    }

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "dev@example.com".to_string(),
            role: AccountRole::ProjectManager,
            account_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn encode_decode_round_trip() {
        let cfg = config();
        let id = identity();
        let (token, exp) = JwtEncoder::new(&cfg).issue(&id).unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.sub, id.id);
        assert_eq!(claims.email, id.email);
        assert_eq!(claims.role, AccountRole::ProjectManager);
        assert_eq!(claims.exp, exp.timestamp());
        assert!(exp > Utc::now());
    }

    #[test]
    fn rejects_wrong_secret() {
        let id = identity();
        let (token, _) = JwtEncoder::new(&config()).issue(&id).unwrap();

        let mut other = config();
        other.jwt_secret = "a-different-secret".to_string();
        let err = JwtDecoder::new(&other).decode(&token).unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::Unauthorized);
    }

    #[test]
    fn rejects_garbage() {
        let err = JwtDecoder::new(&config()).decode("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::Unauthorized);
    }
}
