//! Email/password credential verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_database::repositories::UserRepository;
use taskhub_entity::user::{AccountRole, User};

use crate::password::PasswordHasher;

/// The minimal identity established by a successful credential check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The user's ID.
    pub id: Uuid,
    /// The user's email address.
    pub email: String,
    /// The user's account-wide role.
    pub role: AccountRole,
    /// The account the user belongs to, if any.
    pub account_id: Option<Uuid>,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            account_id: user.account_id,
        }
    }
}

/// Checks a submitted email/password pair against the stored hash.
///
/// No side effects. A missing user surfaces as `NotFound` here; the
/// session layer collapses it into `Unauthorized` so the API never
/// distinguishes unknown accounts from wrong passwords.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
}

impl CredentialVerifier {
    /// Creates a new credential verifier.
    pub fn new(users: Arc<UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Verify an email/password pair, returning the caller's identity.
    pub async fn verify(&self, email: &str, password: &str) -> AppResult<Identity> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        Ok(Identity::from(&user))
    }
}
