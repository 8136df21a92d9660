//! Registration: new tenant accounts and invited users.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_database::repositories::{AccountRepository, UserRepository};
use taskhub_entity::account::{Account, CreateAccount};
use taskhub_entity::user::{AccountRole, CreateUser, User};

use taskhub_auth::password::{PasswordHasher, PasswordValidator};

use crate::invite::InviteService;

/// Data for registering a new account with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Organization name.
    pub account_name: String,
    /// Owner email address.
    pub email: String,
    /// Owner password (plaintext, hashed here).
    pub password: String,
    /// Owner given name.
    pub first_name: String,
    /// Owner family name.
    pub last_name: String,
    /// Industry classification.
    pub industry: Option<String>,
}

/// Data for registering through an invitation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitedRegistration {
    /// The raw invite token.
    pub token: String,
    /// Password for the new user (plaintext, hashed here).
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Handles both registration paths into the system.
#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: Arc<AccountRepository>,
    users: Arc<UserRepository>,
    invites: InviteService,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        accounts: Arc<AccountRepository>,
        users: Arc<UserRepository>,
        invites: InviteService,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            accounts,
            users,
            invites,
            hasher,
            validator,
        }
    }

    /// Register a new account plus its owner user.
    ///
    /// No session is opened here; the caller logs in afterwards.
    pub async fn register(&self, data: Registration) -> AppResult<(Account, User)> {
        self.validator.validate(&data.password)?;

        if self
            .users
            .find_by_email(&data.email)
            .await
            .map_err(|e| e.into_retryable("register account"))?
            .is_some()
        {
            return Err(AppError::validation("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;
        let (account, owner) = self
            .accounts
            .create_with_owner(
                &CreateAccount {
                    name: data.account_name,
                    industry: data.industry,
                },
                &CreateUser {
                    email: data.email,
                    password_hash,
                    first_name: data.first_name,
                    last_name: data.last_name,
                    role: AccountRole::Owner,
                    account_id: None,
                },
            )
            .await
            .map_err(|e| e.into_retryable("register account"))?;

        info!(account_id = %account.id, user_id = %owner.id, "Account registered");
        Ok((account, owner))
    }

    /// Register through an invitation token.
    ///
    /// Validates the token, creates the user under the invite's account
    /// and role when no user with that email exists yet, then accepts
    /// the invite. Acceptance handles the reassignment of an existing
    /// user, so both paths converge on the invite's account and role.
    pub async fn register_invited(&self, data: InvitedRegistration) -> AppResult<User> {
        let invite = self.invites.validate(&data.token).await?;

        let existing = self
            .users
            .find_by_email(&invite.email)
            .await
            .map_err(|e| e.into_retryable("register invited user"))?;

        if existing.is_none() {
            self.validator.validate(&data.password)?;
            let password_hash = self.hasher.hash_password(&data.password)?;
            self.users
                .create(&CreateUser {
                    email: invite.email.clone(),
                    password_hash,
                    first_name: data.first_name,
                    last_name: data.last_name,
                    role: invite.role,
                    account_id: Some(invite.account_id),
                })
                .await
                .map_err(|e| e.into_retryable("register invited user"))?;
        }

        let accepted = self.invites.accept(invite.id).await?;

        let user = self
            .users
            .find_by_email(&accepted.email)
            .await
            .map_err(|e| e.into_retryable("register invited user"))?
            .ok_or_else(|| AppError::not_found("User not found after registration"))?;

        info!(user_id = %user.id, account_id = %accepted.account_id, "Invited user registered");
        Ok(user)
    }
}
