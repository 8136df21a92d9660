//! Account repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_entity::account::{Account, CreateAccount};
use taskhub_entity::user::{CreateUser, User};

/// Repository for tenant accounts.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    /// Create an account together with its owner user in one transaction.
    ///
    /// Registration must not leave an account without an owner, so both
    /// inserts commit or neither does.
    pub async fn create_with_owner(
        &self,
        account: &CreateAccount,
        owner: &CreateUser,
    ) -> AppResult<(Account, User)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let created: Account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (name, industry) VALUES ($1, $2) RETURNING *",
        )
        .bind(&account.name)
        .bind(&account.industry)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create account", e))?;

        let user: User = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, account_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&owner.email)
        .bind(&owner.password_hash)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(owner.role)
        .bind(created.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create owner user", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        Ok((created, user))
    }
}
