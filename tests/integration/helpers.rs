//! Shared test helpers for integration tests.
//!
//! All tests here run against a live PostgreSQL instance and are marked
//! `#[ignore]`; run them with `cargo test -- --ignored` once
//! `config/test.toml` (or `TASKHUB__DATABASE__URL`) points at a
//! disposable database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use taskhub_auth::credentials::CredentialVerifier;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::password::{PasswordHasher, PasswordValidator};
use taskhub_auth::refresh::RefreshTokenStore;
use taskhub_auth::session::SessionManager;
use taskhub_auth::token::TokenHasher;
use taskhub_core::config::AppConfig;
use taskhub_database::DatabasePool;
use taskhub_database::repositories::{
    AccountRepository, InviteRepository, ProjectRepository, RefreshTokenRepository, UserRepository,
};
use taskhub_entity::user::AccountRole;
use taskhub_service::account::AccountService;
use taskhub_service::invite::InviteService;
use taskhub_service::notifier::{InviteNotifier, LoggingInviteNotifier};
use taskhub_service::project::ProjectService;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making in-process requests.
    pub router: Router,
    /// Database pool for direct fixture queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
    /// Invite service, for driving the sweeper directly.
    pub invite_service: Arc<InviteService>,
}

/// A captured response: status, parsed JSON body, and Set-Cookie values.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub cookies: Vec<String>,
}

impl TestResponse {
    /// Extract a cookie value by name from the Set-Cookie headers.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.iter().find_map(|raw| {
            let (pair, _) = raw.split_once(';').unwrap_or((raw, ""));
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }

    /// The `data` payload of the standard success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application against a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        taskhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let account_repo = Arc::new(AccountRepository::new(db_pool.clone()));
        let invite_repo = Arc::new(InviteRepository::new(db_pool.clone()));
        let refresh_repo = Arc::new(RefreshTokenRepository::new(db_pool.clone()));
        let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));

        let password_hasher = PasswordHasher::new();
        let password_validator = PasswordValidator::new(&config.auth);
        let token_hasher =
            TokenHasher::new(&config.auth.token_secret).expect("Failed to build token hasher");
        let jwt_encoder = JwtEncoder::new(&config.auth);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let refresh_store = RefreshTokenStore::new(
            Arc::clone(&refresh_repo),
            token_hasher,
            config.auth.refresh_ttl_days,
        );
        let verifier = CredentialVerifier::new(Arc::clone(&user_repo), password_hasher.clone());
        let session_manager = Arc::new(SessionManager::new(
            verifier,
            jwt_encoder,
            refresh_store,
            Arc::clone(&user_repo),
        ));

        let notifier: Arc<dyn InviteNotifier> = Arc::new(LoggingInviteNotifier);
        let invite_service = Arc::new(InviteService::new(
            Arc::clone(&invite_repo),
            Arc::clone(&user_repo),
            notifier,
            config.auth.invite_ttl_days,
        ));
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&account_repo),
            Arc::clone(&user_repo),
            invite_service.as_ref().clone(),
            password_hasher,
            password_validator,
        ));
        let project_service = Arc::new(ProjectService::new(
            Arc::clone(&project_repo),
            Arc::clone(&user_repo),
        ));

        let state = taskhub_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_decoder,
            session_manager,
            user_repo,
            account_service,
            invite_service: Arc::clone(&invite_service),
            project_service,
        };

        let router = taskhub_api::router::build_router(state);

        Self {
            router,
            db_pool,
            config,
            invite_service,
        }
    }

    async fn clean_database(pool: &PgPool) {
        sqlx::query(
            "TRUNCATE project_members, projects, account_invites, refresh_tokens, users, accounts CASCADE",
        )
        .execute(pool)
        .await
        .expect("Failed to clean database");
    }

    /// Make an in-process request, optionally with a Cookie header.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(cookie_header) = cookies {
            builder = builder.header(header::COOKIE, cookie_header);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            cookies,
        }
    }

    /// Register a new account, returning the owner's user id.
    pub async fn register_account(&self, account_name: &str, email: &str, password: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "account_name": account_name,
                    "email": email,
                    "password": password,
                    "first_name": "Test",
                    "last_name": "User",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "register failed: {}", response.body);

        Uuid::parse_str(response.data()["user"]["id"].as_str().unwrap()).unwrap()
    }

    /// Log in and return a Cookie header carrying both session cookies.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        let access = response.cookie("access_token").expect("no access cookie");
        let refresh = response.cookie("refresh_token").expect("no refresh cookie");
        format!("access_token={access}; refresh_token={refresh}")
    }

    /// Insert a user with the given role directly into an account.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: AccountRole,
        account_id: Uuid,
    ) -> Uuid {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, account_id) \
             VALUES ($1, $2, 'Test', 'User', $3, $4) RETURNING id",
        )
        .bind(email)
        .bind(hash)
        .bind(role)
        .bind(account_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert user")
    }

    /// Look up the account a user belongs to.
    pub async fn account_of(&self, user_id: Uuid) -> Uuid {
        sqlx::query_scalar::<_, Option<Uuid>>("SELECT account_id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to load user")
            .expect("user has no account")
    }

    /// Read an invite's raw token straight from the database.
    pub async fn invite_token(&self, invite_id: Uuid) -> String {
        sqlx::query_scalar::<_, String>("SELECT token FROM account_invites WHERE id = $1")
            .bind(invite_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to load invite token")
    }

    /// Force an invite's expiry into the past.
    pub async fn lapse_invite(&self, invite_id: Uuid) {
        sqlx::query(
            "UPDATE account_invites SET expires_at = NOW() - INTERVAL '1 hour' WHERE id = $1",
        )
        .bind(invite_id)
        .execute(&self.db_pool)
        .await
        .expect("Failed to lapse invite");
    }

    /// Read an invite's status straight from the database.
    pub async fn invite_status(&self, invite_id: Uuid) -> String {
        sqlx::query_scalar::<_, String>(
            "SELECT status::text FROM account_invites WHERE id = $1",
        )
        .bind(invite_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to load invite status")
    }
}
