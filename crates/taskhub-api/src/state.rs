//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use taskhub_auth::jwt::JwtDecoder;
use taskhub_auth::session::SessionManager;
use taskhub_core::config::AppConfig;
use taskhub_database::repositories::UserRepository;
use taskhub_service::account::AccountService;
use taskhub_service::invite::InviteService;
use taskhub_service::project::ProjectService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Access token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Login / refresh / logout composition.
    pub session_manager: Arc<SessionManager>,
    /// User repository (account scoping for invite handlers).
    pub user_repo: Arc<UserRepository>,
    /// Registration flows.
    pub account_service: Arc<AccountService>,
    /// Invitation lifecycle.
    pub invite_service: Arc<InviteService>,
    /// Project membership management.
    pub project_service: Arc<ProjectService>,
}
