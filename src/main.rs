//! TaskHub Server — session, credential, and access-control core.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;

use taskhub_auth::credentials::CredentialVerifier;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::password::{PasswordHasher, PasswordValidator};
use taskhub_auth::refresh::RefreshTokenStore;
use taskhub_auth::session::SessionManager;
use taskhub_auth::token::TokenHasher;
use taskhub_database::DatabasePool;
use taskhub_database::repositories::{
    AccountRepository, InviteRepository, ProjectRepository, RefreshTokenRepository, UserRepository,
};
use taskhub_service::account::AccountService;
use taskhub_service::invite::InviteService;
use taskhub_service::notifier::{InviteNotifier, LoggingInviteNotifier};
use taskhub_service::project::ProjectService;
use taskhub_worker::WorkerScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("TASKHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TaskHub v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    let pool = DatabasePool::connect(&config.database).await?.into_pool();
    taskhub_database::migration::run_migrations(&pool).await?;

    // Repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let account_repo = Arc::new(AccountRepository::new(pool.clone()));
    let invite_repo = Arc::new(InviteRepository::new(pool.clone()));
    let refresh_repo = Arc::new(RefreshTokenRepository::new(pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(pool.clone()));

    // Auth primitives
    let password_hasher = PasswordHasher::new();
    let password_validator = PasswordValidator::new(&config.auth);
    let token_hasher = TokenHasher::new(&config.auth.token_secret)?;
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

    // Services
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

    // Background worker
    let mut scheduler = if config.worker.enabled {
        let scheduler = WorkerScheduler::new(&config.worker, Arc::clone(&invite_service)).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // HTTP server
    let app_state = taskhub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: pool.clone(),
        jwt_decoder,
        session_manager,
        user_repo,
        account_service,
        invite_service,
        project_service,
    };

    let app = taskhub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TaskHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    tracing::info!("TaskHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
