//! Route definitions for the TaskHub HTTP API.
//!
//! All routes are mounted under `/api`. Role requirements are declared
//! here, next to the routes they protect, as `static` descriptors; the
//! guard middleware reads them through `Extension` layers.

use axum::{
    Extension, Router,
    http::Method,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use taskhub_auth::guard::{AccountRoleSet, ProjectRequirement, ProjectRoleSet};
use taskhub_entity::project::ProjectRole;
use taskhub_entity::user::AccountRole;

use crate::handlers;
use crate::middleware::guard;
use crate::state::AppState;

/// Roles that may issue, list, resend, and revoke account invites.
static INVITE_MANAGERS: AccountRoleSet =
    AccountRoleSet::of(&[AccountRole::Owner, AccountRole::ProjectManager]);

/// Requirement for mutating a project's member list.
///
/// The account pre-check keeps read-only account roles out even when a
/// stale membership row would admit them.
static PROJECT_MANAGERS: ProjectRequirement = ProjectRequirement::new(
    AccountRoleSet::of(&[
        AccountRole::Owner,
        AccountRole::Admin,
        AccountRole::ProjectManager,
        AccountRole::TeamLead,
        AccountRole::Member,
    ]),
    ProjectRoleSet::of(&[ProjectRole::Owner, ProjectRole::ProjectManager]),
);

/// Requirement for reading a project's member list.
static PROJECT_MEMBERS: ProjectRequirement = ProjectRequirement::new(
    AccountRoleSet::any(),
    ProjectRoleSet::of(&[
        ProjectRole::Owner,
        ProjectRole::ProjectManager,
        ProjectRole::Member,
    ]),
);

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(invite_public_routes())
        .merge(invite_managed_routes(&state))
        .merge(project_routes(&state))
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Public invite endpoints used by the registration flow.
fn invite_public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/account-invites/validate/{token}",
            get(handlers::invite::validate),
        )
        .route("/account-invites/accept", post(handlers::invite::accept))
}

/// Invite management endpoints, guarded by account role.
fn invite_managed_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/account-invites/invite", post(handlers::invite::create))
        .route("/account-invites", get(handlers::invite::list))
        .route("/account-invites/{id}", get(handlers::invite::get))
        .route(
            "/account-invites/{id}/resend",
            post(handlers::invite::resend),
        )
        .route("/account-invites/{id}", delete(handlers::invite::revoke))
        .route("/account-invites/bulk", post(handlers::invite::bulk_create))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::account_role_guard,
        ))
        .route_layer(Extension(&INVITE_MANAGERS))
}

/// Project endpoints; member routes are guarded by project role.
fn project_routes(state: &AppState) -> Router<AppState> {
    let manage = Router::new()
        .route("/projects/{id}/members", post(handlers::project::add_member))
        .route(
            "/projects/{id}/members/{user_id}",
            delete(handlers::project::remove_member),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::project_role_guard,
        ))
        .route_layer(Extension(&PROJECT_MANAGERS));

    let view = Router::new()
        .route("/projects/{id}/members", get(handlers::project::list_members))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::project_role_guard,
        ))
        .route_layer(Extension(&PROJECT_MEMBERS));

    Router::new()
        .route("/projects", post(handlers::project::create))
        .merge(manage)
        .merge(view)
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
