//! Declarative role guard middleware.
//!
//! Requirements are `static` descriptors attached to route groups via
//! `Extension` layers; the middleware below reads the descriptor,
//! authenticates the caller, and delegates the admission decision to the
//! pure guard types. The resolved `RequestContext` is inserted into the
//! request extensions for handlers.

use std::collections::HashMap;

use axum::Extension;
use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use taskhub_auth::guard::{AccountRoleSet, ProjectRequirement};
use taskhub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::auth::request_context;
use crate::state::AppState;

/// Enforce the account-role set declared on the route group.
pub async fn account_role_guard(
    State(state): State<AppState>,
    Extension(required): Extension<&'static AccountRoleSet>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request_context(&state, request.headers())?;
    required.authorize(ctx.role)?;

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

/// Enforce the project requirement declared on the route group.
///
/// The target project is taken from the `id` path parameter; a route
/// without one rejects every caller, which is the fail-closed reading of
/// "no project id supplied".
pub async fn project_role_guard(
    State(state): State<AppState>,
    Extension(required): Extension<&'static ProjectRequirement>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request_context(&state, request.headers())?;

    let project_id = params
        .get("id")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| AppError::forbidden("No project identifier supplied"))?;

    let membership = state
        .project_service
        .member_role(project_id, ctx.user_id)
        .await?;
    required.evaluate(ctx.role, membership)?;

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
