//! Account invitation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_service::context::RequestContext;

use crate::dto::request::{AcceptInviteRequest, BulkInviteRequest, CreateInviteRequest, InviteListQuery};
use crate::dto::response::{
    ApiResponse, BulkInviteFailureResponse, BulkInviteResponse, InviteResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/account-invites/invite
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateInviteRequest>,
) -> Result<Json<ApiResponse<InviteResponse>>, ApiError> {
    let invite = state
        .invite_service
        .create(&req.email, auth.user_id, req.role)
        .await?;

    Ok(Json(ApiResponse::ok(invite.into())))
}

/// GET /api/account-invites
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InviteListQuery>,
) -> Result<Json<ApiResponse<PageResponse<InviteResponse>>>, ApiError> {
    let account_id = caller_account_id(&state, &auth).await?;
    let page = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(25));

    let invites = state
        .invite_service
        .list(account_id, query.email.as_deref(), query.status, &page)
        .await?;

    let items: Vec<InviteResponse> = invites.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(PageResponse::new(
        items,
        invites.page,
        invites.page_size,
        invites.total_items,
    ))))
}

/// GET /api/account-invites/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InviteResponse>>, ApiError> {
    let account_id = caller_account_id(&state, &auth).await?;
    let invite = state.invite_service.get(id, account_id).await?;

    Ok(Json(ApiResponse::ok(invite.into())))
}

/// POST /api/account-invites/{id}/resend
pub async fn resend(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InviteResponse>>, ApiError> {
    let account_id = caller_account_id(&state, &auth).await?;
    let invite = state.invite_service.resend(id, account_id).await?;

    Ok(Json(ApiResponse::ok(invite.into())))
}

/// DELETE /api/account-invites/{id}
pub async fn revoke(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InviteResponse>>, ApiError> {
    let account_id = caller_account_id(&state, &auth).await?;
    let invite = state.invite_service.revoke(id, Some(account_id)).await?;

    Ok(Json(ApiResponse::ok(invite.into())))
}

/// POST /api/account-invites/bulk
pub async fn bulk_create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<BulkInviteRequest>,
) -> Result<Json<ApiResponse<BulkInviteResponse>>, ApiError> {
    let entries: Vec<(String, _)> = req
        .invites
        .into_iter()
        .map(|i| (i.email, i.role))
        .collect();

    let outcome = state
        .invite_service
        .bulk_create(&entries, auth.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(BulkInviteResponse {
        successful: outcome.successful.into_iter().map(Into::into).collect(),
        failed: outcome
            .failed
            .into_iter()
            .map(|f| BulkInviteFailureResponse {
                email: f.email,
                error: f.error,
            })
            .collect(),
    })))
}

/// GET /api/account-invites/validate/{token}
///
/// Public. This read can mutate: a lapsed pending invite is flipped to
/// expired before the 400 comes back.
pub async fn validate(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<InviteResponse>>, ApiError> {
    let invite = state.invite_service.validate(&token).await?;
    Ok(Json(ApiResponse::ok(invite.into())))
}

/// POST /api/account-invites/accept
///
/// Public. The invited-registration path: creates (or reassigns) the
/// user under the invite's account and role.
pub async fn accept(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AcceptInviteRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .account_service
        .register_invited(taskhub_service::account::InvitedRegistration {
            token: req.token,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// Resolve the caller's account for tenant scoping.
async fn caller_account_id(state: &AppState, auth: &AuthUser) -> Result<Uuid, ApiError> {
    let ctx: &RequestContext = auth.context();
    let user = state
        .user_repo
        .find_by_id(ctx.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    user.account_id
        .ok_or_else(|| AppError::validation("You do not belong to an account").into())
}
