//! Project membership handlers.
//!
//! The member routes sit behind the project-role guard middleware, which
//! has already authenticated the caller and checked their membership by
//! the time these run.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::{AddMemberRequest, CreateProjectRequest};
use crate::dto::response::{ApiResponse, MemberResponse, MessageResponse, ProjectResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let project = state.project_service.create(auth.context(), &req.name).await?;
    Ok(Json(ApiResponse::ok(project.into())))
}

/// POST /api/projects/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AddMemberRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, ApiError> {
    let member = state
        .project_service
        .add_member(id, req.user_id, req.role)
        .await?;

    Ok(Json(ApiResponse::ok(member.into())))
}

/// DELETE /api/projects/{id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.project_service.remove_member(id, user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}

/// GET /api/projects/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MemberResponse>>>, ApiError> {
    let members = state.project_service.list_members(id).await?;
    Ok(Json(ApiResponse::ok(
        members.into_iter().map(Into::into).collect(),
    )))
}
