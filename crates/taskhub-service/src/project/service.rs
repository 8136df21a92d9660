//! Project creation and membership management.
//!
//! Projects themselves are business entities owned elsewhere; this
//! service carries the membership surface the project-role guard needs.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_database::repositories::{ProjectRepository, UserRepository};
use taskhub_entity::project::{CreateProject, Project, ProjectMember, ProjectRole};

use crate::context::RequestContext;

/// Manages projects and their membership rows.
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: Arc<ProjectRepository>,
    users: Arc<UserRepository>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(projects: Arc<ProjectRepository>, users: Arc<UserRepository>) -> Self {
        Self { projects, users }
    }

    /// Create a project; the creator is auto-added as project owner.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<Project> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Project name cannot be empty"));
        }

        let creator = self
            .users
            .find_by_id(ctx.user_id)
            .await
            .map_err(|e| e.into_retryable("create project"))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let account_id = creator
            .account_id
            .ok_or_else(|| AppError::validation("You must belong to an account to create projects"))?;

        let project = self
            .projects
            .create_with_owner(&CreateProject {
                account_id,
                name: name.trim().to_string(),
                created_by: ctx.user_id,
            })
            .await
            .map_err(|e| e.into_retryable("create project"))?;

        info!(project_id = %project.id, user_id = %ctx.user_id, "Project created");
        Ok(project)
    }

    /// Add a user to a project at the given role.
    ///
    /// The user must belong to the project's account.
    pub async fn add_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: ProjectRole,
    ) -> AppResult<ProjectMember> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(|e| e.into_retryable("add project member"))?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| e.into_retryable("add project member"))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !user.belongs_to(project.account_id) {
            return Err(AppError::validation(
                "User does not belong to this project's account",
            ));
        }

        let member = self
            .projects
            .add_member(project_id, user_id, role)
            .await
            .map_err(|e| e.into_retryable("add project member"))?;

        info!(project_id = %project_id, user_id = %user_id, role = %role, "Project member added");
        Ok(member)
    }

    /// Remove a user from a project.
    pub async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let removed = self
            .projects
            .remove_member(project_id, user_id)
            .await
            .map_err(|e| e.into_retryable("remove project member"))?;

        if !removed {
            return Err(AppError::not_found("Project membership not found"));
        }

        info!(project_id = %project_id, user_id = %user_id, "Project member removed");
        Ok(())
    }

    /// List all members of a project.
    pub async fn list_members(&self, project_id: Uuid) -> AppResult<Vec<ProjectMember>> {
        self.projects
            .list_members(project_id)
            .await
            .map_err(|e| e.into_retryable("list project members"))
    }

    /// Resolve the role a user holds within a project, if any.
    ///
    /// The lookup behind the project-role guard.
    pub async fn member_role(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ProjectRole>> {
        self.projects
            .member_role(project_id, user_id)
            .await
            .map_err(|e| e.into_retryable("resolve project role"))
    }
}
