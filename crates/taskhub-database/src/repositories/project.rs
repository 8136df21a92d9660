//! Project and project membership repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_entity::project::{CreateProject, Project, ProjectMember, ProjectRole};

/// Repository for projects and the project membership join table.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// Create a project and auto-add its creator as project owner.
    ///
    /// Both inserts run in one transaction so a project can never exist
    /// without an owner membership row.
    pub async fn create_with_owner(&self, data: &CreateProject) -> AppResult<Project> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let project: Project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (account_id, name, created_by) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(data.account_id)
        .bind(&data.name)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))?;

        sqlx::query(
            "INSERT INTO project_members (project_id, user_id, role) VALUES ($1, $2, 'owner')",
        )
        .bind(project.id)
        .bind(data.created_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to add project owner", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit project creation", e)
        })?;

        Ok(project)
    }

    /// Add a member to a project.
    pub async fn add_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: ProjectRole,
    ) -> AppResult<ProjectMember> {
        sqlx::query_as::<_, ProjectMember>(
            "INSERT INTO project_members (project_id, user_id, role) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("project_members_pkey") =>
            {
                AppError::conflict("User is already a member of this project")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add project member", e),
        })
    }

    /// Remove a member from a project.
    pub async fn remove_member(&self, project_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove project member", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// List all members of a project.
    pub async fn list_members(&self, project_id: Uuid) -> AppResult<Vec<ProjectMember>> {
        sqlx::query_as::<_, ProjectMember>(
            "SELECT * FROM project_members WHERE project_id = $1 ORDER BY created_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list project members", e)
        })
    }

    /// Answer "what role does this user hold in this project?".
    ///
    /// `None` means no membership row exists. This is the single lookup
    /// the project-role guard is built on.
    pub async fn member_role(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ProjectRole>> {
        sqlx::query_scalar::<_, ProjectRole>(
            "SELECT role FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up project role", e)
        })
    }
}
