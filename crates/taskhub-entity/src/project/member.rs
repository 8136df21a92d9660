//! Project membership join entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::ProjectRole;

/// Membership of one user in one project, with a project-scoped role.
///
/// Queried by the project-role guard to answer "what role does user X
/// hold in project Y?".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectMember {
    /// The project.
    pub project_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// Role held within this project.
    pub role: ProjectRole,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}
