//! Project-scoped role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold within a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Created the project; full control.
    Owner,
    /// Manages membership and settings.
    ProjectManager,
    /// Regular collaborator.
    Member,
}

impl ProjectRole {
    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::ProjectManager => "project_manager",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectRole {
    type Err = taskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "project_manager" => Ok(Self::ProjectManager),
            "member" => Ok(Self::Member),
            _ => Err(taskhub_core::AppError::validation(format!(
                "Invalid project role: '{s}'. Expected one of: owner, project_manager, member"
            ))),
        }
    }
}
