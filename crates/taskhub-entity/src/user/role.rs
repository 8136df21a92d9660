//! Account-wide role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account-wide roles, ordered by privilege level.
///
/// Owner > Admin > ProjectManager > TeamLead > Member > Viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Account owner; full control including billing and deletion.
    Owner,
    /// Administers users and settings across the account.
    Admin,
    /// Manages projects and invites collaborators.
    ProjectManager,
    /// Leads a team within projects.
    TeamLead,
    /// Regular contributor.
    Member,
    /// Read-only access.
    Viewer,
}

impl AccountRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Owner => 6,
            Self::Admin => 5,
            Self::ProjectManager => 4,
            Self::TeamLead => 3,
            Self::Member => 2,
            Self::Viewer => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &AccountRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::TeamLead => "team_lead",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = taskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "project_manager" => Ok(Self::ProjectManager),
            "team_lead" => Ok(Self::TeamLead),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(taskhub_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: owner, admin, project_manager, team_lead, member, viewer"
            ))),
        }
    }
}
