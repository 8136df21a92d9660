//! Project-role guard: membership-scoped authorization.

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_entity::project::ProjectRole;
use taskhub_entity::user::AccountRole;

use super::account::AccountRoleSet;

/// A declarative set of project roles attached to a route registration.
#[derive(Debug, Clone, Copy)]
pub struct ProjectRoleSet {
    roles: &'static [ProjectRole],
}

impl ProjectRoleSet {
    /// A requirement admitting only the listed project roles.
    pub const fn of(roles: &'static [ProjectRole]) -> Self {
        Self { roles }
    }

    /// Whether the set admits the given project role.
    pub fn admits(&self, role: ProjectRole) -> bool {
        self.roles.contains(&role)
    }
}

/// The full requirement evaluated by the project-role guard.
///
/// The account set runs first as a coarse pre-check; only then is the
/// caller's membership in the target project consulted.
#[derive(Debug, Clone, Copy)]
pub struct ProjectRequirement {
    /// Coarse account-role pre-check.
    pub account_roles: AccountRoleSet,
    /// Required role within the target project.
    pub project_roles: ProjectRoleSet,
}

impl ProjectRequirement {
    /// Creates a new project requirement.
    pub const fn new(account_roles: AccountRoleSet, project_roles: ProjectRoleSet) -> Self {
        Self {
            account_roles,
            project_roles,
        }
    }

    /// Decide admission for a caller.
    ///
    /// `membership` is the caller's resolved role in the target project;
    /// `None` means no membership row exists and the caller is rejected
    /// even when the account pre-check admitted them.
    pub fn evaluate(
        &self,
        account_role: AccountRole,
        membership: Option<ProjectRole>,
    ) -> AppResult<()> {
        self.account_roles.authorize(account_role)?;

        match membership {
            Some(role) if self.project_roles.admits(role) => Ok(()),
            Some(_) => Err(AppError::forbidden(
                "Your project role does not permit this action",
            )),
            None => Err(AppError::forbidden("You are not a member of this project")),
        }
    }
}
