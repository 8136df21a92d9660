//! Account-role guard: a static role claim check.

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_entity::user::AccountRole;

/// A declarative set of account roles attached to a route registration.
///
/// Const-constructible so requirements live next to the routes they
/// protect as `static` descriptors. An empty set admits any
/// authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct AccountRoleSet {
    roles: &'static [AccountRole],
}

impl AccountRoleSet {
    /// A requirement admitting only the listed roles.
    pub const fn of(roles: &'static [AccountRole]) -> Self {
        Self { roles }
    }

    /// A requirement admitting any authenticated caller.
    pub const fn any() -> Self {
        Self { roles: &[] }
    }

    /// Whether the set admits the given role.
    pub fn admits(&self, role: AccountRole) -> bool {
        self.roles.is_empty() || self.roles.contains(&role)
    }

    /// Admit or reject the caller's role claim.
    pub fn authorize(&self, role: AccountRole) -> AppResult<()> {
        if self.admits(role) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Your account role does not permit this action",
            ))
        }
    }
}
