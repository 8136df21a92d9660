//! Request DTOs with validation.
//!
//! Role and status fields deserialize straight into the closed enums, so
//! an unrecognized value is rejected at the parsing boundary before any
//! handler runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use taskhub_entity::invite::InviteStatus;
use taskhub_entity::project::ProjectRole;
use taskhub_entity::user::AccountRole;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Organization name.
    #[validate(length(min = 1, max = 255, message = "Account name is required"))]
    pub account_name: String,
    /// Owner email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Owner password. Strength policy is enforced by the service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Owner given name.
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    /// Owner family name.
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    /// Industry classification.
    pub industry: Option<String>,
}

/// Single invite creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInviteRequest {
    /// Email address to invite.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Account-wide role granted on acceptance.
    pub role: AccountRole,
}

/// Bulk invite creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkInviteRequest {
    /// The invites to attempt; failures are reported per entry.
    #[validate(length(min = 1, message = "At least one invite is required"), nested)]
    pub invites: Vec<CreateInviteRequest>,
}

/// Invited registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcceptInviteRequest {
    /// The raw invite token.
    #[validate(length(min = 1, message = "Invite token is required"))]
    pub token: String,
    /// Password for the new user.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Given name.
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
}

/// Invite list query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub limit: Option<u64>,
    /// Substring filter on the invited email.
    pub email: Option<String>,
    /// Exact status filter.
    pub status: Option<InviteStatus>,
}

/// Project creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 255, message = "Project name is required"))]
    pub name: String,
}

/// Project member addition request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMemberRequest {
    /// The user to add.
    pub user_id: Uuid,
    /// Project-scoped role to grant.
    pub role: ProjectRole,
}
