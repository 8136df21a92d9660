//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_auth::credentials::Identity;
use taskhub_entity::account::Account;
use taskhub_entity::invite::{AccountInvite, InviteStatus};
use taskhub_entity::project::{Project, ProjectMember, ProjectRole};
use taskhub_entity::user::{AccountRole, User};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The caller's identity as established by login, refresh, or `/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Account-wide role.
    pub role: AccountRole,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            role: identity.role,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account-wide role.
    pub role: AccountRole,
    /// The account the user belongs to, if any.
    pub account_id: Option<Uuid>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            account_id: user.account_id,
            created_at: user.created_at,
        }
    }
}

/// Account summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Organization name.
    pub name: String,
    /// Industry classification.
    pub industry: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            industry: account.industry,
            created_at: account.created_at,
        }
    }
}

/// Registration response: the new account and its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The created account.
    pub account: AccountResponse,
    /// The created owner user.
    pub user: UserResponse,
}

/// Invite summary for responses. The opaque token is never included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    /// Invite ID.
    pub id: Uuid,
    /// Invited email address.
    pub email: String,
    /// Target account.
    pub account_id: Uuid,
    /// Role granted on acceptance.
    pub role: AccountRole,
    /// Lifecycle status.
    pub status: InviteStatus,
    /// Whether the invite has been accepted.
    pub accepted: bool,
    /// When the invite lapses.
    pub expires_at: DateTime<Utc>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<AccountInvite> for InviteResponse {
    fn from(invite: AccountInvite) -> Self {
        Self {
            id: invite.id,
            email: invite.email,
            account_id: invite.account_id,
            role: invite.role,
            status: invite.status,
            accepted: invite.accepted,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
        }
    }
}

/// One failed entry of a bulk invite response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkInviteFailureResponse {
    /// The email the entry targeted.
    pub email: String,
    /// Why the entry was rejected.
    pub error: String,
}

/// Bulk invite response: the per-entry partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkInviteResponse {
    /// Invites that were created.
    pub successful: Vec<InviteResponse>,
    /// Entries that were rejected, with the reason.
    pub failed: Vec<BulkInviteFailureResponse>,
}

/// Project summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: Uuid,
    /// Owning account.
    pub account_id: Uuid,
    /// Project name.
    pub name: String,
    /// Creating user.
    pub created_by: Uuid,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            account_id: project.account_id,
            name: project.name,
            created_by: project.created_by,
            created_at: project.created_at,
        }
    }
}

/// Project membership summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    /// The project.
    pub project_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// Role held within the project.
    pub role: ProjectRole,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

impl From<ProjectMember> for MemberResponse {
    fn from(member: ProjectMember) -> Self {
        Self {
            project_id: member.project_id,
            user_id: member.user_id,
            role: member.role,
            created_at: member.created_at,
        }
    }
}
