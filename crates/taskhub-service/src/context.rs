//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_entity::user::AccountRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from verified access token claims and passed
/// into service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email (convenience field from the token claims).
    pub email: String,
    /// The user's account-wide role at token issuance time.
    pub role: AccountRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, role: AccountRole) -> Self {
        Self {
            user_id,
            email,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller may manage account invitations.
    pub fn can_manage_invites(&self) -> bool {
        matches!(self.role, AccountRole::Owner | AccountRole::ProjectManager)
    }
}
