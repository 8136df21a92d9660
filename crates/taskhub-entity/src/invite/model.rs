//! Account invite entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::AccountRole;

use super::status::InviteStatus;

/// An outstanding or historical invitation into an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountInvite {
    /// Unique invite identifier.
    pub id: Uuid,
    /// Email address the invite was sent to.
    pub email: String,
    /// The account the invitee would join.
    pub account_id: Uuid,
    /// The account-wide role granted on acceptance.
    pub role: AccountRole,
    /// Opaque single-use token; globally unique.
    #[serde(skip_serializing)]
    pub token: String,
    /// Lifecycle state.
    pub status: InviteStatus,
    /// Mirror of `status == Accepted`, kept for list queries.
    pub accepted: bool,
    /// When the invite lapses.
    pub expires_at: DateTime<Utc>,
    /// When the invite was created.
    pub created_at: DateTime<Utc>,
}

impl AccountInvite {
    /// Check whether the expiry timestamp has passed.
    pub fn is_lapsed(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check whether the invite is pending and still within its expiry.
    pub fn is_active(&self) -> bool {
        self.status.is_open() && !self.is_lapsed()
    }

    /// Check whether a resend may reissue this invite.
    ///
    /// Resend only applies to invites that have lapsed: either still marked
    /// pending but past expiry, or already swept to expired.
    pub fn is_renewable(&self) -> bool {
        match self.status {
            InviteStatus::Pending => self.is_lapsed(),
            InviteStatus::Expired => true,
            InviteStatus::Accepted | InviteStatus::Revoked => false,
        }
    }
}

/// Data required to persist a new account invite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountInvite {
    /// Email address being invited.
    pub email: String,
    /// The target account.
    pub account_id: Uuid,
    /// Role granted on acceptance.
    pub role: AccountRole,
    /// Opaque single-use token.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite(status: InviteStatus, expires_at: DateTime<Utc>) -> AccountInvite {
        AccountInvite {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            account_id: Uuid::new_v4(),
            role: AccountRole::Member,
            token: "tok".to_string(),
            status,
            accepted: status == InviteStatus::Accepted,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pending_within_expiry_is_active() {
        let inv = invite(InviteStatus::Pending, Utc::now() + Duration::days(1));
        assert!(inv.is_active());
        assert!(!inv.is_renewable());
    }

    #[test]
    fn lapsed_pending_is_renewable_but_not_active() {
        let inv = invite(InviteStatus::Pending, Utc::now() - Duration::hours(1));
        assert!(!inv.is_active());
        assert!(inv.is_renewable());
    }

    #[test]
    fn accepted_and_revoked_are_never_renewable() {
        let past = Utc::now() - Duration::hours(1);
        assert!(!invite(InviteStatus::Accepted, past).is_renewable());
        assert!(!invite(InviteStatus::Revoked, past).is_renewable());
    }
}
