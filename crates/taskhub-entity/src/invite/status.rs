//! Invite status enumeration and its transition table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an account invitation.
///
/// `Pending` is the initial state; `Accepted` and `Revoked` are terminal.
/// `Expired` is semi-terminal: only a resend (which reissues the token and
/// expiry) moves an invite out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invite_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    /// Outstanding and awaiting acceptance.
    Pending,
    /// Accepted by the invited user.
    Accepted,
    /// Lapsed without being accepted.
    Expired,
    /// Withdrawn by an account member.
    Revoked,
}

impl InviteStatus {
    /// The explicit allowed-transition table for the invite state machine.
    ///
    /// Every mutating repository statement carries the matching status
    /// precondition, so a transition that loses a concurrent race observes
    /// zero updated rows and fails instead of clobbering the winner.
    pub fn can_transition(&self, to: InviteStatus) -> bool {
        use InviteStatus::*;
        matches!(
            (self, to),
            (Pending, Accepted)
                | (Pending, Expired)
                | (Pending, Revoked)
                | (Expired, Revoked)
                // Resend reissues token and expiry on the same row.
                | (Pending, Pending)
                | (Expired, Pending)
        )
    }

    /// Whether the invite can still be accepted (subject to its expiry).
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InviteStatus {
    type Err = taskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "expired" => Ok(Self::Expired),
            "revoked" => Ok(Self::Revoked),
            _ => Err(taskhub_core::AppError::validation(format!(
                "Invalid invite status: '{s}'. Expected one of: pending, accepted, expired, revoked"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InviteStatus::*;

    #[test]
    fn accepted_and_revoked_are_terminal() {
        for to in [Pending, Accepted, Expired, Revoked] {
            assert!(!Accepted.can_transition(to));
            assert!(!Revoked.can_transition(to));
        }
    }

    #[test]
    fn expired_only_leaves_via_resend_or_revoke() {
        assert!(Expired.can_transition(Pending));
        assert!(Expired.can_transition(Revoked));
        assert!(!Expired.can_transition(Accepted));
        assert!(!Expired.can_transition(Expired));
    }

    #[test]
    fn pending_reaches_every_other_state() {
        assert!(Pending.can_transition(Accepted));
        assert!(Pending.can_transition(Expired));
        assert!(Pending.can_transition(Revoked));
    }
}
