//! Account invitation lifecycle.

pub mod service;

pub use service::{BulkInviteFailure, BulkInviteOutcome, InviteService};
