//! Authorization guard decisions.
//!
//! Both guards are pure functions over the caller's claims, the
//! requirement declared at route registration, and (for the project
//! guard) the caller's resolved project membership. No mutation.

pub mod account;
pub mod project;

pub use account::AccountRoleSet;
pub use project::{ProjectRequirement, ProjectRoleSet};
