//! Account registration flows.

pub mod service;

pub use service::{AccountService, InvitedRegistration, Registration};
