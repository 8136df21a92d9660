//! # taskhub-service
//!
//! Business logic service layer for TaskHub. Each service orchestrates
//! repositories and the auth primitives to implement application-level
//! use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod invite;
pub mod notifier;
pub mod project;

pub use account::AccountService;
pub use context::RequestContext;
pub use invite::{BulkInviteOutcome, InviteService};
pub use notifier::{InviteNotifier, LoggingInviteNotifier};
pub use project::ProjectService;
