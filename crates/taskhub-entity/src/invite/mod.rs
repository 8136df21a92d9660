//! Account invitation domain entities.

pub mod model;
pub mod status;

pub use model::{AccountInvite, CreateAccountInvite};
pub use status::InviteStatus;
