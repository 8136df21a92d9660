//! One-time-use rotating refresh token store.

pub mod store;

pub use store::{Redemption, RefreshTokenStore};
