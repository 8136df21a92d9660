//! # taskhub-entity
//!
//! Domain entity models for TaskHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod account;
pub mod invite;
pub mod project;
pub mod refresh_token;
pub mod user;
