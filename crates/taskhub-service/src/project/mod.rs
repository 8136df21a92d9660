//! Project membership management.

pub mod service;

pub use service::ProjectService;
