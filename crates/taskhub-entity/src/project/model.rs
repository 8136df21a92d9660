//! Project entity model.
//!
//! Projects themselves are business entities owned by other services; this
//! crate carries the minimal shape needed for membership management and
//! the project-role guard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A project within an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// The account this project belongs to.
    pub account_id: Uuid,
    /// Project name.
    pub name: String,
    /// The user who created the project.
    pub created_by: Uuid,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// The owning account.
    pub account_id: Uuid,
    /// Project name.
    pub name: String,
    /// The creating user (auto-added as project owner).
    pub created_by: Uuid,
}
