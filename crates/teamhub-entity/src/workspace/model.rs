//! Workspace entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workspace — the team-level container for projects and members.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workspace {
    /// Unique workspace identifier.
    pub id: i64,
    /// Workspace name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The user who created the workspace.
    pub owner_id: i64,
    /// When the workspace was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new workspace.
#[derive(Debug, Clone)]
pub struct CreateWorkspace {
    /// Workspace name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The creating user, who becomes the owner and first admin member.
    pub owner_id: i64,
}
