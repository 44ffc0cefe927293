//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project inside a workspace. Projects scope the kanban board, files,
/// posts, and the realtime chat/voice rooms.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier. Doubles as the realtime room id.
    pub id: i64,
    /// The parent workspace.
    pub workspace_id: i64,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// The parent workspace.
    pub workspace_id: i64,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
