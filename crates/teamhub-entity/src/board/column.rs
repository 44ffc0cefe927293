//! Board column entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A kanban column within a project board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BoardColumn {
    /// Unique column identifier.
    pub id: i64,
    /// The project this column belongs to.
    pub project_id: i64,
    /// Column title.
    pub title: String,
    /// Display order within the board.
    pub position: i32,
    /// When the column was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new column.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateColumn {
    /// Column title.
    pub title: String,
    /// Display order within the board.
    #[serde(default)]
    pub position: i32,
}

/// Partial update for a column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateColumn {
    /// New title, if changing.
    pub title: Option<String>,
    /// New display order, if changing.
    pub position: Option<i32>,
}
