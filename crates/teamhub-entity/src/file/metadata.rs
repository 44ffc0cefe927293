//! Logical file metadata entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The logical identity of an uploaded file within a project.
///
/// `(project_id, filename)` is the natural key used for version chaining;
/// re-uploading the same filename to the same project produces a new
/// [`super::FileVersion`] under this row instead of a new row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileMetadata {
    /// Surrogate primary key.
    pub id: i64,
    /// The owning project.
    pub project_id: i64,
    /// User-visible logical filename.
    pub filename: String,
    /// The user who first uploaded this filename.
    pub owner_id: i64,
    /// When the first version was uploaded.
    pub created_at: DateTime<Utc>,
    /// Touched on every subsequent upload.
    pub updated_at: DateTime<Utc>,
}
