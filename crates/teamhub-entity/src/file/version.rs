//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable record of one physical upload.
///
/// Version numbers start at 1 and only grow; numbers freed by deleting
/// old versions are never reused.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileVersion {
    /// Unique version identifier.
    pub id: i64,
    /// The logical file this version belongs to.
    pub file_id: i64,
    /// Sequential version number, starting at 1.
    pub version: i32,
    /// Path of the physical artifact relative to the upload root.
    pub saved_path: String,
    /// Size in bytes, measured from the written artifact.
    pub file_size: i64,
    /// The user who uploaded this version.
    pub uploader_id: i64,
    /// When this version was uploaded.
    pub created_at: DateTime<Utc>,
}
