//! File repository implementation.
//!
//! Owns the version-chaining SQL: version numbers are assigned inside the
//! INSERT statement (`MAX(version) + 1`) so the read and the write are one
//! atomic statement, and a UNIQUE constraint on `(file_id, version)` backstops
//! any race two concurrent uploads could still produce.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::file::{FileMetadata, FileVersion};

use super::workspace::is_unique_violation;

/// Repository for file metadata and version rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find file metadata by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<FileMetadata>> {
        sqlx::query_as::<_, FileMetadata>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Find file metadata by its natural key.
    pub async fn find_by_project_and_name(
        &self,
        project_id: i64,
        filename: &str,
    ) -> AppResult<Option<FileMetadata>> {
        sqlx::query_as::<_, FileMetadata>(
            "SELECT * FROM files WHERE project_id = $1 AND filename = $2",
        )
        .bind(project_id)
        .bind(filename)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file by name", e))
    }

    /// Find or create the metadata row for `(project_id, filename)`,
    /// touching `updated_at` when the row already exists.
    ///
    /// The upsert leans on the UNIQUE `(project_id, filename)` constraint,
    /// so two concurrent first uploads of the same name converge on one row.
    pub async fn find_or_create(
        &self,
        project_id: i64,
        filename: &str,
        owner_id: i64,
    ) -> AppResult<FileMetadata> {
        sqlx::query_as::<_, FileMetadata>(
            "INSERT INTO files (project_id, filename, owner_id) VALUES ($1, $2, $3) \
             ON CONFLICT (project_id, filename) DO UPDATE SET updated_at = NOW() \
             RETURNING *",
        )
        .bind(project_id)
        .bind(filename)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert file metadata", e)
        })
    }

    /// List every file in a project.
    pub async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<FileMetadata>> {
        sqlx::query_as::<_, FileMetadata>(
            "SELECT * FROM files WHERE project_id = $1 ORDER BY filename",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Insert the next version for a file.
    ///
    /// The version number is computed as `MAX(version) + 1` within the
    /// INSERT itself (1 when no versions exist). A unique-constraint
    /// violation means another upload won the race; surfaced as Conflict
    /// so the caller can retry.
    pub async fn insert_next_version(
        &self,
        file_id: i64,
        saved_path: &str,
        file_size: i64,
        uploader_id: i64,
    ) -> AppResult<FileVersion> {
        sqlx::query_as::<_, FileVersion>(
            "INSERT INTO file_versions (file_id, version, saved_path, file_size, uploader_id) \
             SELECT $1, COALESCE(MAX(version), 0) + 1, $2, $3, $4 \
             FROM file_versions WHERE file_id = $1 \
             RETURNING *",
        )
        .bind(file_id)
        .bind(saved_path)
        .bind(file_size)
        .bind(uploader_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Concurrent upload produced the same version number, retry")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert file version", e)
            }
        })
    }

    /// The version with the highest number for a file, if any.
    pub async fn latest_version(&self, file_id: i64) -> AppResult<Option<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 ORDER BY version DESC LIMIT 1",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest version", e))
    }

    /// A specific version of a file.
    pub async fn find_version(&self, file_id: i64, version: i32) -> AppResult<Option<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 AND version = $2",
        )
        .bind(file_id)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    /// All versions of a file, most recent first.
    pub async fn list_versions(&self, file_id: i64) -> AppResult<Vec<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 ORDER BY version DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    /// Delete every database row belonging to a file: versions first, then
    /// card attachment links, then the metadata row. Children before parent,
    /// in one transaction — a strict relational store would reject any other
    /// order.
    pub async fn delete_cascade(&self, file_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM file_versions WHERE file_id = $1")
            .bind(file_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file versions", e)
            })?;

        sqlx::query("DELETE FROM card_files WHERE file_id = $1")
            .bind(file_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete card file links", e)
            })?;

        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file metadata", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file delete", e)
        })
    }
}
