//! File version manager.
//!
//! Uploads write the physical artifact first, under a generated
//! collision-proof name, then chain a new immutable version row onto the
//! `(project, logical filename)` identity. Deletion runs children before
//! parent: artifacts and version rows, then attachment links, then the
//! metadata row.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_core::traits::storage::{BlobStore, ByteStream};
use teamhub_database::repositories::file::FileRepository;
use teamhub_entity::file::{FileMetadata, FileVersion};

use crate::activity::ActivityService;
use crate::project::ProjectService;

/// A logical file paired with its most recent version, the shape every
/// listing and upload response uses.
#[derive(Debug, Clone)]
pub struct FileWithVersion {
    /// The logical file.
    pub file: FileMetadata,
    /// Its highest-numbered version. Always present for a live file
    /// under correct usage.
    pub latest_version: Option<FileVersion>,
}

/// One entry in a batch upload.
#[derive(Debug, Clone)]
pub struct UploadItem {
    /// The logical filename as the client named it.
    pub filename: String,
    /// The file content.
    pub data: Bytes,
}

/// Governs physical artifact storage and the append-only version history.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<FileRepository>,
    projects: ProjectService,
    store: Arc<dyn BlobStore>,
    activity: ActivityService,
    max_upload_size: u64,
}

impl FileService {
    /// Create a new file service.
    pub fn new(
        files: Arc<FileRepository>,
        projects: ProjectService,
        store: Arc<dyn BlobStore>,
        activity: ActivityService,
        max_upload_size: u64,
    ) -> Self {
        Self {
            files,
            projects,
            store,
            activity,
            max_upload_size,
        }
    }

    /// Store one upload: write the artifact, then chain the next version
    /// onto the file identity.
    ///
    /// Storage failure aborts before any database mutation. If a database
    /// step fails after the artifact was written, the artifact is removed
    /// again on a best-effort basis so no orphaned blobs accumulate.
    pub async fn store(
        &self,
        project_id: i64,
        logical_filename: &str,
        data: Bytes,
        uploader_id: i64,
    ) -> AppResult<FileWithVersion> {
        if logical_filename.is_empty() {
            return Err(AppError::validation("Filename must not be empty"));
        }
        if data.len() as u64 > self.max_upload_size {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size
            )));
        }

        let project = self.projects.require_project(project_id).await?;

        let saved_path = teamhub_storage::unique_blob_name(logical_filename);
        let file_size = self.store.write(&saved_path, data).await? as i64;

        let result = self
            .chain_version(project_id, logical_filename, &saved_path, file_size, uploader_id)
            .await;

        let stored = match result {
            Ok(stored) => stored,
            Err(e) => {
                // A half-done upload must not leak its artifact.
                if let Err(cleanup) = self.store.delete(&saved_path).await {
                    warn!(saved_path, error = %cleanup, "Orphan artifact cleanup failed");
                }
                return Err(e);
            }
        };

        let version = stored
            .latest_version
            .as_ref()
            .map(|v| v.version)
            .unwrap_or(1);
        let action = if version == 1 {
            format!("uploaded file '{logical_filename}'")
        } else {
            format!("updated file '{logical_filename}' to v{version}")
        };
        self.activity
            .log(Some(project.workspace_id), uploader_id, "UPLOAD", &action)
            .await;

        info!(
            project_id,
            file_id = stored.file.id,
            version,
            bytes = file_size,
            "File version stored"
        );
        Ok(stored)
    }

    /// The database half of `store`, separated so the caller can clean up
    /// the already-written artifact when any step fails.
    async fn chain_version(
        &self,
        project_id: i64,
        logical_filename: &str,
        saved_path: &str,
        file_size: i64,
        uploader_id: i64,
    ) -> AppResult<FileWithVersion> {
        let file = self
            .files
            .find_or_create(project_id, logical_filename, uploader_id)
            .await?;

        let version = self
            .files
            .insert_next_version(file.id, saved_path, file_size, uploader_id)
            .await?;

        Ok(FileWithVersion {
            file,
            latest_version: Some(version),
        })
    }

    /// Store a batch of uploads. Each file is an independent unit of
    /// work: one failure is logged and skipped, the files already stored
    /// stay stored, and the remaining files still proceed.
    pub async fn store_batch(
        &self,
        project_id: i64,
        items: Vec<UploadItem>,
        uploader_id: i64,
    ) -> AppResult<Vec<FileWithVersion>> {
        // Fail fast on a dead project before writing anything.
        self.projects.require_project(project_id).await?;

        let mut stored = Vec::with_capacity(items.len());
        for item in items {
            match self
                .store(project_id, &item.filename, item.data, uploader_id)
                .await
            {
                Ok(result) => stored.push(result),
                Err(e) => {
                    warn!(
                        project_id,
                        filename = %item.filename,
                        error = %e,
                        "Batch item failed, continuing"
                    );
                }
            }
        }
        Ok(stored)
    }

    /// List every file in a project with its latest version.
    pub async fn list(&self, project_id: i64) -> AppResult<Vec<FileWithVersion>> {
        self.projects.require_project(project_id).await?;

        let files = self.files.find_by_project(project_id).await?;
        let mut result = Vec::with_capacity(files.len());
        for file in files {
            let latest_version = self.files.latest_version(file.id).await?;
            result.push(FileWithVersion {
                file,
                latest_version,
            });
        }
        Ok(result)
    }

    /// All versions of a file, most recent first.
    pub async fn history(&self, file_id: i64) -> AppResult<Vec<FileVersion>> {
        self.require_file(file_id).await?;
        self.files.list_versions(file_id).await
    }

    /// The highest-numbered version of a file.
    pub async fn latest_version(&self, file_id: i64) -> AppResult<Option<FileVersion>> {
        self.require_file(file_id).await?;
        self.files.latest_version(file_id).await
    }

    /// Open the artifact of a file for download. `version` selects a
    /// specific version; `None` means the latest.
    pub async fn download(
        &self,
        file_id: i64,
        version: Option<i32>,
    ) -> AppResult<(FileMetadata, FileVersion, ByteStream)> {
        let file = self.require_file(file_id).await?;

        let version = match version {
            Some(n) => self
                .files
                .find_version(file_id, n)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Version {n} not found")))?,
            None => self
                .files
                .latest_version(file_id)
                .await?
                .ok_or_else(|| AppError::not_found("File has no versions"))?,
        };

        let stream = self.store.read(&version.saved_path).await?;
        Ok((file, version, stream))
    }

    /// Delete a file: every version's physical artifact (a missing
    /// artifact is logged, not fatal), then all database rows, children
    /// before parent.
    pub async fn delete(&self, file_id: i64, user_id: i64) -> AppResult<()> {
        let file = self.require_file(file_id).await?;
        let project = self.projects.require_project(file.project_id).await?;

        let versions = self.files.list_versions(file_id).await?;
        for version in &versions {
            if let Err(e) = self.store.delete(&version.saved_path).await {
                warn!(
                    file_id,
                    version = version.version,
                    path = %version.saved_path,
                    error = %e,
                    "Artifact delete failed, continuing"
                );
            }
        }

        self.files.delete_cascade(file_id).await?;

        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "DELETE",
                &format!("deleted file '{}'", file.filename),
            )
            .await;

        info!(
            file_id,
            versions = versions.len(),
            "File and version history deleted"
        );
        Ok(())
    }

    /// Fetch file metadata or reject with NotFound.
    pub async fn require_file(&self, file_id: i64) -> AppResult<FileMetadata> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}
