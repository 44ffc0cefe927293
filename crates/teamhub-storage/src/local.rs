//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;
use uuid::Uuid;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_core::traits::storage::{BlobStore, ByteStream};

/// Local filesystem blob store rooted at a fixed upload directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored artifacts.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new blob store rooted at the given path, creating the
    /// directory if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative path to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn write(&self, path: &str, data: Bytes) -> AppResult<u64> {
        let full_path = self.resolve(path);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        // Size is measured from the written artifact, not taken from the
        // caller; client-reported sizes are not trusted.
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat written file: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = meta.len(), "Wrote file");
        Ok(meta.len())
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path);
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open file: {path}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(|b| b.into()))))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {path}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path);
        Ok(full_path.exists())
    }
}

/// Generate a collision-proof physical name for a logical filename.
///
/// The logical name never becomes the physical path; only its extension is
/// preserved so downloads keep a sensible content type.
pub fn unique_blob_name(logical_filename: &str) -> String {
    match extension_of(logical_filename) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

/// The extension of a filename, if it has one.
fn extension_of(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let data = Bytes::from("hello world");
        let written = store.write("ab/cd.txt", data.clone()).await.unwrap();
        assert_eq!(written, data.len() as u64);

        assert!(store.exists("ab/cd.txt").await.unwrap());

        let read_back = store.read_bytes("ab/cd.txt").await.unwrap();
        assert_eq!(read_back, data);

        store.delete("ab/cd.txt").await.unwrap();
        assert!(!store.exists("ab/cd.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        store.delete("never-written.bin").await.unwrap();
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let err = store.read_bytes("nope.pdf").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_unique_name_keeps_extension() {
        let name = unique_blob_name("기획서.pdf");
        assert!(name.ends_with(".pdf"));

        let other = unique_blob_name("기획서.pdf");
        assert_ne!(name, other);
    }

    #[test]
    fn test_unique_name_without_extension() {
        let name = unique_blob_name("Makefile");
        assert!(!name.contains('.'));

        let dotfile = unique_blob_name(".gitignore");
        assert!(!dotfile.ends_with(".gitignore"));
    }
}
