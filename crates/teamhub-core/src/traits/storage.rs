//! Blob store trait for durable file artifact storage.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for the durable byte-stream storage target behind file uploads.
///
/// The trait is defined here in `teamhub-core` and implemented in
/// `teamhub-storage` by the local-filesystem store. Paths are relative
/// to the store's root; the mapping back to logical filenames lives in
/// the file metadata records, never in the physical path.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write bytes to a new file at the given path.
    ///
    /// Returns the number of bytes actually written, which callers must
    /// treat as the authoritative artifact size.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<u64>;

    /// Read a file and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read a file into memory as a complete byte vector.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Delete a file at the given path. Deleting a missing file is a no-op.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
