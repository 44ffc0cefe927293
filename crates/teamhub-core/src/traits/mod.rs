//! Trait seams shared across crates.

pub mod storage;

pub use storage::{BlobStore, ByteStream};
