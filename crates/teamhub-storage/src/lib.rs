//! # teamhub-storage
//!
//! Durable byte storage for uploaded file artifacts. A single
//! local-filesystem implementation of the [`teamhub_core::traits::BlobStore`]
//! trait, plus physical-name generation for collision-proof storage paths.

pub mod local;

pub use local::{LocalBlobStore, unique_blob_name};
