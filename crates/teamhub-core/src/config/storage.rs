//! Storage configuration.

use serde::{Deserialize, Serialize};

/// File storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded file artifacts.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Root directory for profile images.
    #[serde(default = "default_image_root")]
    pub image_root: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
            image_root: default_image_root(),
            max_upload_size_bytes: default_max_upload_size(),
        }
    }
}

fn default_upload_root() -> String {
    "data/uploads".to_string()
}

fn default_image_root() -> String {
    "data/images".to_string()
}

fn default_max_upload_size() -> u64 {
    // 100 MiB
    100 * 1024 * 1024
}
