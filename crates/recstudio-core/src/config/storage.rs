//! Recording storage configuration.

use serde::{Deserialize, Serialize};

/// Recording storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded recordings are persisted.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum upload size in bytes (default 1 GiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GiB
}
