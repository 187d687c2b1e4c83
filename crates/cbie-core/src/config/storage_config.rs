use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
