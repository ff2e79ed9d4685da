use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("lazy-translator.db.jsonl")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Append-only key-value log
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl StorageConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(path) = env::var("LAZY_STORAGE_PATH") {
            self.path = PathBuf::from(path);
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
