use std::env;

use serde::{Deserialize, Serialize};

fn default_chunk_size() -> usize {
    1024 * 1024
}

fn default_batch_size() -> usize {
    1000
}

fn default_progress_interval() -> u64 {
    100_000
}

fn default_detect_prefix_len() -> usize {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ImportConfig {
    /// Default read window in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Words per storage write
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Parsed lines between progress reports
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Bytes inspected for encoding detection
    #[serde(default = "default_detect_prefix_len")]
    pub detect_prefix_len: usize,
    /// Explicit encoding label, skips detection when set
    #[serde(default)]
    pub encoding: Option<String>,
}

impl ImportConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Some(chunk_size) = env::var("LAZY_CHUNK_SIZE").ok().and_then(|v| v.parse().ok()) {
            self.chunk_size = chunk_size;
        }
        if let Some(batch_size) = env::var("LAZY_BATCH_SIZE").ok().and_then(|v| v.parse().ok()) {
            self.batch_size = batch_size;
        }
        if let Ok(encoding) = env::var("LAZY_ENCODING") {
            self.encoding = Some(encoding);
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            batch_size: default_batch_size(),
            progress_interval: default_progress_interval(),
            detect_prefix_len: default_detect_prefix_len(),
            encoding: None,
        }
    }
}
