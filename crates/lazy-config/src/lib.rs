use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::import::ImportConfig;
use self::storage::StorageConfig;
use self::translator::TranslatorConfig;

pub mod import;
pub mod storage;
pub mod translator;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub import: ImportConfig,
    pub storage: StorageConfig,
    pub translator: TranslatorConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        tracing::info!("Loaded config from {}", path.display());
        config.apply_env();
        Ok(config)
    }

    /// `from_file` when `path` exists, otherwise `new`
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::new())
        }
    }

    fn apply_env(&mut self) {
        self.import.apply_env();
        self.storage.apply_env();
        self.translator.apply_env();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"import": {"batch_size": 10}}"#).unwrap();

        assert_eq!(config.import.batch_size, 10);
        assert_eq!(config.import.chunk_size, 1024 * 1024);
        assert_eq!(config.import.progress_interval, 100_000);
        assert_eq!(config.import.detect_prefix_len, 1000);
        assert!(config.import.encoding.is_none());
        assert!(config.translator.enabled);
        assert_eq!(config.translator.timeout_seconds, 30);
    }

    #[test]
    fn from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.json")).unwrap();
        assert!(config.import.batch_size > 0);
    }
}
