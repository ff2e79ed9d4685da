use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tokio::sync::{Mutex, RwLock};

use crate::error::StorageError;

/// Storage key holding the registered translation endpoint
pub const TRANSLATE_API_URL_KEY: &str = "translate_api_url";

/// Key-value storage addressed by case-folded headword
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every pair; later pairs win on duplicate keys
    async fn set(&self, items: Vec<(String, String)>) -> Result<(), StorageError>;

    /// Number of stored keys
    async fn len(&self) -> usize;
}

/// In-memory store, used as a fake in tests
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all pairs, for comparing final states
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, items: Vec<(String, String)>) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.extend(items);
        Ok(())
    }

    async fn len(&self) -> usize {
        self.data.read().await.len()
    }
}

#[derive(Serialize)]
struct LogRecordRef<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Deserialize)]
struct LogRecord {
    key: String,
    value: String,
}

/// Append-only JSON-lines log, replayed into memory on open.
///
/// Each `set` appends one line per pair and flushes before updating the index.
pub struct FileStore {
    path: PathBuf,
    data: RwLock<HashMap<String, String>>,
    log: Mutex<File>,
}

impl FileStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let data = Self::replay(&path).await?;

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        if Self::has_partial_tail(&path).await? {
            log.write_all(b"\n").await?;
            log.flush().await?;
        }

        tracing::info!("Opened store {} ({} keys)", path.display(), data.len());

        Ok(Self {
            path,
            data: RwLock::new(data),
            log: Mutex::new(log),
        })
    }

    async fn has_partial_tail(path: &Path) -> Result<bool, StorageError> {
        let mut file = File::open(path).await?;
        let len = file.metadata().await?.len();
        if len == 0 {
            return Ok(false);
        }
        file.seek(std::io::SeekFrom::Start(len - 1)).await?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).await?;
        Ok(last[0] != b'\n')
    }

    async fn replay(path: &Path) -> Result<HashMap<String, String>, StorageError> {
        let mut data = HashMap::new();

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(data),
            Err(e) => return Err(e.into()),
        };

        let mut lines = BufReader::new(file).lines();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<LogRecord>(&line) {
                Ok(record) => {
                    data.insert(record.key, record.value);
                }
                // An interrupted append leaves a partial last line
                Err(e) => tracing::warn!("Skipping unreadable record at line {line_no}: {e}"),
            }
        }

        Ok(data)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, items: Vec<(String, String)>) -> Result<(), StorageError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut buf = String::new();
        for (key, value) in &items {
            buf.push_str(&serde_json::to_string(&LogRecordRef { key, value })?);
            buf.push('\n');
        }

        {
            let mut log = self.log.lock().await;
            log.write_all(buf.as_bytes()).await?;
            log.flush().await?;
        }

        tracing::debug!("Appended {} records to {}", items.len(), self.path.display());

        let mut data = self.data.write().await;
        data.extend(items);
        Ok(())
    }

    async fn len(&self) -> usize {
        self.data.read().await.len()
    }
}
