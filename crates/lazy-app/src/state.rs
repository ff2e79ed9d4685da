use std::sync::Arc;

use anyhow::Context;
use lazy_config::Config;
use lazy_core::dictionary::Dictionary;
use lazy_core::storage::{FileStore, KeyValueStore, TRANSLATE_API_URL_KEY};
use tokio_util::sync::CancellationToken;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Open the configured file store
    pub async fn open(config: Config) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.storage.path)
            .await
            .with_context(|| format!("opening store {}", config.storage.path.display()))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config,
            store,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn dictionary(&self) -> Dictionary {
        Dictionary::new(Arc::clone(&self.store))
    }

    /// Configured endpoint, else the registered one
    pub async fn translate_api_url(&self) -> anyhow::Result<Option<String>> {
        if let Some(url) = &self.config.translator.api_url {
            return Ok(Some(url.clone()));
        }
        Ok(self.store.get(TRANSLATE_API_URL_KEY).await?)
    }
}
