use std::path::{Path, PathBuf};

use anyhow::Context;
use lazy_config::Config;

/// Load the config file (or defaults) and apply command-line overrides
pub fn load_config(path: &Path, store: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path)
        .with_context(|| format!("loading config {}", path.display()))?;

    if let Some(store) = store {
        tracing::debug!("Store path overridden: {}", store.display());
        config.storage.path = store;
    }

    Ok(config)
}
