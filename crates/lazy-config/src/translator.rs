use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Endpoint override; the registered URL in storage is used when unset
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TranslatorConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(url) = env::var("LAZY_TRANSLATE_API_URL") {
            self.api_url = Some(url);
        }
        if let Some(timeout) = env::var("LAZY_TRANSLATE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
