use async_trait::async_trait;
use lazy_types::LookupResult;

use crate::dictionary::Dictionary;
use crate::error::StorageError;

/// Selection normalization and dictionary lookup for one source language
#[async_trait]
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code)
    fn language_code(&self) -> &str;

    /// Normalize a raw selection into a lookup key
    fn normalize(&self, text: &str) -> String;

    /// Look the selection up, falling back to base forms
    async fn lookup(
        &self,
        dictionary: &Dictionary,
        text: &str,
    ) -> Result<Option<LookupResult>, StorageError>;
}

/// Optional trait for languages with inflection
pub trait Inflector: Send + Sync {
    /// Candidate base forms of an inflected word, most likely first
    fn base_forms(&self, word: &str) -> Vec<InflectionResult>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionResult {
    pub base_form: String,
    pub inflection: String,
}
