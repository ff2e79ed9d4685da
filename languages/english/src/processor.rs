use async_trait::async_trait;
use lazy_core::dictionary::Dictionary;
use lazy_core::error::StorageError;
use lazy_core::language::{InflectionResult, Inflector, LanguageProcessor};
use lazy_core::preprocess::{DefaultPreprocessor, Preprocessor};
use lazy_types::LookupResult;

use crate::singularizer::Singularizer;
use crate::stemmer::PorterStemmer;

/// English language processor
pub struct EnglishProcessor {
    preprocessor: DefaultPreprocessor,
    singularizer: Singularizer,
    stemmer: PorterStemmer,
}

impl EnglishProcessor {
    pub fn new() -> Self {
        Self {
            preprocessor: DefaultPreprocessor,
            singularizer: Singularizer::new(),
            stemmer: PorterStemmer::new(),
        }
    }
}

impl Default for EnglishProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Inflector for EnglishProcessor {
    fn base_forms(&self, word: &str) -> Vec<InflectionResult> {
        let mut results: Vec<InflectionResult> = Vec::new();

        let singular = self.singularizer.singular(word);
        if singular != word {
            results.push(InflectionResult {
                base_form: singular,
                inflection: "singular".to_string(),
            });
        }

        let stem = self.stemmer.stem(word);
        if stem != word && results.iter().all(|r| r.base_form != stem) {
            results.push(InflectionResult {
                base_form: stem,
                inflection: "stem".to_string(),
            });
        }

        results
    }
}

#[async_trait]
impl LanguageProcessor for EnglishProcessor {
    fn language_code(&self) -> &str {
        "en"
    }

    fn normalize(&self, text: &str) -> String {
        self.preprocessor.process(text)
    }

    async fn lookup(
        &self,
        dictionary: &Dictionary,
        text: &str,
    ) -> Result<Option<LookupResult>, StorageError> {
        let query = self.normalize(text);
        if query.is_empty() {
            return Ok(None);
        }

        // Try direct lookup first
        let entries = dictionary.lookup_with_links(&query).await?;
        if !entries.is_empty() {
            return Ok(Some(LookupResult {
                matched: query.clone(),
                query,
                inflection: None,
                entries,
            }));
        }

        for base in self.base_forms(&query) {
            let entries = dictionary.lookup_with_links(&base.base_form).await?;
            if !entries.is_empty() {
                tracing::debug!("{query} found as {} ({})", base.base_form, base.inflection);
                return Ok(Some(LookupResult {
                    query,
                    matched: base.base_form,
                    inflection: Some(base.inflection),
                    entries,
                }));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lazy_core::storage::{KeyValueStore, MemoryStore};
    use lazy_types::{Entry, Sense};

    use super::*;

    async fn dictionary(words: &[(&str, &str)]) -> Dictionary {
        let store = MemoryStore::new();
        store
            .set(
                words
                    .iter()
                    .map(|(form, mean)| {
                        let entry = Entry::with_form(*form, vec![Sense::new(*mean)]);
                        (form.to_lowercase(), serde_json::to_string(&entry).unwrap())
                    })
                    .collect(),
            )
            .await
            .unwrap();
        Dictionary::new(Arc::new(store))
    }

    #[test]
    fn base_forms_are_ordered() {
        let processor = EnglishProcessor::new();

        let forms = processor.base_forms("running");
        assert_eq!(
            forms,
            vec![InflectionResult {
                base_form: "run".to_string(),
                inflection: "stem".to_string(),
            }]
        );

        let forms = processor.base_forms("cities");
        assert_eq!(forms[0].base_form, "city");
        assert_eq!(forms[0].inflection, "singular");
    }

    #[tokio::test]
    async fn exact_match_wins() {
        let dictionary = dictionary(&[("Apples", "りんごたち"), ("apple", "りんご")]).await;
        let result = EnglishProcessor::new()
            .lookup(&dictionary, "  Apples\n")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.query, "apples");
        assert_eq!(result.matched, "apples");
        assert_eq!(result.inflection, None);
    }

    #[tokio::test]
    async fn falls_back_to_singular_then_stem() {
        let dictionary = dictionary(&[("apple", "りんご"), ("run", "走る")]).await;
        let processor = EnglishProcessor::new();

        let result = processor.lookup(&dictionary, "apples").await.unwrap().unwrap();
        assert_eq!(result.matched, "apple");
        assert_eq!(result.inflection.as_deref(), Some("singular"));

        let result = processor.lookup(&dictionary, "running").await.unwrap().unwrap();
        assert_eq!(result.matched, "run");
        assert_eq!(result.inflection.as_deref(), Some("stem"));
    }

    #[tokio::test]
    async fn miss_and_blank_selection() {
        let dictionary = dictionary(&[("apple", "りんご")]).await;
        let processor = EnglishProcessor::new();

        assert!(processor.lookup(&dictionary, "zzz").await.unwrap().is_none());
        assert!(processor.lookup(&dictionary, "   ").await.unwrap().is_none());
    }
}
