use std::sync::Arc;

use lazy_types::{Entry, WordEntry};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Read side of the imported dictionary
#[derive(Clone)]
pub struct Dictionary {
    store: Arc<dyn KeyValueStore>,
}

impl Dictionary {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Entry stored under the case-folded `key`
    pub async fn lookup_exact(&self, key: &str) -> Result<Option<Entry>, StorageError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&value)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Entry for `key` followed by every entry it cross-references.
    ///
    /// Targets are case-folded like storage keys and fetched once each; missing
    /// targets are skipped.
    pub async fn lookup_with_links(&self, key: &str) -> Result<Vec<WordEntry>, StorageError> {
        let Some(entry) = self.lookup_exact(key).await? else {
            return Ok(Vec::new());
        };

        let mut targets: Vec<String> = Vec::new();
        for target in entry.link_targets() {
            let target = target.to_lowercase();
            if target != key && !targets.contains(&target) {
                targets.push(target);
            }
        }

        let mut results = vec![WordEntry {
            key: key.to_string(),
            entry,
        }];

        for target in targets {
            match self.lookup_exact(&target).await? {
                Some(linked) => results.push(WordEntry {
                    key: target,
                    entry: linked,
                }),
                None => tracing::debug!("Cross-reference {target} not in dictionary"),
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use lazy_types::Sense;

    use super::*;
    use crate::storage::MemoryStore;

    async fn store_with(pairs: &[(&str, &Entry)]) -> Arc<dyn KeyValueStore> {
        let store = MemoryStore::new();
        store
            .set(
                pairs
                    .iter()
                    .map(|(k, e)| (k.to_string(), serde_json::to_string(e).unwrap()))
                    .collect(),
            )
            .await
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn follows_cross_references_once() {
        let bomb = Entry::with_form(
            "A-bomb",
            vec![Sense::new("<→atomic bomb>"), Sense::new("<→atomic bomb>")],
        );
        let atomic = Entry::with_form("atomic bomb", vec![Sense::new("原子爆弾")]);
        let dictionary = Dictionary::new(
            store_with(&[("a-bomb", &bomb), ("atomic bomb", &atomic)]).await,
        );

        let results = dictionary.lookup_with_links("a-bomb").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].key, "a-bomb");
        assert_eq!(results[1].key, "atomic bomb");
        assert_eq!(results[1].entry, atomic);
    }

    #[tokio::test]
    async fn dangling_reference_is_skipped() {
        let entry = Entry::with_form("nuke", vec![Sense::new("<→nothing here>")]);
        let dictionary = Dictionary::new(store_with(&[("nuke", &entry)]).await);

        let results = dictionary.lookup_with_links("nuke").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn non_entry_value_is_corrupt() {
        let store = MemoryStore::new();
        store
            .set(vec![("translate_api_url".to_string(), "https://x".to_string())])
            .await
            .unwrap();
        let dictionary = Dictionary::new(Arc::new(store));

        let err = dictionary.lookup_exact("translate_api_url").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }
}
