use std::collections::HashMap;

use lazy_types::{Entry, Sense};

/// Entries keyed by case-folded headword, in first-encounter order
#[derive(Debug, Default)]
pub struct DictionaryRecord {
    entries: Vec<(String, Entry)>,
    index: HashMap<String, usize>,
}

impl DictionaryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Add senses for `headword` under its case-folded key
    pub fn insert(&mut self, headword: &str, senses: Vec<Sense>) {
        let key = headword.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.push_senses(headword, senses),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, Entry::with_form(headword, senses)));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Serialize every entry to its stored JSON form
    pub fn into_serialized(self) -> Result<Vec<(String, String)>, serde_json::Error> {
        self.entries
            .into_iter()
            .map(|(key, entry)| Ok((key, serde_json::to_string(&entry)?)))
            .collect()
    }
}

/// Counters for one import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportContext {
    /// Lines read from the source, including skipped ones
    pub lines_read: u64,
    /// Lines that matched a grammar
    pub lines_parsed: u64,
    /// Keys written to storage
    pub words_committed: usize,
    /// Keys that were merged with an existing stored value
    pub words_merged: usize,
}
