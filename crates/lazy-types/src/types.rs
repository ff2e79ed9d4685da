use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opening of a cross-reference marker, e.g. `<→atomic bomb>`
pub const LINK_OPEN: &str = "<→";

/// One definition of a word, optionally tagged with a part of speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    pub mean: String,
}

impl Sense {
    pub fn new(mean: impl Into<String>) -> Self {
        Self {
            part: None,
            mean: mean.into(),
        }
    }

    pub fn with_part(part: impl Into<String>, mean: impl Into<String>) -> Self {
        Self {
            part: Some(part.into()),
            mean: mean.into(),
        }
    }

    /// Target of the first `<→TARGET>` marker in `mean`.
    ///
    /// Greedy: the target runs to the last `>` of the meaning.
    pub fn link_target(&self) -> Option<&str> {
        let mut search_from = 0;
        while let Some(found) = self.mean[search_from..].find(LINK_OPEN) {
            let start = search_from + found + LINK_OPEN.len();
            if let Some(end) = self.mean[start..].rfind('>') {
                if end > 0 {
                    return Some(&self.mean[start..start + end]);
                }
            }
            search_from = start;
        }
        None
    }
}

/// Senses grouped by display form (case-preserving), in encounter order.
///
/// Serialized as a JSON object `{"AA": [...], "aA": [...]}`. Display forms are plain
/// strings, so names like `constructor` are ordinary keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    forms: Vec<(String, Vec<Sense>)>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: impl Into<String>, senses: Vec<Sense>) -> Self {
        Self {
            forms: vec![(form.into(), senses)],
        }
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn senses(&self, form: &str) -> Option<&[Sense]> {
        self.forms
            .iter()
            .find(|(f, _)| f == form)
            .map(|(_, senses)| senses.as_slice())
    }

    pub fn forms(&self) -> impl Iterator<Item = (&str, &[Sense])> {
        self.forms
            .iter()
            .map(|(form, senses)| (form.as_str(), senses.as_slice()))
    }

    /// Append senses to `form`, adding the form when it is new
    pub fn push_senses(&mut self, form: &str, senses: Vec<Sense>) {
        match self.forms.iter_mut().find(|(f, _)| f == form) {
            Some((_, existing)) => existing.extend(senses),
            None => self.forms.push((form.to_string(), senses)),
        }
    }

    /// Shallow union of display forms; shared forms get `other`'s senses appended.
    /// Identical senses are kept twice.
    pub fn merge(&mut self, other: Entry) {
        for (form, senses) in other.forms {
            self.push_senses(&form, senses);
        }
    }

    /// Cross-reference targets of every sense, without duplicates
    pub fn link_targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        for (_, senses) in &self.forms {
            for target in senses.iter().filter_map(Sense::link_target) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.forms.len()))?;
        for (form, senses) in &self.forms {
            map.serialize_entry(form, senses)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = Entry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of display forms to senses")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Entry, A::Error> {
                let mut entry = Entry::new();
                while let Some((form, senses)) = access.next_entry::<String, Vec<Sense>>()? {
                    entry.push_senses(&form, senses);
                }
                Ok(entry)
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// One stored dictionary word: storage key plus its entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub key: String,
    pub entry: Entry,
}

/// Result of a dictionary lookup for a selection
#[derive(Debug, Clone)]
pub struct LookupResult {
    /// Normalized selection
    pub query: String,
    /// Key that produced the hit (differs from `query` after inflection)
    pub matched: String,
    /// Inflection rule used to reach `matched`, if any
    pub inflection: Option<String>,
    /// Primary entry first, then cross-referenced entries
    pub entries: Vec<WordEntry>,
}

/// Import progress checkpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Started { path: String, encoding: String },
    LinesParsed(u64),
    Building { words: usize },
    BatchCommitted { processed: usize },
    Completed { words: usize, lines: u64 },
    Failed(String),
}

impl fmt::Display for ImportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportEvent::Started { path, encoding } => {
                write!(f, "processing {path} ({encoding})...")
            }
            ImportEvent::LinesParsed(lines) => write!(f, "building data... {lines} rows processed"),
            ImportEvent::Building { words } => write!(f, "registering {words} words..."),
            ImportEvent::BatchCommitted { processed } => {
                write!(f, "registering... {processed} words registered")
            }
            ImportEvent::Completed { words, lines } => {
                write!(f, "completed! {words} words registered from {lines} rows")
            }
            ImportEvent::Failed(reason) => write!(f, "error occurred: {reason}"),
        }
    }
}
