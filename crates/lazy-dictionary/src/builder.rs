use lazy_types::ImportEvent;

use crate::parser::LineParser;
use crate::progress::ProgressSink;
use crate::types::{DictionaryRecord, ImportContext};

/// Accumulates parsed lines into a `DictionaryRecord`
pub struct DictionaryBuilder<'p> {
    parser: &'p LineParser,
    record: DictionaryRecord,
    progress_interval: u64,
}

impl<'p> DictionaryBuilder<'p> {
    pub fn new(parser: &'p LineParser, progress_interval: u64) -> Self {
        Self {
            parser,
            record: DictionaryRecord::new(),
            progress_interval: progress_interval.max(1),
        }
    }

    /// Parse and merge `lines`; lines matching no grammar are skipped
    pub fn ingest<'l>(
        &mut self,
        lines: impl IntoIterator<Item = &'l str>,
        ctx: &mut ImportContext,
        progress: &dyn ProgressSink,
    ) {
        for line in lines {
            ctx.lines_read += 1;

            let Some((headword, senses)) = self.parser.parse(line) else {
                continue;
            };
            self.record.insert(&headword, senses);

            ctx.lines_parsed += 1;
            if ctx.lines_parsed % self.progress_interval == 0 {
                progress.report(ImportEvent::LinesParsed(ctx.lines_parsed));
            }
        }
    }

    pub fn record(&self) -> &DictionaryRecord {
        &self.record
    }

    /// Serialized `(key, value)` pairs in first-encounter order
    pub fn finish(self) -> Result<Vec<(String, String)>, serde_json::Error> {
        tracing::debug!("Serializing {} words", self.record.len());
        self.record.into_serialized()
    }
}
