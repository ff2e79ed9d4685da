use std::path::Path;

use lazy_config::import::ImportConfig;
use lazy_core::storage::KeyValueStore;
use lazy_types::ImportEvent;

use crate::builder::DictionaryBuilder;
use crate::committer::BatchCommitter;
use crate::error::ImportError;
use crate::parser::LineParser;
use crate::progress::ProgressSink;
use crate::reader::ChunkReader;
use crate::types::ImportContext;

/// Outcome of a finished import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Distinct keys written by this run
    pub words: usize,
    /// Keys that already had a stored value
    pub merged: usize,
    pub lines_read: u64,
    pub lines_parsed: u64,
    pub encoding: &'static str,
}

/// Drives reader, builder and committer over one dictionary file
pub struct Importer<'s> {
    store: &'s dyn KeyValueStore,
    config: ImportConfig,
    parser: LineParser,
}

impl<'s> Importer<'s> {
    pub fn new(store: &'s dyn KeyValueStore, config: ImportConfig) -> Self {
        Self {
            store,
            config,
            parser: LineParser::new(),
        }
    }

    /// Import `path`; a failure is also reported to `progress` before it is returned
    pub async fn import_file(
        &self,
        path: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<ImportSummary, ImportError> {
        match self.run(path, progress).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::error!("Import of {} failed: {e}", path.display());
                progress.report(ImportEvent::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        path: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<ImportSummary, ImportError> {
        let mut reader = ChunkReader::open(
            path,
            self.config.encoding.as_deref(),
            self.config.chunk_size,
            self.config.detect_prefix_len,
        )
        .await?;
        let encoding = reader.encoding().name();

        tracing::info!(
            "Importing {} ({} bytes, {encoding})",
            path.display(),
            reader.file_size()
        );
        progress.report(ImportEvent::Started {
            path: path.display().to_string(),
            encoding: encoding.to_string(),
        });

        let mut ctx = ImportContext::default();
        let mut builder = DictionaryBuilder::new(&self.parser, self.config.progress_interval);

        while !reader.is_eof() {
            let chunk = reader.next_chunk().await?;
            tracing::debug!(
                "Chunk of {} chars, offset {}/{}",
                chunk.len(),
                reader.offset(),
                reader.file_size()
            );
            builder.ingest(chunk.lines(), &mut ctx, progress);
        }

        let words = builder.record().len();
        tracing::info!(
            "Parsed {} of {} lines into {words} words",
            ctx.lines_parsed,
            ctx.lines_read
        );
        progress.report(ImportEvent::Building { words });

        let pairs = builder.finish()?;
        BatchCommitter::new(self.store, self.config.batch_size)
            .commit(pairs, &mut ctx, progress)
            .await?;

        progress.report(ImportEvent::Completed {
            words: ctx.words_committed,
            lines: ctx.lines_read,
        });
        tracing::info!(
            "Import finished: {} words ({} merged)",
            ctx.words_committed,
            ctx.words_merged
        );

        Ok(ImportSummary {
            words: ctx.words_committed,
            merged: ctx.words_merged,
            lines_read: ctx.lines_read,
            lines_parsed: ctx.lines_parsed,
            encoding,
        })
    }
}
