use lazy_core::storage::KeyValueStore;
use lazy_types::{Entry, ImportEvent};

use crate::error::ImportError;
use crate::progress::ProgressSink;
use crate::types::ImportContext;

/// Writes serialized entries to storage in batches, merging with stored values
pub struct BatchCommitter<'s> {
    store: &'s dyn KeyValueStore,
    batch_size: usize,
}

impl<'s> BatchCommitter<'s> {
    pub fn new(store: &'s dyn KeyValueStore, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub async fn commit(
        &self,
        pairs: Vec<(String, String)>,
        ctx: &mut ImportContext,
        progress: &dyn ProgressSink,
    ) -> Result<(), ImportError> {
        let mut batch = Vec::with_capacity(self.batch_size);

        for pair in pairs {
            batch.push(pair);
            if batch.len() >= self.batch_size {
                self.flush(std::mem::take(&mut batch), ctx, progress).await?;
            }
        }

        if !batch.is_empty() {
            self.flush(batch, ctx, progress).await?;
        }

        Ok(())
    }

    async fn flush(
        &self,
        batch: Vec<(String, String)>,
        ctx: &mut ImportContext,
        progress: &dyn ProgressSink,
    ) -> Result<(), ImportError> {
        let mut items = Vec::with_capacity(batch.len());

        for (key, value) in batch {
            match self.store.get(&key).await? {
                Some(existing) => {
                    let merged = merge_values(&key, &existing, &value)?;
                    ctx.words_merged += 1;
                    items.push((key, merged));
                }
                None => items.push((key, value)),
            }
        }

        let count = items.len();
        self.store.set(items).await?;
        ctx.words_committed += count;

        tracing::debug!(
            "Committed batch of {count} ({} total)",
            ctx.words_committed
        );
        progress.report(ImportEvent::BatchCommitted {
            processed: ctx.words_committed,
        });

        Ok(())
    }
}

/// Stored senses first, incoming appended
fn merge_values(key: &str, existing: &str, incoming: &str) -> Result<String, ImportError> {
    let incoming: Entry = serde_json::from_str(incoming)?;

    let mut stored: Entry = match serde_json::from_str(existing) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Overwriting unreadable stored value for {key}: {e}");
            return Ok(serde_json::to_string(&incoming)?);
        }
    };

    stored.merge(incoming);
    Ok(serde_json::to_string(&stored)?)
}
