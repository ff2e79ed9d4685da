use lazy_types::ImportEvent;

/// Receiver of human-readable import progress
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ImportEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ImportEvent) + Send + Sync,
{
    fn report(&self, event: ImportEvent) {
        self(event)
    }
}
