use kanal::{AsyncReceiver, AsyncSender};
use lazy_dictionary::ProgressSink;
use lazy_types::ImportEvent;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Forwards import progress to the printer task
pub struct ChannelProgress {
    tx: AsyncSender<ImportEvent>,
}

impl ChannelProgress {
    pub fn new(tx: AsyncSender<ImportEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, event: ImportEvent) {
        // Unbounded, never blocks
        if let Err(e) = self.tx.try_send(event) {
            tracing::warn!("Dropped progress event: {e}");
        }
    }
}

/// Print progress lines until every sender is gone or `cancel` fires.
///
/// Resolves to the number of lines printed.
pub fn spawn_printer(
    rx: AsyncReceiver<ImportEvent>,
    cancel: CancellationToken,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut printed = 0;
        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Ok(event) => {
                        println!("{event}");
                        printed += 1;
                    }
                    Err(_) => break,
                },
                _ = cancel.cancelled() => {
                    tracing::info!("Progress printer stopping");
                    break;
                }
            }
        }
        printed
    })
}
