use anyhow::Context;
use lazy_dictionary::{ImportSummary, Importer};
use tracing::Instrument;
use uuid::Uuid;

use crate::cli::ImportArgs;
use crate::state::AppState;
use crate::status::{ChannelProgress, spawn_printer};

pub async fn run(state: &AppState, args: ImportArgs) -> anyhow::Result<ImportSummary> {
    let mut config = state.config.import.clone();
    if let Some(encoding) = args.encoding {
        config.encoding = Some(encoding);
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("import", %run_id, file = %args.file.display());

    async {
        let (tx, rx) = kanal::unbounded_async();
        let printer = spawn_printer(rx, state.shutdown.child_token());

        let progress = ChannelProgress::new(tx);
        let result = Importer::new(state.store.as_ref(), config)
            .import_file(&args.file, &progress)
            .await;
        drop(progress);

        match printer.await {
            Ok(printed) => tracing::debug!("Printed {printed} progress lines"),
            Err(e) => tracing::error!("Progress printer panicked: {e}"),
        }

        result.with_context(|| format!("importing {}", args.file.display()))
    }
    .instrument(span)
    .await
}
