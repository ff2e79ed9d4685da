use std::sync::Arc;

use crate::cli::Command;
use crate::state::AppState;

pub mod import;
pub mod lookup;
pub mod register;

pub async fn run(state: Arc<AppState>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Import(args) => {
            let summary = import::run(&state, args).await?;
            tracing::debug!(?summary, "Import summary");
        }
        Command::Lookup { text } => lookup::run(&state, &text).await?,
        Command::RegisterApi { url } => register::run(&state, &url).await?,
    }
    Ok(())
}
