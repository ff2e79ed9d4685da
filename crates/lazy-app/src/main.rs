use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod commands;
pub mod profile;
pub mod state;
pub mod status;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = profile::load_config(&cli.config, cli.store)?;
    let state = Arc::new(AppState::open(config).await?);

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = commands::run(Arc::clone(&state), cli.command) => result,
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            state.shutdown.cancel();
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LAZY_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"))
        || !atty::is(atty::Stream::Stderr);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
