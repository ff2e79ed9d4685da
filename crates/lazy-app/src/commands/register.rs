use std::time::Duration;

use anyhow::Context;
use lazy_core::storage::TRANSLATE_API_URL_KEY;
use lazy_lang_english::ScriptTranslator;

use crate::state::AppState;

/// Verify `url` with a test request and store it
pub async fn register(state: &AppState, url: &str) -> anyhow::Result<()> {
    let timeout = Duration::from_secs(state.config.translator.timeout_seconds);
    let translator = ScriptTranslator::new(url, timeout)?;

    translator
        .verify()
        .await
        .context("register failed, the url or the script parameters may be wrong")?;

    state
        .store
        .set(vec![(TRANSLATE_API_URL_KEY.to_string(), url.to_string())])
        .await?;

    tracing::info!("Registered translation API {url}");
    Ok(())
}

pub async fn run(state: &AppState, url: &str) -> anyhow::Result<()> {
    register(state, url).await?;
    println!("register success!");
    Ok(())
}
