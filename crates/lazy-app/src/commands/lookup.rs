use std::fmt::Write;
use std::time::Duration;

use anyhow::Context;
use lazy_core::language::LanguageProcessor;
use lazy_lang_english::{EnglishProcessor, ScriptTranslator};
use lazy_translator::{Translation, Translator};
use lazy_types::LookupResult;

use crate::state::AppState;

#[derive(Debug)]
pub enum Outcome {
    Dictionary(LookupResult),
    Translation(Translation),
    NotFound,
}

/// Dictionary first, then the translation endpoint
pub async fn lookup(state: &AppState, text: &str) -> anyhow::Result<Outcome> {
    let processor = EnglishProcessor::new();
    let dictionary = state.dictionary();

    if let Some(result) = processor.lookup(&dictionary, text).await? {
        return Ok(Outcome::Dictionary(result));
    }

    if !state.config.translator.enabled {
        return Ok(Outcome::NotFound);
    }

    let Some(url) = state.translate_api_url().await? else {
        tracing::info!("No dictionary entry and no translation API registered");
        return Ok(Outcome::NotFound);
    };

    let timeout = Duration::from_secs(state.config.translator.timeout_seconds);
    let translator = ScriptTranslator::new(url, timeout)?;
    let translation = translator
        .translate(&processor.normalize(text))
        .await
        .context("translation failed")?;

    Ok(Outcome::Translation(translation))
}

pub fn render(outcome: &Outcome) -> String {
    let mut out = String::new();

    match outcome {
        Outcome::Dictionary(result) => {
            if let Some(inflection) = &result.inflection {
                let _ = writeln!(out, "{} → {} ({inflection})", result.query, result.matched);
            }
            for word in &result.entries {
                for (form, senses) in word.entry.forms() {
                    let _ = writeln!(out, "{form}");
                    for sense in senses {
                        match &sense.part {
                            Some(part) => {
                                let _ = writeln!(out, "  {{{part}}} {}", sense.mean);
                            }
                            None => {
                                let _ = writeln!(out, "  {}", sense.mean);
                            }
                        }
                    }
                }
            }
        }
        Outcome::Translation(translation) => {
            let _ = writeln!(out, "{}", translation.text);
        }
        Outcome::NotFound => out.push_str("not found\n"),
    }

    out
}

pub async fn run(state: &AppState, text: &[String]) -> anyhow::Result<()> {
    let outcome = lookup(state, &text.join(" ")).await?;
    print!("{}", render(&outcome));
    Ok(())
}
