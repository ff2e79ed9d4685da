use std::io::Write;

use lazy_config::Config;
use lazy_core::storage::{KeyValueStore, TRANSLATE_API_URL_KEY};

use super::{memory_state, serve_json_once};
use crate::cli::ImportArgs;
use crate::commands::lookup::{Outcome, lookup, render};
use crate::commands::{import, register};

fn dump(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn import_then_lookup_follows_links() {
    let (_store, state) = memory_state(Config::default());
    let file = dump("■A-bomb : →atomic bomb\n■atomic bomb  {名} : 原子爆弾\n");

    let summary = import::run(
        &state,
        ImportArgs {
            file: file.path().to_path_buf(),
            encoding: None,
            batch_size: Some(1),
            chunk_size: Some(8),
        },
    )
    .await
    .unwrap();
    assert_eq!(summary.words, 2);

    let outcome = lookup(&state, "A-bomb").await.unwrap();
    let Outcome::Dictionary(result) = &outcome else {
        panic!("expected a dictionary hit, got {outcome:?}");
    };
    assert_eq!(result.entries.len(), 2);
    assert_eq!(
        render(&outcome),
        "A-bomb\n  <→atomic bomb>\natomic bomb\n  {名} 原子爆弾\n"
    );
}

#[tokio::test]
async fn import_reports_bad_encoding_label() {
    let (_store, state) = memory_state(Config::default());
    let file = dump("■a : b\n");

    let err = import::run(
        &state,
        ImportArgs {
            file: file.path().to_path_buf(),
            encoding: Some("klingon".to_string()),
            batch_size: None,
            chunk_size: None,
        },
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("klingon"));
}

#[tokio::test]
async fn miss_without_registration_is_not_found() {
    let (_store, state) = memory_state(Config::default());

    let outcome = lookup(&state, "unknown").await.unwrap();
    assert!(matches!(outcome, Outcome::NotFound));
    assert_eq!(render(&outcome), "not found\n");
}

#[tokio::test]
async fn registered_endpoint_translates_misses() {
    let (store, state) = memory_state(Config::default());

    let url = serve_json_once(r#"{"result":"テスト"}"#).await;
    register::register(&state, &url).await.unwrap();
    assert_eq!(
        store.get(TRANSLATE_API_URL_KEY).await.unwrap().as_deref(),
        Some(url.as_str())
    );

    // the endpoint serves one request, so point the store at a fresh one
    let url = serve_json_once(r#"{"result":"見つからない言葉"}"#).await;
    store
        .set(vec![(TRANSLATE_API_URL_KEY.to_string(), url)])
        .await
        .unwrap();

    let outcome = lookup(&state, "missing words").await.unwrap();
    let Outcome::Translation(translation) = &outcome else {
        panic!("expected a translation, got {outcome:?}");
    };
    assert_eq!(translation.text, "見つからない言葉");
}

#[tokio::test]
async fn falsy_result_fails_registration() {
    let (store, state) = memory_state(Config::default());

    let url = serve_json_once(r#"{"result":""}"#).await;
    assert!(register::register(&state, &url).await.is_err());
    assert_eq!(store.get(TRANSLATE_API_URL_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn translation_sends_normalized_selection() {
    let (store, state) = memory_state(Config::default());
    let url = serve_json_once(r#"{"result":"見つからない言葉"}"#).await;
    store
        .set(vec![(TRANSLATE_API_URL_KEY.to_string(), url)])
        .await
        .unwrap();

    let outcome = lookup(&state, "  Missing\nWords ").await.unwrap();
    let Outcome::Translation(translation) = &outcome else {
        panic!("expected a translation, got {outcome:?}");
    };
    assert_eq!(translation.source, "missing words");
}
