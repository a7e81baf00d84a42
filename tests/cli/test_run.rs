//! End-to-end CLI runs against temp corpora

use crate::common::{stored_records, TestCorpus};
use clap::Parser;
use prindex::cli::{normalize_legacy_args, run, Cli, CliError};
use prindex::core::storage::count_documents;
use prindex::core::types::IndexMode;
use prindex::PrindexError;
use serial_test::serial;
use std::path::Path;

/// Write a config file next to the corpus so host config never leaks in
fn write_config(corpus: &TestCorpus, body: &str) -> String {
    let path = corpus.path().join("prindex.toml");
    std::fs::write(&path, format!("[indexing]\nwriter_heap_mb = 20\n{body}")).unwrap();
    path.display().to_string()
}

fn cli(corpus: &TestCorpus, extra: &[&str]) -> Cli {
    let config = write_config(corpus, "");
    let index = corpus.index().display().to_string();
    let docs = corpus.docs().display().to_string();
    let scores = corpus.scores().display().to_string();

    let mut args = vec![
        "prindex",
        "-index",
        index.as_str(),
        "-docs",
        docs.as_str(),
        "-scores",
        scores.as_str(),
        "--config",
        config.as_str(),
    ];
    args.extend_from_slice(extra);
    Cli::parse_from(normalize_legacy_args(args))
}

#[tokio::test]
#[serial]
async fn test_run_creates_index() {
    let corpus = TestCorpus::small();

    let summary = run(cli(&corpus, &[])).await.unwrap();

    assert_eq!(summary.mode, IndexMode::CreateFresh);
    assert_eq!(summary.documents_indexed, 2);
    assert!(!summary.cancelled);
    assert_eq!(count_documents(&corpus.index()).unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_run_update_mode() {
    let corpus = TestCorpus::small();
    run(cli(&corpus, &[])).await.unwrap();

    let summary = run(cli(&corpus, &["-update"])).await.unwrap();

    assert_eq!(summary.mode, IndexMode::CreateOrAppend);
    assert_eq!(count_documents(&corpus.index()).unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_run_json_format() {
    let corpus = TestCorpus::small();

    let summary = run(cli(&corpus, &["--format", "json"])).await.unwrap();

    assert_eq!(summary.documents_indexed, 2);
}

#[tokio::test]
#[serial]
async fn test_snippet_flag_overrides_config() {
    let corpus = TestCorpus::small();

    run(cli(&corpus, &["--snippet-chars", "20"])).await.unwrap();

    // url "http://x/a" + title "A" puts the start at 11
    for record in stored_records(&corpus.index()) {
        assert_eq!(record.snippet.chars().count(), 9);
    }
}

#[tokio::test]
#[serial]
async fn test_missing_docs_argument_is_usage_error() {
    let corpus = TestCorpus::small();
    let config = write_config(&corpus, "");

    let cli = Cli::parse_from(["prindex", "--config", config.as_str()]);
    let err = run(cli).await.unwrap_err();

    assert!(matches!(err, CliError::Usage));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
#[serial]
async fn test_unreadable_docs_reports_absolute_path() {
    let corpus = TestCorpus::small();
    let config = write_config(&corpus, "");
    let missing = corpus.path().join("no-such-dir");
    let missing_str = missing.display().to_string();

    let cli = Cli::parse_from(normalize_legacy_args([
        "prindex",
        "-docs",
        missing_str.as_str(),
        "--config",
        config.as_str(),
    ]));
    let err = run(cli).await.unwrap_err();

    match &err {
        CliError::UnreadableDocs(path) => assert_eq!(Path::new(path), missing),
        other => panic!("expected UnreadableDocs, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Document directory '"));
}

#[tokio::test]
#[serial]
async fn test_missing_scores_is_fatal() {
    let corpus = TestCorpus::small();
    std::fs::remove_file(corpus.scores()).unwrap();

    let err = run(cli(&corpus, &[])).await.unwrap_err();

    match err {
        CliError::Fatal(e) => {
            assert!(matches!(e, PrindexError::ScoreArtifact(_)));
            assert_eq!(e.kind(), "ScoreArtifact");
        }
        other => panic!("expected Fatal, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn test_invalid_config_is_fatal() {
    let corpus = TestCorpus::small();
    let config = write_config(&corpus, "snippet_max_chars = 0\n");
    let docs = corpus.docs().display().to_string();

    let cli = Cli::parse_from(normalize_legacy_args([
        "prindex",
        "-docs",
        docs.as_str(),
        "--config",
        config.as_str(),
    ]));
    let err = run(cli).await.unwrap_err();

    assert!(matches!(
        err,
        CliError::Fatal(PrindexError::ConfigError(_))
    ));
}

#[tokio::test]
#[serial]
async fn test_index_path_on_regular_file_reports_storage_error() {
    let corpus = TestCorpus::small();
    std::fs::write(corpus.index(), "not an index").unwrap();

    let err = run(cli(&corpus, &[])).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Fatal(PrindexError::StorageError(_))
    ));

    colored::control::set_override(false);
    let (mut out, mut diag) = (Vec::new(), Vec::new());
    err.write_report(&mut out, &mut diag).unwrap();
    let out = String::from_utf8(out).unwrap();
    let diag = String::from_utf8(diag).unwrap();

    assert!(
        out.starts_with(" caught a StorageError\n with message: Storage error: "),
        "unexpected report: {out}"
    );
    assert!(out.contains("Failed to create index directory"));
    assert_eq!(diag, "Warning: writes from this run were not committed\n");
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_report_streams() {
    let (mut out, mut diag) = (Vec::new(), Vec::new());
    CliError::Usage.write_report(&mut out, &mut diag).unwrap();
    assert!(out.is_empty());
    assert!(String::from_utf8(diag).unwrap().starts_with("Usage: prindex [-index INDEX_PATH]"));

    let (mut out, mut diag) = (Vec::new(), Vec::new());
    CliError::UnreadableDocs("/data/crawl".to_string())
        .write_report(&mut out, &mut diag)
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Document directory '/data/crawl' does not exist or is not readable, \
         please check the path\n"
    );
    assert!(diag.is_empty());
}
