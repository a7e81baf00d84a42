//! Tests for CLI output formatting helpers

use prindex::cli::output::{format_duration, interrupted_summary, print_output};
use prindex::cli::OutputFormat;
use prindex::core::types::{IndexMode, IndexSummary};
use prindex::PrindexError;
use std::collections::HashMap;

#[test]
fn test_format_duration_ranges() {
    assert_eq!(format_duration(0), "0ms");
    assert_eq!(format_duration(999), "999ms");
    assert_eq!(format_duration(1000), "1.00s");
    assert_eq!(format_duration(59_990), "59.99s");
    assert_eq!(format_duration(120_000), "2m 0.0s");
}

#[test]
fn test_interrupted_summary_plain() {
    colored::control::set_override(false);

    let mut summary = IndexSummary::new(IndexMode::CreateOrAppend);
    summary.files_seen = 3;
    summary.documents_indexed = 1;
    summary.duration_ms = 1500;
    summary.cancelled = true;

    assert_eq!(
        interrupted_summary(&summary),
        "interrupted after 3 files, 1 documents committed (1.50s)"
    );
}

#[test]
fn test_summary_serializes_for_json_output() {
    let summary = IndexSummary::new(IndexMode::CreateFresh);

    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["mode"], "create_fresh");
    assert_eq!(json["documents_indexed"], 0);
    assert_eq!(json["cancelled"], false);

    // Smoke test: both formats print without panicking
    print_output(&summary, OutputFormat::Json).unwrap();
    print_output(&summary, OutputFormat::Human).unwrap();
}

#[test]
fn test_unserializable_summary_is_an_error() {
    // JSON object keys must be strings
    let data: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);

    let result = print_output(&data, OutputFormat::Json);

    assert!(matches!(result, Err(PrindexError::SerdeError(_))));
    assert!(print_output(&data, OutputFormat::Human).is_ok());
}
