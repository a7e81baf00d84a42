//! Tests for command-line parsing
//!
//! The classic tool took single-dash long flags (`-docs`); clap wants
//! `--docs`. Both spellings must parse to the same arguments.

use clap::{CommandFactory, Parser};
use prindex::cli::{normalize_legacy_args, Cli, OutputFormat};
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(normalize_legacy_args(args.iter().copied()))
}

#[test]
fn test_command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_single_and_double_dash_agree() {
    let legacy = parse(&["prindex", "-index", "idx", "-docs", "crawl", "-update"]);
    let modern = parse(&["prindex", "--index", "idx", "--docs", "crawl", "--update"]);

    assert_eq!(legacy.index, modern.index);
    assert_eq!(legacy.docs, modern.docs);
    assert_eq!(legacy.update, modern.update);
}

#[test]
fn test_defaults() {
    let cli = parse(&["prindex", "-docs", "crawl"]);

    assert_eq!(cli.docs, Some(PathBuf::from("crawl")));
    assert_eq!(cli.index, None);
    assert!(!cli.update);
    assert_eq!(cli.scores, None);
    assert_eq!(cli.snippet_chars, None);
    assert_eq!(cli.format, OutputFormat::Human);
}

#[test]
fn test_scores_and_extension_flags() {
    let cli = parse(&[
        "prindex",
        "-docs",
        "crawl",
        "-scores",
        "ranks.txt",
        "--snippet-chars",
        "200",
        "--format",
        "json",
    ]);

    assert_eq!(cli.scores, Some(PathBuf::from("ranks.txt")));
    assert_eq!(cli.snippet_chars, Some(200));
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_values_that_look_like_flags_are_untouched() {
    let args = normalize_legacy_args(["prindex", "--docs", "-docs-dir"]);

    assert_eq!(args[2], "-docs-dir");
}

#[test]
fn test_unknown_flag_is_rejected() {
    let result = Cli::try_parse_from(normalize_legacy_args(["prindex", "-verbose"]));
    assert!(result.is_err());
}

#[test]
fn test_invalid_format_is_rejected() {
    let result = Cli::try_parse_from(["prindex", "--docs", "d", "--format", "xml"]);
    assert!(result.is_err());
}
