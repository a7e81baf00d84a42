//! CLI adapter for prindex
//!
//! Parses the classic `-index/-docs/-update` command line, loads
//! configuration and drives [`index_corpus`] on a blocking task while
//! listening for Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//!   +------------------+
//!   |     core/        |
//!   |  (domain logic)  |
//!   +--------+---------+
//!            |
//!            v
//!   +------------------+
//!   |      cli/        |
//!   | (clap adapter)   |
//!   +------------------+
//! ```

pub mod output;

use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::Config;
use crate::core::error::PrindexError;
use crate::core::indexer::{ensure_readable, index_corpus, RunConfig};
use crate::core::types::{IndexMode, IndexSummary};

/// Usage text printed when `-docs` is missing
pub const USAGE: &str = "prindex [-index INDEX_PATH] [-docs DOCS_PATH] [-update]\n\n\
This indexes the documents in DOCS_PATH, creating an index \
in INDEX_PATH that can be searched later";

/// Flags that historically took a single dash
const LEGACY_FLAGS: &[&str] = &["-index", "-docs", "-update", "-scores"];

/// prindex - PageRank-aware HTML corpus indexer
///
/// Indexes crawled HTML pages together with their precomputed PageRank
/// scores. Pages without a score are left out.
#[derive(Parser, Debug)]
#[command(name = "prindex")]
#[command(version)]
#[command(about = "Index crawled HTML pages with their PageRank scores", long_about = None)]
#[command(override_usage = "prindex [-index INDEX_PATH] [-docs DOCS_PATH] [-update]")]
pub struct Cli {
    /// Destination index directory [default: index]
    #[arg(long, value_name = "INDEX_PATH")]
    pub index: Option<PathBuf>,

    /// Corpus root, a directory or a single file
    #[arg(long, value_name = "DOCS_PATH")]
    pub docs: Option<PathBuf>,

    /// Update an existing index instead of rebuilding it
    #[arg(long)]
    pub update: bool,

    /// PageRank artifact with one `<url>:pr:<score>` line per page
    #[arg(long, value_name = "SCORES_PATH")]
    pub scores: Option<PathBuf>,

    /// Snippet end offset cap in characters
    #[arg(long, value_name = "N")]
    pub snippet_chars: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", env = "PRINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Classic progress lines only (default)
    Human,
    /// Progress lines followed by a JSON summary
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Why a CLI run ended without a summary
#[derive(Error, Debug)]
pub enum CliError {
    #[error("missing -docs argument")]
    Usage,

    #[error("Document directory '{0}' does not exist or is not readable, please check the path")]
    UnreadableDocs(String),

    #[error(transparent)]
    Fatal(#[from] PrindexError),

    #[error("indexing task failed: {0}")]
    Task(String),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Print the error the way the classic tool did
    pub fn report(&self) {
        let _ = self.write_report(&mut std::io::stdout(), &mut std::io::stderr());
    }

    /// Write the report to explicit stdout/stderr sinks
    pub fn write_report<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<()> {
        match self {
            CliError::Usage => writeln!(err, "Usage: {USAGE}"),
            CliError::UnreadableDocs(_) => writeln!(out, "{self}"),
            CliError::Fatal(e) => {
                writeln!(out, " caught a {}\n with message: {}", e.kind(), e.message())?;
                if !e.is_fatal_startup() {
                    writeln!(
                        err,
                        "{}: writes from this run were not committed",
                        output::colors::warning("Warning")
                    )?;
                }
                Ok(())
            }
            CliError::Task(_) => writeln!(err, "{}: {self}", output::colors::error("Error")),
        }
    }
}

/// Rewrite single-dash long flags (`-docs`) to clap's `--docs` form
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some(s) if LEGACY_FLAGS.contains(&s) => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

/// Resolve configuration and command-line overrides into a run
pub fn build_run(cli: &Cli) -> Result<RunConfig, CliError> {
    let docs = cli.docs.clone().ok_or(CliError::Usage)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(index) = &cli.index {
        config.storage.index_dir = index.clone();
    }
    if let Some(scores) = &cli.scores {
        config.scores.path = scores.clone();
    }
    if let Some(n) = cli.snippet_chars {
        config.indexing.snippet_max_chars = n;
    }
    config.validate()?;
    config.log_config();

    let mode = if cli.update {
        IndexMode::CreateOrAppend
    } else {
        IndexMode::CreateFresh
    };

    Ok(RunConfig::from_config(&config, docs, mode))
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<IndexSummary, CliError> {
    let run = build_run(&cli)?;

    if ensure_readable(&run.docs_root).is_err() {
        let absolute = std::path::absolute(&run.docs_root).unwrap_or_else(|_| run.docs_root.clone());
        return Err(CliError::UnreadableDocs(absolute.display().to_string()));
    }

    println!("Indexing to directory '{}'...", run.index_dir.display());

    let cancel = Arc::new(AtomicBool::new(false));
    let signal_flag = Arc::clone(&cancel);
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current document");
            signal_flag.store(true, Ordering::Relaxed);
        }
    });

    let result = tokio::task::spawn_blocking(move || {
        index_corpus(&run, &cancel, |op, path| {
            println!("{op} {}", path.display());
        })
    })
    .await;
    signal_task.abort();

    let summary = result.map_err(|e| CliError::Task(e.to_string()))??;

    println!("{} total milliseconds", summary.duration_ms);
    output::print_output(&summary, cli.format)?;

    Ok(summary)
}

/// Install the tracing subscriber used by the binary
///
/// Logs go to stderr so stdout carries only progress lines. The filter
/// comes from `RUST_LOG` (default `prindex=warn`); set
/// `PRINDEX_LOG_FORMAT=json` for JSON lines.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let json = std::env::var("PRINDEX_LOG_FORMAT").is_ok_and(|f| f == "json");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "prindex=warn".into()))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}
