//! prindex - index crawled HTML pages with their PageRank scores
//!
//! # Examples
//!
//! ```bash
//! # Build a fresh index from a crawl
//! prindex -index index -docs crawl/ -scores pageRankResult.txt
//!
//! # Add or replace pages in an existing index
//! prindex -index index -docs crawl/new-pages -update
//! ```

use clap::Parser;
use prindex::cli::{init_tracing, normalize_legacy_args, output, run, Cli};

/// Exit status after an interrupted run (128 + SIGINT)
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));

    match run(cli).await {
        Ok(summary) if summary.cancelled => {
            output::print_warning(&output::interrupted_summary(&summary));
            std::process::exit(EXIT_INTERRUPTED);
        }
        Ok(_) => {}
        Err(e) => {
            e.report();
            std::process::exit(e.exit_code());
        }
    }
}
