//! Output formatting for the CLI
//!
//! Progress lines go to stdout uncolored. Warnings and the interrupt
//! summary go to stderr and are colored (respects NO_COLOR).

use crate::cli::OutputFormat;
use crate::core::error::Result;
use crate::core::types::IndexSummary;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }
}

/// Format a millisecond duration into a human-readable string
pub fn format_duration(ms: u64) -> String {
    let secs = ms as f64 / 1000.0;
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        format!("{ms}ms")
    }
}

/// One-line account of an interrupted run
pub fn interrupted_summary(summary: &IndexSummary) -> String {
    format!(
        "interrupted after {} files, {} documents committed ({})",
        colors::number(&summary.files_seen.to_string()),
        colors::number(&summary.documents_indexed.to_string()),
        format_duration(summary.duration_ms),
    )
}

/// Print a serializable value in the requested format
pub fn print_output<T: serde::Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        // Human runs only print progress lines
        OutputFormat::Human => {}
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
    }
    Ok(())
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}
