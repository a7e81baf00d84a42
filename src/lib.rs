//! prindex - PageRank-aware HTML corpus indexer
//!
//! Walks a corpus of crawled HTML pages, extracts title, URL, body
//! text and a snippet from each, joins every page with a precomputed
//! PageRank score and writes the result into a Tantivy index, either
//! from scratch or as an in-place update.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - scores (PageRank artifact)
//!   - indexer (walker, extractor, pipeline)
//!   - storage (IndexStore trait, Tantivy)
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - argument parsing, output formatting
//!
//! # Key Features
//!
//! - One unreadable or malformed file never aborts a run
//! - Pages without a score are left out of the index
//! - Incremental mode replaces records by file path
//! - Ctrl-C stops between documents and commits what was written

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{PrindexError, Result};
pub use core::types::*;
