//! Core domain logic
//!
//! Everything except the command-line adapter lives here.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Document, record and summary types
//! - **xdg**: Config directory resolution
//! - **scores**: Authority score table
//! - **indexer**: Walking, extraction and the indexing pipeline
//! - **storage**: Index store trait and Tantivy implementation

pub mod config;
pub mod error;
pub mod indexer;
pub mod scores;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{PrindexError, Result};
pub use scores::ScoreTable;
