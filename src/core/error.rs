//! Error types and error handling for prindex.
//!
//! `PrindexError` covers run-level failures only: a bad corpus root,
//! an unusable score artifact, or a store that cannot be opened or
//! committed. Per-document problems never become errors; they are
//! reported as [`SkipReason`](crate::core::types::SkipReason) values.

use thiserror::Error;

/// Result type alias for prindex operations
pub type Result<T> = std::result::Result<T, PrindexError>;

/// Main error type for prindex
#[derive(Error, Debug)]
pub enum PrindexError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Score artifact error: {0}")]
    ScoreArtifact(String),

    #[error("Malformed score record at line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PrindexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Short name of the error class, printed in the ` caught a ...` line
    pub fn kind(&self) -> &'static str {
        match self {
            PrindexError::InvalidPath(_) => "InvalidPath",
            PrindexError::ScoreArtifact(_) => "ScoreArtifact",
            PrindexError::MalformedRecord { .. } => "MalformedRecord",
            PrindexError::StorageError(_) => "StorageError",
            PrindexError::ConfigError(_) => "ConfigError",
            PrindexError::IoError(_) => "IoError",
            PrindexError::SerdeError(_) => "SerdeError",
            PrindexError::TomlError(_) => "TomlError",
        }
    }

    /// Check if this error is raised before any document is processed
    pub fn is_fatal_startup(&self) -> bool {
        matches!(
            self,
            PrindexError::InvalidPath(_)
                | PrindexError::ScoreArtifact(_)
                | PrindexError::MalformedRecord { .. }
                | PrindexError::ConfigError(_)
                | PrindexError::TomlError(_)
        )
    }
}
