//! Configuration management for prindex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with defaults matching the classic
//! command-line behaviour for all settings.

use crate::core::error::{PrindexError, Result};
use crate::core::scores::MalformedLinePolicy;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub scores: ScoresConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Snippet end offset cap in characters (not bytes!)
    #[serde(default = "default_snippet_max_chars")]
    pub snippet_max_chars: usize,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// File patterns to include (glob syntax, empty means all)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Index writer heap in MB
    #[serde(default = "default_writer_heap_mb")]
    pub writer_heap_mb: usize,
}

/// Score artifact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoresConfig {
    /// Path to the `<url>:pr:<score>` file
    #[serde(default = "default_scores_path")]
    pub path: PathBuf,

    /// Reject the artifact on a malformed line instead of skipping it
    #[serde(default)]
    pub strict: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Index directory
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

// Default value functions
fn default_snippet_max_chars() -> usize {
    1000
}

fn default_max_file_size() -> usize {
    10
}

fn default_writer_heap_mb() -> usize {
    50
}

fn default_scores_path() -> PathBuf {
    PathBuf::from("pageRankResult.txt")
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("index")
}

/// Tantivy refuses writer heaps below 15MB
const MIN_WRITER_HEAP_MB: usize = 15;

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            snippet_max_chars: default_snippet_max_chars(),
            max_file_size_mb: default_max_file_size(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            writer_heap_mb: default_writer_heap_mb(),
        }
    }
}

impl IndexingConfig {
    pub fn writer_heap_bytes(&self) -> usize {
        self.writer_heap_mb * 1_000_000
    }
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            path: default_scores_path(),
            strict: false,
        }
    }
}

impl ScoresConfig {
    pub fn malformed_policy(&self) -> MalformedLinePolicy {
        if self.strict {
            MalformedLinePolicy::Reject
        } else {
            MalformedLinePolicy::Skip
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PrindexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg, explicit)
    }

    /// Load config with explicit XDG directories
    ///
    /// File priority order:
    /// 1. `explicit` path (the `--config` flag)
    /// 2. PRINDEX_CONFIG env var
    /// 3. XDG config file (~/.config/prindex/config.toml)
    /// 4. ./prindex.toml
    /// 5. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs, explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(config_path) = env::var("PRINDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("prindex.toml").exists() {
                Self::from_file("prindex.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(max_chars) = env::var("PRINDEX_SNIPPET_MAX_CHARS") {
            if let Ok(n) = max_chars.parse() {
                self.indexing.snippet_max_chars = n;
            }
        }
        if let Ok(max_size) = env::var("PRINDEX_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_file_size_mb = size;
            }
        }
        if let Ok(heap) = env::var("PRINDEX_WRITER_HEAP_MB") {
            if let Ok(mb) = heap.parse() {
                self.indexing.writer_heap_mb = mb;
            }
        }

        if let Ok(path) = env::var("PRINDEX_SCORES") {
            self.scores.path = PathBuf::from(path);
        }
        if let Ok(strict) = env::var("PRINDEX_SCORES_STRICT") {
            if let Ok(s) = strict.parse() {
                self.scores.strict = s;
            }
        }

        if let Ok(index_dir) = env::var("PRINDEX_INDEX_DIR") {
            self.storage.index_dir = PathBuf::from(index_dir);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.snippet_max_chars == 0 {
            return Err(PrindexError::ConfigError(
                "Snippet length must be non-zero".to_string(),
            ));
        }

        if self.indexing.max_file_size_mb == 0 {
            return Err(PrindexError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.indexing.writer_heap_mb < MIN_WRITER_HEAP_MB {
            return Err(PrindexError::ConfigError(format!(
                "Writer heap must be at least {MIN_WRITER_HEAP_MB} MB"
            )));
        }

        for pattern in self
            .indexing
            .include_patterns
            .iter()
            .chain(&self.indexing.exclude_patterns)
        {
            glob::Pattern::new(pattern).map_err(|e| {
                PrindexError::ConfigError(format!("Invalid pattern '{pattern}': {e}"))
            })?;
        }

        if self.scores.path.as_os_str().is_empty() {
            return Err(PrindexError::ConfigError(
                "Score artifact path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Snippet max: {} chars", self.indexing.snippet_max_chars);
        tracing::info!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::info!("  Writer heap: {} MB", self.indexing.writer_heap_mb);
        tracing::info!(
            "  Include patterns: {} patterns",
            self.indexing.include_patterns.len()
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
        tracing::info!(
            "  Scores: {:?} (strict: {})",
            self.scores.path,
            self.scores.strict
        );
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
    }
}
