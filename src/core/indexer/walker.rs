//! Corpus walker with per-file failure isolation.
//!
//! Lazily traverses a directory tree (or a single file) and yields one
//! [`WalkOutcome`] per file. Files that cannot be read, filtered files
//! and traversal errors come out as `Skipped` items carrying the reason,
//! so one bad file never stops the walk.

use chrono::{DateTime, Utc};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{PrindexError, Result};
use crate::core::types::{RawDocument, SkipReason, WalkOutcome};

/// Corpus walker with optional pattern filtering
#[derive(Debug, Clone)]
pub struct CorpusWalker {
    /// Patterns to include (empty means every file)
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl Default for CorpusWalker {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }
}

impl CorpusWalker {
    /// Create a new corpus walker
    ///
    /// # Arguments
    ///
    /// * `include_patterns` - Glob patterns for files to include
    /// * `exclude_patterns` - Glob patterns for files to exclude
    /// * `max_file_size_mb` - Maximum file size in megabytes
    ///
    /// # Returns
    ///
    /// A new `CorpusWalker` or an error if a pattern is invalid
    pub fn new(
        include_patterns: &[String],
        exclude_patterns: &[String],
        max_file_size_mb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: compile_patterns(include_patterns, "include")?,
            exclude_patterns: compile_patterns(exclude_patterns, "exclude")?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Walk `root`, yielding one outcome per file
    ///
    /// Directory entries are visited in file-name order. Symlinks are
    /// not followed into directories; a link to a file is read through.
    /// The iterator borrows the walker and rescans the filesystem each
    /// time this is called.
    pub fn walk<'a>(&'a self, root: &Path) -> impl Iterator<Item = WalkOutcome> + 'a {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        return None;
                    }
                    if file_type.is_symlink() && points_to_dir(entry.path()) {
                        return None;
                    }
                    Some(self.visit(entry.into_path()))
                }
                Err(e) => {
                    tracing::debug!("Walk error: {}", e);
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    Some(WalkOutcome::Skipped {
                        path,
                        reason: SkipReason::Unreadable(e.to_string()),
                    })
                }
            })
    }

    /// Read one file into a raw document
    fn visit(&self, path: PathBuf) -> WalkOutcome {
        if !self.matches_patterns(&path) {
            return WalkOutcome::Skipped {
                path,
                reason: SkipReason::Excluded,
            };
        }

        // fs::metadata follows links, so dangling links fail here
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                return WalkOutcome::Skipped {
                    path,
                    reason: SkipReason::Unreadable(e.to_string()),
                }
            }
        };

        if metadata.len() > self.max_file_size_bytes {
            tracing::debug!("Skipping large file: {:?} ({} bytes)", path, metadata.len());
            return WalkOutcome::Skipped {
                path,
                reason: SkipReason::TooLarge {
                    bytes: metadata.len(),
                },
            };
        }

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) => {
                return WalkOutcome::Skipped {
                    path,
                    reason: SkipReason::Unreadable(e.to_string()),
                }
            }
        };

        let last_modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        WalkOutcome::Document(RawDocument {
            path,
            content,
            last_modified,
        })
    }

    /// Check if a file path matches the include/exclude patterns
    fn matches_patterns(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|f| f.to_str());

        let matches_include = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| {
                // Match against both full path and file name
                p.matches_path(path) || file_name.map(|f| p.matches(f)).unwrap_or(false)
            });

        matches_include && !self.exclude_patterns.iter().any(|p| p.matches_path(path))
    }
}

fn compile_patterns(patterns: &[String], kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| PrindexError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}")))
        })
        .collect()
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
