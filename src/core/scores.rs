//! Authority score table.
//!
//! Loads the precomputed PageRank artifact, a UTF-8 text file with one
//! `<url>:pr:<score>` record per line, into an in-memory lookup table.
//! Scores are kept as opaque strings and stored verbatim in the index.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::error::{PrindexError, Result};

/// Separator between key and score in each record
pub const DELIMITER: &str = ":pr:";

/// What to do with a line that has no `:pr:` separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedLinePolicy {
    /// Log a warning and ignore the line
    #[default]
    Skip,

    /// Abort loading with [`PrindexError::MalformedRecord`]
    Reject,
}

/// URL to authority score mapping, read-only once loaded
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    scores: HashMap<String, String>,
    malformed_lines: usize,
}

impl ScoreTable {
    /// Load the score artifact at `path`
    pub fn load(path: &Path, policy: MalformedLinePolicy) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            PrindexError::ScoreArtifact(format!("Failed to read {}: {e}", path.display()))
        })?;
        let text = String::from_utf8(bytes).map_err(|e| {
            PrindexError::ScoreArtifact(format!("{} is not valid UTF-8: {e}", path.display()))
        })?;

        let table = Self::parse(&text, policy)?;
        tracing::info!(
            "Loaded {} scores from {:?} ({} malformed lines skipped)",
            table.len(),
            path,
            table.malformed_lines
        );
        Ok(table)
    }

    /// Parse score records from text
    ///
    /// The first `:pr:`-separated field is the key and the second the
    /// score; anything after a second separator is ignored. Blank lines
    /// are ignored. A repeated key keeps its last score.
    pub fn parse(text: &str, policy: MalformedLinePolicy) -> Result<Self> {
        let mut table = Self::default();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split(DELIMITER);
            match (parts.next(), parts.next()) {
                (Some(key), Some(score)) => {
                    table.scores.insert(key.to_string(), score.to_string());
                }
                _ => match policy {
                    MalformedLinePolicy::Skip => {
                        tracing::warn!("Skipping malformed score line {}: {:?}", idx + 1, line);
                        table.malformed_lines += 1;
                    }
                    MalformedLinePolicy::Reject => {
                        return Err(PrindexError::MalformedRecord {
                            line: idx + 1,
                            content: line.to_string(),
                        });
                    }
                },
            }
        }

        Ok(table)
    }

    /// Score for `url`, if the artifact has one
    pub fn lookup(&self, url: &str) -> Option<&str> {
        self.scores.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of lines ignored for lacking a separator
    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }
}

impl FromIterator<(String, String)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
            malformed_lines: 0,
        }
    }
}
