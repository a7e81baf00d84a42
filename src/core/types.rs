//! Core data types for prindex.
//!
//! Documents move through three shapes: a [`RawDocument`] read from
//! disk, an [`ExtractedDocument`] holding the parsed fields, and an
//! [`IndexRecord`] joined with its authority score and ready to be
//! written to the index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A file discovered by the corpus walker
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Source file path (document identity)
    pub path: PathBuf,

    /// Raw file bytes
    pub content: Vec<u8>,

    /// Last modification time of the file
    pub last_modified: DateTime<Utc>,
}

impl RawDocument {
    /// Last modification time in milliseconds since the epoch
    pub fn modified_millis(&self) -> i64 {
        self.last_modified.timestamp_millis()
    }
}

/// Fields extracted from one HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Text of the first `<title>` element (may be empty)
    pub title: String,

    /// Text of the first `<url>` element, the score-table join key
    pub url: String,

    /// Whitespace-normalised rendered text of the whole document
    pub body_text: String,

    /// Bounded preview taken from `body_text`
    pub snippet: String,

    /// File contents decoded as UTF-8 (lossy), used for the
    /// tokenized `contents` field
    pub raw_text: String,

    /// Original filesystem path
    pub source_path: PathBuf,

    /// Last modification time of the source file
    pub last_modified: DateTime<Utc>,
}

/// The unit committed to the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Exact source path, identity key inside the index
    pub path: String,

    /// Last modification time in epoch milliseconds
    pub modified: i64,

    /// Full file text (tokenized, not stored)
    pub contents: String,

    pub title: String,
    pub snippet: String,

    /// Rendered body text (tokenized and stored)
    pub doc_contents: String,

    pub url: String,

    /// Opaque authority score, stored verbatim
    pub page_rank: String,
}

impl IndexRecord {
    /// Join an extracted document with its authority score
    pub fn from_extracted(doc: ExtractedDocument, page_rank: &str) -> Self {
        Self {
            path: doc.source_path.display().to_string(),
            modified: doc.last_modified.timestamp_millis(),
            contents: doc.raw_text,
            title: doc.title,
            snippet: doc.snippet,
            doc_contents: doc.body_text,
            url: doc.url,
            page_rank: page_rank.to_string(),
        }
    }
}

/// Why a single document was left out of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File could not be read (permissions, vanished, dangling link)
    Unreadable(String),

    /// File exceeds the configured size limit
    TooLarge { bytes: u64 },

    /// Filtered out by include/exclude patterns
    Excluded,

    /// Content could not be parsed as HTML
    Malformed(String),

    /// Snippet start offset lies past its end offset
    SnippetOutOfRange { start: usize, end: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "unreadable: {e}"),
            SkipReason::TooLarge { bytes } => write!(f, "too large: {bytes} bytes"),
            SkipReason::Excluded => write!(f, "excluded by pattern"),
            SkipReason::Malformed(e) => write!(f, "malformed: {e}"),
            SkipReason::SnippetOutOfRange { start, end } => {
                write!(f, "snippet offset {start} out of range (end {end})")
            }
        }
    }
}

/// One item of a corpus walk
#[derive(Debug)]
pub enum WalkOutcome {
    Document(RawDocument),
    Skipped { path: PathBuf, reason: SkipReason },
}

impl WalkOutcome {
    /// Path of the file this outcome refers to
    pub fn path(&self) -> &Path {
        match self {
            WalkOutcome::Document(doc) => &doc.path,
            WalkOutcome::Skipped { path, .. } => path,
        }
    }
}

/// How the index store is opened for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// Start from an empty index, removing previously indexed documents
    CreateFresh,

    /// Keep existing documents, replacing those with the same path
    CreateOrAppend,
}

impl IndexMode {
    /// The write operation used for every document in this mode
    pub fn write_op(self) -> WriteOp {
        match self {
            IndexMode::CreateFresh => WriteOp::Add,
            IndexMode::CreateOrAppend => WriteOp::Update,
        }
    }
}

/// Write operation issued against the store for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Add,
    Update,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Add => f.write_str("adding"),
            WriteOp::Update => f.write_str("updating"),
        }
    }
}

/// Statistics from one indexing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Files produced by the walker, including skipped ones
    pub files_seen: usize,

    /// Records written to the store
    pub documents_indexed: usize,

    /// Files the walker could not read or filtered out
    pub skipped_unreadable: usize,

    /// Files the extractor rejected
    pub skipped_extraction: usize,

    /// Documents whose URL has no authority score
    pub skipped_unscored: usize,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,

    pub mode: IndexMode,

    /// Whether the run stopped early on a cancellation request
    pub cancelled: bool,
}

impl IndexSummary {
    pub fn new(mode: IndexMode) -> Self {
        Self {
            files_seen: 0,
            documents_indexed: 0,
            skipped_unreadable: 0,
            skipped_extraction: 0,
            skipped_unscored: 0,
            duration_ms: 0,
            mode,
            cancelled: false,
        }
    }

    /// Total documents left out of the index
    pub fn skipped(&self) -> usize {
        self.skipped_unreadable + self.skipped_extraction + self.skipped_unscored
    }
}
