//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end indexing workflow:
//! 1. Load the authority score table
//! 2. Open the index store in the requested mode
//! 3. Walk the corpus, extract fields, join with scores
//! 4. Add or update one record per scored document
//! 5. Commit
//!
//! Per-document problems (unreadable file, parse failure, snippet out
//! of range, missing score) only bump a counter. Failures to load the
//! scores or to open or commit the store end the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::core::config::{Config, IndexingConfig};
use crate::core::error::{PrindexError, Result};
use crate::core::indexer::html::{HtmlParser, ScraperParser};
use crate::core::indexer::{CorpusWalker, DocumentExtractor};
use crate::core::scores::{MalformedLinePolicy, ScoreTable};
use crate::core::storage::{IndexStore, TantivyStore};
use crate::core::types::{IndexMode, IndexRecord, IndexSummary, WalkOutcome, WriteOp};

/// Everything one indexing run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Destination index directory
    pub index_dir: PathBuf,

    /// Corpus root (file or directory)
    pub docs_root: PathBuf,

    pub mode: IndexMode,

    /// Score artifact path
    pub scores_path: PathBuf,

    pub scores_policy: MalformedLinePolicy,

    pub indexing: IndexingConfig,
}

impl RunConfig {
    /// Build a run from loaded configuration
    pub fn from_config(config: &Config, docs_root: PathBuf, mode: IndexMode) -> Self {
        Self {
            index_dir: config.storage.index_dir.clone(),
            docs_root,
            mode,
            scores_path: config.scores.path.clone(),
            scores_policy: config.scores.malformed_policy(),
            indexing: config.indexing.clone(),
        }
    }
}

/// Orchestrates the indexing pipeline
#[derive(Debug, Clone)]
pub struct IndexingPipeline<P = ScraperParser> {
    walker: CorpusWalker,
    extractor: DocumentExtractor<P>,
}

impl IndexingPipeline<ScraperParser> {
    /// Create a pipeline from indexing configuration
    pub fn from_config(config: &IndexingConfig) -> Result<Self> {
        let walker = CorpusWalker::new(
            &config.include_patterns,
            &config.exclude_patterns,
            config.max_file_size_mb,
        )?;
        let extractor = DocumentExtractor::new(config.snippet_max_chars);

        Ok(Self::new(walker, extractor))
    }
}

impl<P: HtmlParser> IndexingPipeline<P> {
    pub fn new(walker: CorpusWalker, extractor: DocumentExtractor<P>) -> Self {
        Self { walker, extractor }
    }

    /// Index every scored document under `root` into `store`
    ///
    /// `CreateFresh` adds each record; `CreateOrAppend` replaces any
    /// record with the same path. `on_indexed` is called after each
    /// successful write. `cancel` is checked before each document; once
    /// set, the loop stops and the documents written so far are
    /// committed.
    ///
    /// # Returns
    ///
    /// Run statistics, or the first store error
    pub fn run<S, F>(
        &self,
        root: &Path,
        scores: &ScoreTable,
        store: &mut S,
        mode: IndexMode,
        cancel: &AtomicBool,
        mut on_indexed: F,
    ) -> Result<IndexSummary>
    where
        S: IndexStore,
        F: FnMut(WriteOp, &Path),
    {
        let start = Instant::now();
        let write_op = mode.write_op();
        let mut summary = IndexSummary::new(mode);

        tracing::info!(
            "Starting corpus walk from {:?} (snippet cap {} chars)",
            root,
            self.extractor.snippet_max_chars()
        );

        for outcome in self.walker.walk(root) {
            if cancel.load(Ordering::Relaxed) {
                tracing::warn!("Cancellation requested, stopping after {} files", summary.files_seen);
                summary.cancelled = true;
                break;
            }

            summary.files_seen += 1;
            if summary.files_seen % 100 == 0 {
                tracing::info!(
                    "Progress: {} files seen, {} indexed",
                    summary.files_seen,
                    summary.documents_indexed
                );
            }

            let raw = match outcome {
                WalkOutcome::Document(raw) => raw,
                WalkOutcome::Skipped { path, reason } => {
                    tracing::debug!("Skipped {:?}: {}", path, reason);
                    summary.skipped_unreadable += 1;
                    continue;
                }
            };

            let extracted = match self.extractor.extract(&raw) {
                Ok(doc) => doc,
                Err(reason) => {
                    tracing::debug!("Skipped {:?}: {}", raw.path, reason);
                    summary.skipped_extraction += 1;
                    continue;
                }
            };

            let Some(page_rank) = scores.lookup(&extracted.url) else {
                tracing::debug!("Skipped {:?}: no score for {:?}", raw.path, extracted.url);
                summary.skipped_unscored += 1;
                continue;
            };

            let record = IndexRecord::from_extracted(extracted, page_rank);
            match write_op {
                WriteOp::Add => store.add(&record)?,
                WriteOp::Update => store.update_by_key(&record.path, &record)?,
            }
            on_indexed(write_op, &raw.path);
            summary.documents_indexed += 1;
        }

        store.commit()?;

        summary.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} documents indexed, {} skipped of {} files in {}ms",
            summary.documents_indexed,
            summary.skipped(),
            summary.files_seen,
            summary.duration_ms
        );

        Ok(summary)
    }
}

/// Fail with `InvalidPath` unless `path` exists and can be read
pub fn ensure_readable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| PrindexError::InvalidPath(format!("{}: {e}", path.display())))?;

    let readable = if metadata.is_dir() {
        fs::read_dir(path).map(|_| ())
    } else {
        fs::File::open(path).map(|_| ())
    };

    readable.map_err(|e| PrindexError::InvalidPath(format!("{}: {e}", path.display())))
}

/// Run a complete indexing job
///
/// Loads the scores, opens the Tantivy store at `run.index_dir`,
/// indexes `run.docs_root` and commits. The summary duration covers
/// the whole job, score loading included.
pub fn index_corpus<F>(run: &RunConfig, cancel: &AtomicBool, on_indexed: F) -> Result<IndexSummary>
where
    F: FnMut(WriteOp, &Path),
{
    let start = Instant::now();

    let scores = ScoreTable::load(&run.scores_path, run.scores_policy)?;
    if scores.is_empty() {
        tracing::warn!("No scores in {:?}, nothing will be indexed", run.scores_path);
    }
    let pipeline = IndexingPipeline::from_config(&run.indexing)?;

    let mut store = TantivyStore::open(
        &run.index_dir,
        run.mode,
        run.indexing.writer_heap_bytes(),
    )?;

    let mut summary = pipeline.run(
        &run.docs_root,
        &scores,
        &mut store,
        run.mode,
        cancel,
        on_indexed,
    )?;

    summary.duration_ms = start.elapsed().as_millis() as u64;
    Ok(summary)
}
