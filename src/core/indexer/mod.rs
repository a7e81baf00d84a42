//! Document indexing module.
//!
//! Turns a corpus of crawled HTML files into index records:
//!
//! - Lazy corpus walking with per-file failure isolation
//! - HTML field extraction behind a parser trait
//! - Character-based snippet slicing
//! - Pipeline orchestration (score join, add vs update, commit)
//!
//! # Safety
//!
//! Snippet offsets are counted with `chars()` so slicing never
//! panics on multi-byte sequences such as Thai text or emojis.

pub mod extractor;
pub mod html;
pub mod pipeline;
pub mod walker;

pub use extractor::DocumentExtractor;
pub use html::{HtmlParser, HtmlSource, ScraperParser};
pub use pipeline::{ensure_readable, index_corpus, IndexingPipeline, RunConfig};
pub use walker::CorpusWalker;
