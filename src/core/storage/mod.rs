//! Storage layer for the inverted index.
//!
//! The pipeline writes through the [`IndexStore`] trait only, so the
//! index engine stays swappable. [`TantivyStore`] is the production
//! implementation.
//!
//! # Index Directory Structure
//!
//! ```text
//! {index_dir}/
//! ├── meta.json          # Tantivy index metadata
//! ├── .managed.json
//! └── [segment files]
//! ```

mod tantivy;

pub use self::tantivy::{
    count_documents, create_schema, TantivyStore, DEFAULT_WRITER_HEAP_BYTES, FIELD_CONTENTS,
    FIELD_DOC_CONTENTS, FIELD_MODIFIED, FIELD_PAGE_RANK, FIELD_PATH, FIELD_SNIPPET, FIELD_TITLE,
    FIELD_URL,
};

use crate::core::error::Result;
use crate::core::types::IndexRecord;

/// Write side of an inverted index
///
/// One store has exactly one writer; callers serialize all writes.
/// Nothing is visible to readers until [`commit`](IndexStore::commit).
pub trait IndexStore {
    /// Add a record without checking for an existing one
    fn add(&mut self, record: &IndexRecord) -> Result<()>;

    /// Replace every record whose `path` equals `key` with `record`
    fn update_by_key(&mut self, key: &str, record: &IndexRecord) -> Result<()>;

    /// Make all pending writes durable and visible
    fn commit(&mut self) -> Result<()>;
}
