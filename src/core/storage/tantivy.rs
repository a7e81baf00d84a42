//! Tantivy-backed index store.
//!
//! Maps [`IndexRecord`] onto a fixed Tantivy schema and implements
//! [`IndexStore`] on top of a single `IndexWriter`.

use std::path::Path;
use tantivy::directory::MmapDirectory;
use tantivy::schema::*;
use tantivy::{doc, Index, IndexWriter, TantivyDocument, Term};

use crate::core::error::{PrindexError, Result};
use crate::core::storage::IndexStore;
use crate::core::types::{IndexMode, IndexRecord};

/// Default writer heap (50MB)
pub const DEFAULT_WRITER_HEAP_BYTES: usize = 50_000_000;

pub const FIELD_PATH: &str = "path";
pub const FIELD_MODIFIED: &str = "modified";
pub const FIELD_CONTENTS: &str = "contents";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_SNIPPET: &str = "snippet";
pub const FIELD_DOC_CONTENTS: &str = "docContents";
pub const FIELD_URL: &str = "URL";
pub const FIELD_PAGE_RANK: &str = "pageRank";

/// Create the Tantivy schema for document records
///
/// Fields:
/// - path: Source file path, identity key (STRING | STORED)
/// - modified: Last-modified epoch millis (i64 | INDEXED | FAST)
/// - contents: Raw file text (TEXT, not stored)
/// - title, snippet, URL: Exact-match metadata (STRING | STORED)
/// - docContents: Rendered body text (TEXT | STORED)
/// - pageRank: Opaque authority score (STORED)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    builder.add_text_field(FIELD_PATH, STRING | STORED);
    builder.add_i64_field(FIELD_MODIFIED, INDEXED | FAST);
    builder.add_text_field(FIELD_CONTENTS, TEXT);

    builder.add_text_field(FIELD_TITLE, STRING | STORED);
    builder.add_text_field(FIELD_SNIPPET, STRING | STORED);
    builder.add_text_field(FIELD_DOC_CONTENTS, TEXT | STORED);
    builder.add_text_field(FIELD_URL, STRING | STORED);
    builder.add_text_field(FIELD_PAGE_RANK, STORED);

    builder.build()
}

/// Resolved schema fields
#[derive(Debug, Clone, Copy)]
struct RecordFields {
    path: Field,
    modified: Field,
    contents: Field,
    title: Field,
    snippet: Field,
    doc_contents: Field,
    url: Field,
    page_rank: Field,
}

impl RecordFields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| PrindexError::StorageError(format!("Missing {name} field: {e}")))
        };

        Ok(Self {
            path: field(FIELD_PATH)?,
            modified: field(FIELD_MODIFIED)?,
            contents: field(FIELD_CONTENTS)?,
            title: field(FIELD_TITLE)?,
            snippet: field(FIELD_SNIPPET)?,
            doc_contents: field(FIELD_DOC_CONTENTS)?,
            url: field(FIELD_URL)?,
            page_rank: field(FIELD_PAGE_RANK)?,
        })
    }

    fn document(&self, record: &IndexRecord) -> TantivyDocument {
        doc!(
            self.path => record.path.as_str(),
            self.modified => record.modified,
            self.contents => record.contents.as_str(),
            self.title => record.title.as_str(),
            self.snippet => record.snippet.as_str(),
            self.doc_contents => record.doc_contents.as_str(),
            self.url => record.url.as_str(),
            self.page_rank => record.page_rank.as_str(),
        )
    }
}

/// Tantivy index store
pub struct TantivyStore {
    /// Index writer, the only writer for the run
    writer: IndexWriter,

    fields: RecordFields,
}

impl std::fmt::Debug for TantivyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyStore")
            .field("fields", &self.fields)
            .finish()
    }
}

impl TantivyStore {
    /// Open the index in `index_dir` for writing
    ///
    /// The directory and index are created when missing. In
    /// `CreateFresh` mode every existing document is deleted; the
    /// deletion takes effect at the next commit.
    pub fn open(index_dir: &Path, mode: IndexMode, heap_bytes: usize) -> Result<Self> {
        std::fs::create_dir_all(index_dir).map_err(|e| {
            PrindexError::StorageError(format!(
                "Failed to create index directory {}: {e}",
                index_dir.display()
            ))
        })?;

        let directory = MmapDirectory::open(index_dir).map_err(|e| {
            PrindexError::StorageError(format!("Failed to open index directory: {e}"))
        })?;

        let index = Index::open_or_create(directory, create_schema())
            .map_err(|e| PrindexError::StorageError(format!("Failed to open index: {e}")))?;

        let fields = RecordFields::resolve(&index.schema())?;

        let writer = index
            .writer(heap_bytes)
            .map_err(|e| PrindexError::StorageError(format!("Failed to create writer: {e}")))?;

        if mode == IndexMode::CreateFresh {
            writer.delete_all_documents().map_err(|e| {
                PrindexError::StorageError(format!("Failed to clear index: {e}"))
            })?;
        }

        tracing::debug!("Opened index at {:?} in {:?} mode", index_dir, mode);

        Ok(Self { writer, fields })
    }
}

impl IndexStore for TantivyStore {
    fn add(&mut self, record: &IndexRecord) -> Result<()> {
        self.writer
            .add_document(self.fields.document(record))
            .map_err(|e| PrindexError::StorageError(format!("Failed to add document: {e}")))?;
        Ok(())
    }

    fn update_by_key(&mut self, key: &str, record: &IndexRecord) -> Result<()> {
        // The delete is ordered before the add, so it never hits the new record
        self.writer
            .delete_term(Term::from_field_text(self.fields.path, key));
        self.add(record)
    }

    fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| PrindexError::StorageError(format!("Failed to commit: {e}")))?;
        Ok(())
    }
}

/// Number of committed documents in the index at `index_dir`
pub fn count_documents(index_dir: &Path) -> Result<u64> {
    let index = Index::open_in_dir(index_dir)
        .map_err(|e| PrindexError::StorageError(format!("Failed to open index: {e}")))?;
    let reader = index
        .reader()
        .map_err(|e| PrindexError::StorageError(format!("Failed to create reader: {e}")))?;
    Ok(reader.searcher().num_docs())
}
