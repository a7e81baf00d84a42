//! Indexer layer tests
//!
//! Corpus traversal, extraction with multi-byte text, and pipeline
//! accounting against a real Tantivy store.
