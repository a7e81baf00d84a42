//! Field extraction from crawled HTML documents.
//!
//! Pulls the title, the corpus-specific `<url>` tag, the rendered body
//! text and a bounded snippet out of one [`RawDocument`]. Every failure
//! is reported as a [`SkipReason`]; nothing here aborts a run.
//!
//! # Snippet offsets
//!
//! Offsets are counted in characters, not bytes, so slicing never
//! splits a multi-byte sequence. The snippet starts after
//! `url.len() + title.len()` characters and ends at
//! `min(body.len(), snippet_max_chars)`. When the start lies past the
//! end the document is skipped instead of producing a wrapped slice.

use crate::core::indexer::html::{HtmlParser, HtmlSource, ScraperParser};
use crate::core::types::{ExtractedDocument, RawDocument, SkipReason};

/// Default maximum snippet end offset in characters
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 1000;

/// Bytes inspected when sniffing for binary content
const BINARY_SNIFF_BYTES: usize = 8192;

/// Extracts indexable fields from HTML documents
#[derive(Debug, Clone)]
pub struct DocumentExtractor<P = ScraperParser> {
    parser: P,
    snippet_max_chars: usize,
}

impl DocumentExtractor<ScraperParser> {
    /// Create an extractor backed by the default HTML parser
    pub fn new(snippet_max_chars: usize) -> Self {
        Self::with_parser(ScraperParser, snippet_max_chars)
    }
}

impl Default for DocumentExtractor<ScraperParser> {
    fn default() -> Self {
        Self::new(DEFAULT_SNIPPET_MAX_CHARS)
    }
}

impl<P: HtmlParser> DocumentExtractor<P> {
    /// Create an extractor with a custom parser
    pub fn with_parser(parser: P, snippet_max_chars: usize) -> Self {
        Self {
            parser,
            snippet_max_chars,
        }
    }

    pub fn snippet_max_chars(&self) -> usize {
        self.snippet_max_chars
    }

    /// Extract fields from a raw document
    ///
    /// # Returns
    ///
    /// The extracted document, or the reason it must be left out
    pub fn extract(&self, raw: &RawDocument) -> Result<ExtractedDocument, SkipReason> {
        // UTF-16 input has NUL bytes too and is skipped with binary files
        let sniff_len = raw.content.len().min(BINARY_SNIFF_BYTES);
        if raw.content[..sniff_len].contains(&0) {
            return Err(SkipReason::Malformed("binary content".to_string()));
        }

        // Mis-encoded input is indexed as garbled text rather than rejected
        let raw_text = String::from_utf8_lossy(&raw.content).into_owned();

        let doc = self
            .parser
            .parse(&raw_text)
            .map_err(|e| SkipReason::Malformed(e.to_string()))?;

        let title = doc
            .select_first_text("title")
            .map_err(|e| SkipReason::Malformed(e.to_string()))?
            .unwrap_or_default();
        let url = doc
            .select_first_text("url")
            .map_err(|e| SkipReason::Malformed(e.to_string()))?
            .unwrap_or_default();
        let body_text = doc.full_text();

        let start = url.chars().count() + title.chars().count();
        let snippet = snippet(&body_text, start, self.snippet_max_chars)?;

        Ok(ExtractedDocument {
            title,
            url,
            body_text,
            snippet,
            raw_text,
            source_path: raw.path.clone(),
            last_modified: raw.last_modified,
        })
    }
}

/// Characters `[start, min(len, max_chars))` of `body`
pub fn snippet(body: &str, start: usize, max_chars: usize) -> Result<String, SkipReason> {
    let end = body.chars().count().min(max_chars);
    if start > end {
        return Err(SkipReason::SnippetOutOfRange { start, end });
    }

    Ok(body.chars().skip(start).take(end - start).collect())
}
