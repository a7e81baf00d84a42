//! HTML parsing boundary.
//!
//! The extractor only needs two things from a parsed page: the text of
//! the first element with a given tag name, and the rendered text of the
//! whole document. [`HtmlParser`] and [`HtmlSource`] capture exactly that,
//! so any HTML library can sit behind them. [`ScraperParser`] is the
//! default implementation, backed by `scraper` (html5ever).

use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

/// Failure inside the HTML layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    #[error("invalid selector '{tag}': {message}")]
    InvalidSelector { tag: String, message: String },

    #[error("unparseable document: {0}")]
    Unparseable(String),
}

/// A parsed document
pub trait HtmlSource {
    /// Whitespace-normalised text of the first element named `tag`
    fn select_first_text(&self, tag: &str) -> Result<Option<String>, HtmlError>;

    /// Whitespace-normalised text of the whole document
    fn full_text(&self) -> String;
}

/// Turns markup into an [`HtmlSource`]
pub trait HtmlParser {
    type Document: HtmlSource;

    fn parse(&self, input: &str) -> Result<Self::Document, HtmlError>;
}

/// `scraper`-backed parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

/// Document produced by [`ScraperParser`]
pub struct ScraperDocument {
    html: Html,
}

impl HtmlParser for ScraperParser {
    type Document = ScraperDocument;

    fn parse(&self, input: &str) -> Result<Self::Document, HtmlError> {
        // html5ever recovers from any markup error, so parsing itself
        // never fails here.
        Ok(ScraperDocument {
            html: Html::parse_document(input),
        })
    }
}

impl HtmlSource for ScraperDocument {
    fn select_first_text(&self, tag: &str) -> Result<Option<String>, HtmlError> {
        let selector = Selector::parse(tag).map_err(|e| HtmlError::InvalidSelector {
            tag: tag.to_string(),
            message: format!("{e:?}"),
        })?;

        Ok(self.html.select(&selector).next().map(|element| {
            let mut out = String::new();
            render_text(element, &mut out);
            finish(out)
        }))
    }

    fn full_text(&self) -> String {
        let mut out = String::new();
        render_text(self.html.root_element(), &mut out);
        finish(out)
    }
}

/// Elements whose bodies are never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start and end on their own line when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "center", "dd", "del",
    "details", "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html",
    "ins", "li", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Append the rendered text of `element` to `out`
///
/// Runs of whitespace collapse to one space. Block elements and `<br>`
/// are separated from their neighbours; inline elements are glued to the
/// surrounding text, so `wor<b>ld</b>` renders as `world`.
fn render_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block || name == "br" {
        separate(out);
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(out, text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_text(child, out);
                }
            }
            _ => {}
        }
    }

    if block {
        separate(out);
    }
}

/// Append `text`, collapsing each whitespace run to a single space
fn push_text(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() {
            separate(out);
        } else {
            out.push(c);
        }
    }
}

/// Add a space unless `out` is empty or already ends with one
fn separate(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

fn finish(mut out: String) -> String {
    out.truncate(out.trim_end().len());
    out
}
