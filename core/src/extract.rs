use crate::error::{KnnError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_OPEN: Regex = Regex::new(r"<title.*?>").expect("valid regex");
    static ref TEXT_OPEN: Regex = Regex::new(r"<text.*?>").expect("valid regex");
}

const TITLE_CLOSE: &str = "</title>";
const TEXT_CLOSE: &str = "</text>";

/// One article pulled out of an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the markup came from, e.g. a file path.
    pub source: String,
    pub title: String,
    pub body: String,
}

/// Extract the title and body of a single article from its markup.
///
/// Both values are the text strictly between the first opening tag (which may
/// carry attributes) and the first matching closing tag after it, with every
/// newline turned into a space. Entities are left escaped.
pub fn extract_document(source: &str, markup: &str) -> Result<Document> {
    let title = between(source, markup, &TITLE_OPEN, "<title>", TITLE_CLOSE)?;
    let body = between(source, markup, &TEXT_OPEN, "<text>", TEXT_CLOSE)?;
    tracing::debug!(source, title = %title, body_len = body.len(), "extracted document");
    Ok(Document { source: source.to_string(), title, body })
}

fn between(source: &str, markup: &str, open: &Regex, open_name: &'static str, close: &'static str) -> Result<String> {
    let start = open
        .find(markup)
        .ok_or_else(|| malformed(source, open_name))?
        .end();
    let len = markup[start..].find(close).ok_or_else(|| malformed(source, close))?;
    Ok(markup[start..start + len].replace('\n', " "))
}

fn malformed(source: &str, marker: &'static str) -> KnnError {
    KnnError::MalformedDocument { source_ref: source.to_string(), marker }
}
