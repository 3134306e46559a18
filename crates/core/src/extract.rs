//! Page metadata extraction from HTML bodies.
//!
//! Extraction is best-effort by contract: malformed or partial HTML never
//! raises, and a document without a `<title>` yields an empty title rather
//! than an error. Entity references in the title (`&mdash;` and friends) are
//! decoded into their character equivalents during parsing, so the returned
//! title is human-readable text, not raw markup.

use scraper::{Html, Selector};
use serde::Serialize;

/// Descriptive metadata extracted from a fetched page.
///
/// Currently only the title; the record is designed to grow more fields
/// (description, icon, ...) without breaking the contract.
///
/// # Example
///
/// ```rust
/// use linkpeek_core::extract_from_str;
///
/// let details = extract_from_str("<html><head><title>Hi</title></head></html>");
/// assert_eq!(details.title, "Hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageDetails {
    /// Decoded, trimmed text of the first `<title>` element; empty when the
    /// document has none.
    pub title: String,
}

/// Extracts metadata from a raw response body.
///
/// The body is decoded as UTF-8, replacing invalid sequences, then handed to
/// [`extract_from_str`].
pub fn extract(body: &[u8]) -> PageDetails {
    extract_from_str(&String::from_utf8_lossy(body))
}

/// Extracts metadata from an HTML string.
pub fn extract_from_str(html: &str) -> PageDetails {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>())
        })
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    PageDetails { title }
}
