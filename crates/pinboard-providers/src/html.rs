//! HTML to readable text.
//!
//! Reduces raw HTML to the readable body text via `html2text`, then collapses
//! all whitespace runs so the result reads as one continuous passage. Page
//! chrome (head, scripts, styles) never reaches the output.

use pinboard_core::text::truncate_str;

/// Raw HTML byte budget before parsing. Oversized documents are truncated
/// (UTF-8 safe) rather than rejected.
const MAX_HTML_BYTES: usize = 500_000;

/// Marker title Cloudflare serves on its challenge page.
const CLOUDFLARE_BLOCK_TITLE: &str = "<title>Attention Required! | Cloudflare</title>";

/// Returned when a page parses but yields no readable text.
pub const NO_READABLE_CONTENT: &str = "Could not extract readable content from the page.";

/// Whether `html` is a security-challenge page rather than real content.
#[must_use]
pub fn is_challenge_page(html: &str) -> bool {
    html.contains(CLOUDFLARE_BLOCK_TITLE)
}

/// Extract the readable body text of an HTML document.
///
/// Returns [`NO_READABLE_CONTENT`] when nothing readable survives the
/// conversion.
#[must_use]
pub fn extract_page(html: &str) -> String {
    let html = truncate_str(html, MAX_HTML_BYTES);

    let text = html2text::from_read(html.as_bytes(), 100).unwrap_or_default();
    let text = collapse_whitespace(&text);
    if text.is_empty() {
        NO_READABLE_CONTENT.to_owned()
    } else {
        text
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
