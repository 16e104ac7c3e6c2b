//! Context aggregation.
//!
//! Projects a whole project into one bounded text payload for the
//! question-answering collaborator. Pure read-only: aggregation never mutates
//! items and is deterministic for a fixed store state.
//!
//! Fetched full text is preferred over summaries and snippets; an item whose
//! fetch is still in flight (or failed) contributes its fallback line, so the
//! payload always reflects exactly what has been enriched so far.

use std::fmt::Write as _;

use pinboard_core::text::excerpt_chars;

use crate::model::{ContentStatus, ItemContent, Project};

/// Per-item character budget for fetched full text.
pub const EXCERPT_CHARS: usize = 4000;

/// Separator between item renderings in the aggregate payload.
pub const ITEM_DELIMITER: &str = "\n\n---\n\n";

const ELLIPSIS: &str = "...";

/// Render a project's items, in item order, into one context string.
///
/// Each item renders independently:
/// - papers contribute their fetched full text (first [`EXCERPT_CHARS`]
///   characters) when loaded, otherwise their AI summary;
/// - web pages contribute their fetched page content when loaded, otherwise
///   a fixed "no content" line;
/// - notes contribute their raw text unconditionally.
#[must_use]
pub fn build_context(project: &Project) -> String {
    let rendered: Vec<String> = project.items.iter().map(|i| render_item(&i.content)).collect();
    rendered.join(ITEM_DELIMITER)
}

fn render_item(content: &ItemContent) -> String {
    match content {
        ItemContent::Paper(paper) => {
            let mut out = format!("Source Type: Academic Paper\nTitle: {}\n", paper.title);
            match loaded_text(&paper.enrichment.status, paper.enrichment.text.as_deref()) {
                Some(text) => {
                    let _ = write!(out, "Full Text: {}{ELLIPSIS}", excerpt_chars(text, EXCERPT_CHARS));
                }
                None => {
                    let _ = write!(out, "Summary: {}", paper.summary);
                }
            }
            out
        }
        ItemContent::Web(web) => {
            let mut out = format!(
                "Source Type: Web Page\nTitle: {}\nURL: {}\n",
                web.title, web.link
            );
            match loaded_text(&web.enrichment.status, web.enrichment.text.as_deref()) {
                Some(text) => {
                    let _ = write!(
                        out,
                        "Page Content: {}{ELLIPSIS}",
                        excerpt_chars(text, EXCERPT_CHARS)
                    );
                }
                None => out.push_str("(No content fetched for this link)"),
            }
            out
        }
        ItemContent::Text(note) => format!("Source Type: User Note\nContent: {}", note.text),
    }
}

/// Full text participates only when the fetch completed and produced
/// something. Loading, idle, error, and empty loaded text all fall through
/// to the item's fallback rendering.
fn loaded_text<'a>(status: &ContentStatus, text: Option<&'a str>) -> Option<&'a str> {
    match (status, text) {
        (ContentStatus::Loaded, Some(t)) if !t.is_empty() => Some(t),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
