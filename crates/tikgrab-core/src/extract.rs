//! Download-link extraction from lookup result markup.
//!
//! The service's markup shape is unstable; everything here is defensive.
//! The parser is error-recovering, so malformed markup degrades to "no
//! match" rather than an error.

use scraper::{Html, Selector};

/// Visible anchor text that marks the HD download link.
const HD_LINK_TEXT: &str = "Download MP4 HD";
/// Class token the service puts on successful download anchors.
const SUCCESS_CLASS: &str = "dl-success";

/// Finds the direct download URL in the service's result markup.
///
/// Scans anchors in document order; the first one whose trimmed text
/// contains "Download MP4 HD" or whose class list contains "dl-success",
/// and that carries a non-empty href, wins. Escaped-quote sequences (`\"`)
/// are stripped from the href. A qualifying anchor without an href does not
/// end the scan.
///
/// Returns `None` when nothing qualifies. That is an expected outcome, not
/// an error: the service sometimes returns a page with no recognizable
/// result.
pub fn extract_download_link(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    let anchors = Selector::parse("a").ok()?;

    let mut scanned = 0usize;
    for element in document.select(&anchors) {
        scanned += 1;

        let text: String = element.text().collect();
        let qualifies = text.trim().contains(HD_LINK_TEXT)
            || element.value().classes().any(|class| class == SUCCESS_CLASS);
        if !qualifies {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let cleaned = href.replace("\\\"", "");
        if cleaned.is_empty() {
            continue;
        }

        tracing::debug!(text = text.trim(), "qualifying download anchor found");
        return Some(cleaned);
    }

    tracing::debug!(scanned, "no qualifying download anchor");
    None
}
