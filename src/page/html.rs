// src/page/html.rs
// =============================================================================
// HTML helpers built on the `scraper` crate:
// - extract_links: every <a href> on a page, resolved to absolute http(s) URLs
// - count_words: how many words of visible text a page carries
//
// scraper parses with html5ever, so broken markup still yields a DOM.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Node, Selector};
use url::Url;

use crate::normalize::resolve;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

// ASCII word characters plus the Latin-1 accented letters (À..ÿ).
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_\x{C0}-\x{FF}]+").expect("valid word pattern"));

/// Elements whose contents never count as visible text.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript"];

/// Extracts every anchor target on a page as an absolute http(s) URL with
/// the fragment removed. Host filtering is up to the caller.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter_map(|href| resolve(page_url, href))
        .filter(is_http)
        .collect()
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Counts words in the visible text of an HTML document.
///
/// Script, style and noscript contents are ignored. Punctuation-only runs
/// are not words.
pub fn count_words(html: &str) -> usize {
    let text = visible_text(html);
    if text.is_empty() {
        return 0;
    }
    WORD_PATTERN.find_iter(&text).count()
}

/// All text nodes outside non-content elements, joined by single spaces.
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_CONTENT_TAGS.contains(&element.name()))
        });
        if !hidden {
            pieces.push(&**text);
        }
    }

    pieces
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
