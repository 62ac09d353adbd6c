//! Web search results page extraction.
//!
//! Every selector that depends on the provider's result markup lives here;
//! when the markup changes this is the only file that needs to follow.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::parsers::{cards, selector, text};
use crate::results::{SearchResult, TextResults};

/// Maximum description length kept per result
pub const DESCRIPTION_LIMIT: usize = 500;

/// Description used when a result has no snippet
pub const MISSING_DESCRIPTION: &str = "Not found";

static RESULT_CONTAINER: LazyLock<Selector> = LazyLock::new(|| selector("div.g.tF2Cxc"));
static LINK_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div.yuRUbf"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(r#"h3[class*="LC20lb"]"#));
static SNIPPET: LazyLock<Selector> = LazyLock::new(|| selector("div.kb0PBd > div.VwiC3b"));
static STATS: LazyLock<Selector> = LazyLock::new(|| selector("div#result-stats"));

/// Parses a results page, including answer cards
pub fn parse(html: &str) -> TextResults {
    parse_with_cards(html, true)
}

/// Parses a results page, optionally looking for answer cards
pub fn parse_with_cards(html: &str, with_cards: bool) -> TextResults {
    let doc = Html::parse_document(html);

    let mut out = TextResults {
        stats: parse_stats(&doc),
        ..TextResults::default()
    };

    if with_cards {
        if let Some(card) = cards::find_card(&doc) {
            ::log::debug!("Found {} card", card.kind);
            out.results.push(card.result);
            out.thumbnail = card.thumbnail;
            out.image = card.image;
        }
    }

    let mut skipped = 0;
    for container in doc.select(&RESULT_CONTAINER) {
        match parse_result(container) {
            Some(result) => out.results.push(result),
            None => skipped += 1,
        }
    }

    ::log::debug!(
        "Text extractor found {} results ({} containers skipped)",
        out.results.len(),
        skipped
    );

    out
}

/// Result count summary on a single line, empty when absent
fn parse_stats(doc: &Html) -> String {
    doc.select(&STATS)
        .next()
        .map(text::element_text)
        .unwrap_or_default()
}

/// Extracts one result container; `None` when no title can be resolved
fn parse_result(container: ElementRef<'_>) -> Option<SearchResult> {
    let block = container.select(&LINK_BLOCK).next()?;
    let url = block.select(&LINK).next()?.value().attr("href")?.trim().to_string();

    let title = block
        .select(&TITLE)
        .next()
        .map(text::element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.clone());
    if title.is_empty() {
        return None;
    }

    let description = container
        .select(&SNIPPET)
        .next()
        .map(|snippet| text::element_text_bounded(snippet, DESCRIPTION_LIMIT))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());

    let url = if url.is_empty() { None } else { Some(url) };
    Some(SearchResult::new(url, title, description))
}
