use std::sync::LazyLock;

use regex::Regex;

use crate::filter::HostFilter;

/// Absolute URLs ending in a common image extension
static IMAGE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b(?:[-a-zA-Z0-9()@:%_+.~#?&/=]*(?:\.png|\.jpe?g|\.gif))",
    )
    .expect("image link pattern is valid")
});

/// Extracts image links from an image search page, dropping the provider's own assets
pub fn parse(html: &str) -> Vec<String> {
    parse_with_filter(html, &HostFilter::default())
}

/// Extracts image links, keeping only those the filter allows
pub fn parse_with_filter(html: &str, filter: &HostFilter) -> Vec<String> {
    let mut dropped = 0;
    let links: Vec<String> = IMAGE_LINK
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|link| {
            let keep = filter.allows(link);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(str::to_string)
        .collect();

    ::log::debug!(
        "Image extractor found {} links ({} excluded)",
        links.len(),
        dropped
    );
    links
}
