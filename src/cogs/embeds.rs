//! Embed rendering for the Google commands

use serde_json::Value;

use crate::embed::Embed;
use crate::fetch::ContentFilter;
use crate::results::{Doodle, ReverseImageMatch, TextResults, Volume};
use crate::utils::{ellipsize, humanize_number, shorten, title_case, truncate_chars};

/// Results shown per search page
pub const RESULTS_PER_PAGE: usize = 3;

const QUERY_TITLE_LIMIT: usize = 45;
const RESULT_VALUE_LIMIT: usize = 800;
const BOOK_SUMMARY_LIMIT: usize = 500;
const REVERSE_TITLE: &str = "Google Reverse Image Search";
const BOOKS_ICON: &str = "https://i.imgur.com/N3oHABo.png";

fn safe_search_footer(filter: ContentFilter) -> String {
    format!("Safe Search: {}", filter.is_safe())
}

/// Web search results, three per embed
pub fn search_pages(
    query: &str,
    results: &TextResults,
    final_url: &str,
    filter: ContentFilter,
    color: u32,
) -> Vec<Embed> {
    let groups: Vec<_> = results.results.chunks(RESULTS_PER_PAGE).collect();
    let total = groups.len();
    let footer = format!(
        "{} | {}",
        safe_search_footer(filter),
        results.stats.replace('\n', " ")
    );

    groups
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let mut embed = Embed::new()
                .title(format!(
                    "Google Search: {}",
                    ellipsize(query, QUERY_TITLE_LIMIT)
                ))
                .color(color)
                .url(final_url);

            for result in group {
                let mut value = result
                    .url
                    .as_ref()
                    .map(|u| format!("{}\n", u))
                    .unwrap_or_default();
                value.push_str(&truncate_chars(&result.description, RESULT_VALUE_LIMIT));
                let value = if value.trim().is_empty() {
                    "Nothing".to_string()
                } else {
                    value
                };
                embed = embed.field(&result.title, value, false);
            }

            embed = embed
                .description(format!("Page {} of {}", i + 1, total))
                .footer(&footer);
            if let Some(thumbnail) = &results.thumbnail {
                embed = embed.thumbnail(thumbnail.clone());
            }
            if i == 0 {
                if let Some(image) = &results.image {
                    embed = embed.image(image.clone());
                }
            }
            embed
        })
        .collect()
}

/// One image result page
pub fn image_page(
    page: usize,
    page_count: usize,
    image_url: &str,
    final_url: &str,
    filter: ContentFilter,
    color: u32,
) -> Embed {
    Embed::new()
        .title(format!("Pages: {}/{}", page + 1, page_count))
        .color(color)
        .description("Some images might not be visible.")
        .url(final_url)
        .image(image_url)
        .footer(safe_search_footer(filter))
}

/// Suggestions from an autocomplete response, one per line.
/// The response is `[query, [suggestion, ...], ...]`.
pub fn suggestions_text(response: &Value) -> Option<String> {
    let suggestions: Vec<&str> = response
        .get(1)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    if suggestions.is_empty() {
        None
    } else {
        Some(suggestions.join("\n"))
    }
}

/// One embed per volume
pub fn book_pages(volumes: &[Volume], color: u32) -> Vec<Embed> {
    let total = volumes.len();
    volumes
        .iter()
        .enumerate()
        .map(|(i, volume)| book_page(volume, i, total, color))
        .collect()
}

fn availability(available: bool, download: Option<&str>) -> String {
    let mut out = if available { "\u{2705}" } else { "\u{274c}" }.to_string();
    if let Some(link) = download {
        out.push_str(&format!(" [`Download Link`]({})", link));
    }
    out
}

fn book_page(volume: &Volume, index: usize, total: usize, color: u32) -> Embed {
    let info = &volume.volume_info;
    let access = &volume.access_info;

    let mut embed = Embed::new().color(color);
    if let Some(title) = &info.title {
        embed = embed.title(title);
    }
    if let Some(link) = &info.canonical_volume_link {
        embed = embed.url(link.clone());
    }
    let summary = info.description.as_deref().unwrap_or("No summary.");
    embed = embed
        .description(shorten(summary, BOOK_SUMMARY_LIMIT, "..."))
        .author(
            "Google Books",
            Some("https://books.google.com/"),
            Some(BOOKS_ICON),
        );
    if let Some(thumbnail) = info.image_links.as_ref().and_then(|l| l.thumbnail.clone()) {
        embed = embed.thumbnail(thumbnail);
    }

    embed = embed.field(
        "Published Date",
        info.published_date.as_deref().unwrap_or("Unknown"),
        true,
    );
    if !info.authors.is_empty() {
        embed = embed.field("Authors", info.authors.join(", "), true);
    }
    embed = embed.field(
        "Publisher",
        info.publisher.as_deref().unwrap_or("Unknown"),
        true,
    );
    if let Some(pages) = info.page_count.filter(|p| *p > 0) {
        embed = embed.field("Page Count", humanize_number(pages), true);
    }
    if let Some(link) = &access.web_reader_link {
        embed = embed.field("Web Reader Link", format!("[Click here!]({})", link), true);
    }
    if !info.categories.is_empty() {
        embed = embed.field("Category", info.categories.join(", "), true);
    }
    if let Some(price) = &volume.sale_info.retail_price {
        let buy = volume.sale_info.buy_link.as_deref().unwrap_or_default();
        embed = embed.field(
            "Retail Price",
            format!(
                "[{} {}]({} 'Click to buy on Google Books!')",
                price.amount, price.currency_code, buy
            ),
            true,
        );
    }
    embed = embed
        .field(
            "EPUB available?",
            availability(access.epub.is_available, access.epub.download_link.as_deref()),
            true,
        )
        .field(
            "PDF available?",
            availability(access.pdf.is_available, access.pdf.download_link.as_deref()),
            true,
        );
    let viewability = access
        .viewability
        .as_deref()
        .map(|v| title_case(&v.replace('_', " ")))
        .unwrap_or_else(|| "Unknown".to_string());
    embed
        .field("Viewability", viewability, true)
        .footer(format!("Page {} of {}", index + 1, total))
}

/// One embed per doodle
pub fn doodle_pages(doodles: &[Doodle], color: u32) -> Vec<Embed> {
    doodles
        .iter()
        .map(|doodle| {
            let mut embed = Embed::new().color(color).title(
                doodle
                    .title
                    .as_deref()
                    .unwrap_or("Doodle title missing"),
            );
            if let Some(image) = doodle.image_url() {
                embed = embed.image(image);
            }
            let published = format!("Doodle published on: {}", doodle.run_date());
            let footer = match doodle.share_text.as_deref() {
                Some(share) if !share.is_empty() => format!("{}\n{}", share, published),
                _ => published,
            };
            embed.footer(footer)
        })
        .collect()
}

/// One embed per reverse image match
pub fn reverse_pages(matches: &[ReverseImageMatch], color: u32) -> Vec<Embed> {
    let total = matches.len();
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            Embed::new()
                .title(REVERSE_TITLE)
                .description(format!("[`{}`]({})", m.domain_name, m.source_url))
                .color(color)
                .field(&m.title, &m.source_url, false)
                .footer(format!("Page: {}/{}", i + 1, total))
                .thumbnail(m.icon_url.clone())
                .image(m.image_url.clone())
        })
        .collect()
}

/// Shown when a reverse search found nothing
pub fn reverse_not_found(final_url: &str, query_image: &str, color: u32) -> Embed {
    Embed::new()
        .title(REVERSE_TITLE)
        .description(format!("[`Nothing significant found`]({})", final_url))
        .color(color)
        .thumbnail(query_image)
}
