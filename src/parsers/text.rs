use scraper::ElementRef;

use crate::utils::truncate_chars;

/// Options for turning rendered page text into plain text
#[derive(Debug, Clone, Copy)]
pub struct PlainTextOptions {
    /// Keep line structure (one output line per non-empty input line)
    pub preserve_line_breaks: bool,
    /// Cut the result to this many characters
    pub max_chars: Option<usize>,
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        Self {
            preserve_line_breaks: false,
            max_chars: None,
        }
    }
}

/// Collapse all whitespace runs into single spaces and trim
pub fn plain_text(text: &str) -> String {
    plain_text_with_options(text, &PlainTextOptions::default())
}

/// Plain text with specific options
pub fn plain_text_with_options(text: &str, options: &PlainTextOptions) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let lines = non_empty_lines(text);
    let joined = if options.preserve_line_breaks {
        lines.join("\n")
    } else {
        lines.join(" ")
    };

    match options.max_chars {
        Some(max) => truncate_chars(&joined, max).trim_end().to_string(),
        None => joined,
    }
}

/// Text content of an element, whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    plain_text(&element.text().collect::<String>())
}

/// Text content of an element cut to `max` characters
pub fn element_text_bounded(element: ElementRef<'_>, max: usize) -> String {
    let options = PlainTextOptions {
        max_chars: Some(max),
        ..PlainTextOptions::default()
    };
    plain_text_with_options(&element.text().collect::<String>(), &options)
}

/// Lines with their inner whitespace collapsed, empty lines removed
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize_whitespace_in_segment)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Normalizes whitespace within a single line
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
