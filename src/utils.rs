/// Truncate a string to at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Cut a long query for use in a title, marking the cut with an ellipsis
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}\u{2026}", truncate_chars(text, max.saturating_sub(1)))
    } else {
        text.to_string()
    }
}

/// Collapse whitespace and fit the text into `width` characters on word
/// boundaries, appending `placeholder` when words had to be dropped
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    let mut used = 0;
    for word in words {
        let extra = word.chars().count() + usize::from(!out.is_empty());
        if used + extra > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += extra;
    }

    if out.is_empty() {
        return placeholder.trim_start().to_string();
    }
    out.push_str(placeholder);
    out
}

/// Format an integer with thousands separators
pub fn humanize_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Upper-case the first letter of each word and lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[test]
    fn test_ellipsize_long_query() {
        let query = "a".repeat(50);
        let cut = ellipsize(&query, 45);
        assert_eq!(cut.chars().count(), 45);
        assert!(cut.ends_with('\u{2026}'));
        assert_eq!(ellipsize("short", 45), "short");
    }

    #[test]
    fn test_shorten_on_word_boundary() {
        assert_eq!(shorten("Hello  world", 20, "..."), "Hello world");
        assert_eq!(shorten("The quick brown fox jumps", 15, "..."), "The quick...");
        assert_eq!(shorten("Supercalifragilistic", 5, "..."), "...");
    }

    #[test]
    fn test_humanize_number() {
        assert_eq!(humanize_number(0), "0");
        assert_eq!(humanize_number(999), "999");
        assert_eq!(humanize_number(1000), "1,000");
        assert_eq!(humanize_number(1234567), "1,234,567");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ALL PAGES"), "All Pages");
        assert_eq!(title_case("no pages"), "No Pages");
    }
}
