use crate::parsers::html::{self, DESCRIPTION_LIMIT, MISSING_DESCRIPTION};
use crate::results::SearchResult;

/// A result container the way the results page lays it out
fn container(href: &str, title: Option<&str>, snippet: Option<&str>) -> String {
    let title = title
        .map(|t| format!(r#"<h3 class="LC20lb MBeuO DKV0Md">{}</h3>"#, t))
        .unwrap_or_default();
    let snippet = snippet
        .map(|s| format!(r#"<div class="kb0PBd"><div class="VwiC3b yXK7lf">{}</div></div>"#, s))
        .unwrap_or_default();
    format!(
        r#"<div class="g tF2Cxc"><div class="yuRUbf"><a href="{}">{}<cite>{}</cite></a></div>{}</div>"#,
        href, title, href, snippet
    )
}

fn page(body: &str) -> String {
    format!(
        r#"<html><body><div id="result-stats">About 1,230 results<nobr> (0.31 seconds)&nbsp;</nobr></div><div id="rso">{}</div></body></html>"#,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_result() {
        let html = page(&container(
            "https://example.com",
            Some("Example Domain"),
            Some("An example description."),
        ));
        let parsed = html::parse(&html);
        assert_eq!(
            parsed.results,
            vec![SearchResult::new(
                Some("https://example.com".to_string()),
                "Example Domain".to_string(),
                "An example description.".to_string(),
            )]
        );
        assert_eq!(parsed.stats, "About 1,230 results (0.31 seconds)");
    }

    #[test]
    fn test_no_containers() {
        let parsed = html::parse("<html><body><p>Your search did not match any documents.</p></body></html>");
        assert!(parsed.results.is_empty());
        assert_eq!(parsed.stats, "");
        assert!(parsed.thumbnail.is_none());
    }

    #[test]
    fn test_empty_document() {
        let parsed = html::parse("");
        assert!(parsed.results.is_empty());
        assert_eq!(parsed.stats, "");
    }

    #[test]
    fn test_container_without_link_block_is_skipped() {
        let body = format!(
            r#"<div class="g tF2Cxc"><div class="VwiC3b">orphan snippet</div></div>{}"#,
            container("https://b.example", Some("B"), Some("second"))
        );
        let parsed = html::parse(&page(&body));
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].title, "B");
        assert!(parsed.results.iter().all(|r| !r.title.is_empty()));
    }

    #[test]
    fn test_container_with_empty_href_is_skipped() {
        let body = container("", None, Some("nothing to link"));
        let parsed = html::parse(&page(&body));
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_url() {
        let body = container("https://no-heading.example/page", None, Some("text"));
        let parsed = html::parse(&page(&body));
        assert_eq!(parsed.results[0].title, "https://no-heading.example/page");
    }

    #[test]
    fn test_missing_snippet() {
        let body = container("https://a.example", Some("A"), None);
        let parsed = html::parse(&page(&body));
        assert_eq!(parsed.results[0].description, MISSING_DESCRIPTION);
    }

    #[test]
    fn test_description_is_bounded_and_single_line() {
        let long = format!("first line\n\n{}", "word ".repeat(300));
        let body = container("https://a.example", Some("A"), Some(&long));
        let parsed = html::parse(&page(&body));
        let description = &parsed.results[0].description;
        assert!(description.chars().count() <= DESCRIPTION_LIMIT);
        assert!(description.starts_with("first line word"));
        assert!(!description.contains('\n'));
    }

    #[test]
    fn test_document_order_is_kept() {
        let body = ["one", "two", "three"]
            .iter()
            .map(|n| container(&format!("https://{}.example", n), Some(*n), Some(*n)))
            .collect::<String>();
        let parsed = html::parse(&page(&body));
        let titles: Vec<_> = parsed.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[test]
    fn test_snippet_outside_expected_parent_is_ignored() {
        let body = r#"<div class="g tF2Cxc"><div class="yuRUbf"><a href="https://a.example"><h3 class="LC20lb">A</h3></a></div><div class="VwiC3b">loose</div></div>"#;
        let parsed = html::parse(&page(body));
        assert_eq!(parsed.results[0].description, MISSING_DESCRIPTION);
    }
}
