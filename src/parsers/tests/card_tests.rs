use crate::parsers::html;
use crate::parsers::cards::{self, CardKind};
use scraper::Html;

fn organic(title: &str) -> String {
    format!(
        r#"<div class="g tF2Cxc"><div class="yuRUbf"><a href="https://{0}.example"><h3 class="LC20lb">{0}</h3></a></div></div>"#,
        title
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculator_card_goes_first() {
        let html = format!(
            r#"<div><span class="vUGUtc">12 * 12 =</span><span class="qv3Wpe">144</span></div>{}"#,
            organic("math")
        );
        let parsed = html::parse(&html);
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "Calculator");
        assert_eq!(parsed.results[0].description, "12 * 12 = 144");
        assert!(parsed.results[0].url.is_none());
        assert_eq!(parsed.results[1].title, "math");
    }

    #[test]
    fn test_cards_can_be_disabled() {
        let html = format!(r#"<span class="qv3Wpe">144</span>{}"#, organic("math"));
        let parsed = html::parse_with_cards(&html, false);
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].title, "math");
    }

    #[test]
    fn test_weather_card_sets_thumbnail() {
        let html = r#"<div id="wob_wc"><div id="wob_loc">Oslo</div><span id="wob_tm">7</span><span id="wob_dc">Cloudy</span><img id="wob_tci" src="//ssl.gstatic.com/onebox/weather/64/cloudy.png"></div>"#;
        let card = cards::find_card(&Html::parse_document(html)).unwrap();
        assert_eq!(card.kind, CardKind::Weather);
        assert_eq!(card.result.title, "Weather: Oslo");
        assert_eq!(card.result.description, "7\u{b0}C, Cloudy");
        assert_eq!(
            card.thumbnail.as_deref(),
            Some("https://ssl.gstatic.com/onebox/weather/64/cloudy.png")
        );
    }

    #[test]
    fn test_definition_card() {
        let html = r#"<span data-dobid="hdw">ferris</span><div data-dobid="dfn"><span>a small crab.</span></div>"#;
        let card = cards::find_card(&Html::parse_document(html)).unwrap();
        assert_eq!(card.kind, CardKind::Definition);
        assert_eq!(card.result.title, "Definition: ferris");
        assert_eq!(card.result.description, "a small crab.");
    }

    #[test]
    fn test_knowledge_panel_ignores_inline_images() {
        let html = r#"<div class="kp-wholepage"><h2 data-attrid="title">Rust</h2><div class="kno-rdesc"><span>A language.</span></div><g-img><img src="data:image/gif;base64,R0lG"></g-img><g-img><img src="https://example.com/rust.png"></g-img></div>"#;
        let card = cards::find_card(&Html::parse_document(html)).unwrap();
        assert_eq!(card.kind, CardKind::KnowledgePanel);
        assert_eq!(card.thumbnail.as_deref(), Some("https://example.com/rust.png"));
    }

    #[test]
    fn test_page_without_cards() {
        assert!(cards::find_card(&Html::parse_document(&organic("plain"))).is_none());
    }
}
