//! Answer cards shown above the organic results.
//!
//! Rules are tried in order and the first one that matches wins.

use std::fmt;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parsers::{selector, text};
use crate::results::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Weather,
    Calculator,
    Definition,
    DirectAnswer,
    KnowledgePanel,
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardKind::Weather => "weather",
            CardKind::Calculator => "calculator",
            CardKind::Definition => "definition",
            CardKind::DirectAnswer => "direct answer",
            CardKind::KnowledgePanel => "knowledge panel",
        };
        f.write_str(name)
    }
}

/// A card rendered as a result, plus any images it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub kind: CardKind,
    pub result: SearchResult,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
}

impl Card {
    fn new(kind: CardKind, title: String, description: String) -> Self {
        Self {
            kind,
            result: SearchResult::new(None, title, description),
            thumbnail: None,
            image: None,
        }
    }
}

static WEATHER: LazyLock<Selector> = LazyLock::new(|| selector("div#wob_wc"));
static WEATHER_LOCATION: LazyLock<Selector> = LazyLock::new(|| selector("#wob_loc"));
static WEATHER_TEMP: LazyLock<Selector> = LazyLock::new(|| selector("span#wob_tm"));
static WEATHER_CONDITION: LazyLock<Selector> = LazyLock::new(|| selector("span#wob_dc"));
static WEATHER_ICON: LazyLock<Selector> = LazyLock::new(|| selector("img#wob_tci"));
static CALC_EXPRESSION: LazyLock<Selector> = LazyLock::new(|| selector("span.vUGUtc"));
static CALC_RESULT: LazyLock<Selector> = LazyLock::new(|| selector("span.qv3Wpe"));
static DEFINED_WORD: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"span[data-dobid="hdw"]"#));
static DEFINITION: LazyLock<Selector> = LazyLock::new(|| selector(r#"div[data-dobid="dfn"]"#));
static DIRECT_ANSWER: LazyLock<Selector> = LazyLock::new(|| selector("div.Z0LcW"));
static PANEL: LazyLock<Selector> = LazyLock::new(|| selector("div.kp-wholepage"));
static PANEL_TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"h2[data-attrid="title"]"#));
static PANEL_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector("div.kno-rdesc span"));
static PANEL_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("g-img img"));

type CardRule = fn(&Html) -> Option<Card>;

const RULES: &[CardRule] = &[
    weather,
    calculator,
    definition,
    direct_answer,
    knowledge_panel,
];

/// First card found on the page
pub fn find_card(doc: &Html) -> Option<Card> {
    RULES.iter().find_map(|rule| rule(doc))
}

fn first_text(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel)
        .next()
        .map(text::element_text)
        .filter(|t| !t.is_empty())
}

/// Image `src` made absolute; inline data URIs are ignored
fn image_src(src: &str) -> Option<String> {
    if src.starts_with("//") {
        Some(format!("https:{}", src))
    } else if src.starts_with("http://") || src.starts_with("https://") {
        Some(src.to_string())
    } else {
        None
    }
}

fn weather(doc: &Html) -> Option<Card> {
    let card = doc.select(&WEATHER).next()?;
    let temp = card.select(&WEATHER_TEMP).next().map(text::element_text)?;
    let title = match card.select(&WEATHER_LOCATION).next().map(text::element_text) {
        Some(loc) if !loc.is_empty() => format!("Weather: {}", loc),
        _ => "Weather".to_string(),
    };
    let description = match card.select(&WEATHER_CONDITION).next().map(text::element_text) {
        Some(cond) if !cond.is_empty() => format!("{}\u{b0}C, {}", temp, cond),
        _ => format!("{}\u{b0}C", temp),
    };

    let mut out = Card::new(CardKind::Weather, title, description);
    out.thumbnail = card
        .select(&WEATHER_ICON)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(image_src);
    Some(out)
}

fn calculator(doc: &Html) -> Option<Card> {
    let result = first_text(doc, &CALC_RESULT)?;
    let description = match first_text(doc, &CALC_EXPRESSION) {
        Some(expr) => format!("{} {}", expr, result),
        None => result,
    };
    Some(Card::new(
        CardKind::Calculator,
        "Calculator".to_string(),
        description,
    ))
}

fn definition(doc: &Html) -> Option<Card> {
    let meaning = first_text(doc, &DEFINITION)?;
    let title = match first_text(doc, &DEFINED_WORD) {
        Some(word) => format!("Definition: {}", word),
        None => "Definition".to_string(),
    };
    Some(Card::new(CardKind::Definition, title, meaning))
}

fn direct_answer(doc: &Html) -> Option<Card> {
    let answer = first_text(doc, &DIRECT_ANSWER)?;
    Some(Card::new(
        CardKind::DirectAnswer,
        "Answer".to_string(),
        answer,
    ))
}

fn knowledge_panel(doc: &Html) -> Option<Card> {
    let panel = doc.select(&PANEL).next()?;
    let title = panel
        .select(&PANEL_TITLE)
        .next()
        .map(text::element_text)
        .filter(|t| !t.is_empty())?;
    let description = panel
        .select(&PANEL_DESCRIPTION)
        .next()
        .map(text::element_text)
        .filter(|d| !d.is_empty())?;

    let mut out = Card::new(CardKind::KnowledgePanel, title, description);
    out.thumbnail = panel
        .select(&PANEL_IMAGE)
        .filter_map(|img| img.value().attr("src"))
        .find_map(image_src);
    Some(out)
}
