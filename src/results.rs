use serde::{Deserialize, Serialize};

/// One organic result (or answer card) from a web search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Target URL, absent for answer cards
    pub url: Option<String>,

    /// Heading text, falls back to the URL
    pub title: String,

    /// Plain text snippet
    pub description: String,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(url: Option<String>, title: String, description: String) -> Self {
        Self {
            url,
            title,
            description,
        }
    }
}

/// Everything the text extractor pulls out of a results page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResults {
    /// Results in document order, answer card first if one was found
    pub results: Vec<SearchResult>,

    /// Result count summary, empty when the page has none
    pub stats: String,

    /// Small image attached by an answer card
    pub thumbnail: Option<String>,

    /// Large image attached by an answer card
    pub image: Option<String>,
}

/// A visually similar image found by a reverse image search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseImageMatch {
    pub title: String,
    pub source_url: String,
    pub domain_name: String,
    pub image_url: String,
    pub icon_url: String,
}

/// Entry from the doodle archive
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Doodle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub high_res_url: Option<String>,
    pub share_text: Option<String>,
    #[serde(default)]
    pub run_date_array: Vec<i64>,
}

impl Doodle {
    /// Absolute image URL, preferring the high resolution variant
    pub fn image_url(&self) -> Option<String> {
        let absolute = |u: &str| {
            if u.starts_with("https:") {
                u.to_string()
            } else {
                format!("https:{}", u)
            }
        };
        match (&self.high_res_url, &self.url) {
            (Some(high), _) if !high.is_empty() => Some(absolute(high)),
            (_, Some(url)) if !url.is_empty() => Some(absolute(url)),
            _ => None,
        }
    }

    /// Run date as day-month-year
    pub fn run_date(&self) -> String {
        self.run_date_array
            .iter()
            .rev()
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Response of the Google Books volume search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeList {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub access_info: AccessInfo,
    #[serde(default)]
    pub sale_info: SaleInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub canonical_volume_link: Option<String>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u64>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub web_reader_link: Option<String>,
    #[serde(default)]
    pub epub: Availability,
    #[serde(default)]
    pub pdf: Availability,
    pub viewability: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(default)]
    pub is_available: bool,
    pub download_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    pub retail_price: Option<Price>,
    pub buy_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: f64,
    pub currency_code: String,
}
