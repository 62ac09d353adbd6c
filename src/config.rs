use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::ConfigError;
use crate::filter::HostFilterConfig;

/// Environment variable that overrides the Google Books API key
pub const BOOKS_API_KEY_ENV: &str = "GOOGLE_BOOKS_API_KEY";

/// Configuration shared by the cogs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CogConfig {
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How long a result menu waits for input before closing
    #[serde(default = "default_menu_timeout")]
    pub menu_timeout_secs: u64,

    /// Embed colour as 0xRRGGBB
    #[serde(default = "default_embed_color")]
    pub embed_color: u32,

    /// API key for the Google Books volume search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books_api_key: Option<String>,

    /// Whether to look for answer cards on the results page
    #[serde(default = "default_cards")]
    pub cards: bool,

    /// Hosts dropped from image search results
    #[serde(default)]
    pub image_filter: HostFilterConfig,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/99.0.4844.51 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-GB,en-US;q=0.9,en;q=0.8".to_string()
}

/// Default request timeout, seconds
fn default_request_timeout() -> u64 {
    30
}

/// Default menu timeout, seconds
fn default_menu_timeout() -> u64 {
    180
}

fn default_embed_color() -> u32 {
    0x4285F4
}

fn default_cards() -> bool {
    true
}

impl Default for CogConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            request_timeout_secs: default_request_timeout(),
            menu_timeout_secs: default_menu_timeout(),
            embed_color: default_embed_color(),
            books_api_key: None,
            cards: default_cards(),
            image_filter: HostFilterConfig::default(),
        }
    }
}

impl CogConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply overrides taken from the process environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(BOOKS_API_KEY_ENV) {
            if !key.is_empty() {
                self.books_api_key = Some(key);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = CogConfig::from_json(r#"{"embed_color": 255}"#).unwrap();
        assert_eq!(config.embed_color, 255);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.menu_timeout_secs, 180);
        assert!(config.cards);
        assert!(config.books_api_key.is_none());
        assert_eq!(
            config.image_filter.excluded_domains,
            vec!["google.com", "gstatic.com"]
        );
    }

    #[test]
    fn test_image_filter_override() {
        let config =
            CogConfig::from_json(r#"{"image_filter": {"excluded_domains": ["example.org"]}}"#)
                .unwrap();
        assert_eq!(config.image_filter.excluded_domains, vec!["example.org"]);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(CogConfig::from_json("{not json").is_err());
    }
}
