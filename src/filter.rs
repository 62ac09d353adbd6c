use serde::{Deserialize, Serialize};
use url::Url;

/// Hosts whose images are page furniture rather than search results
pub const DEFAULT_EXCLUDED_DOMAINS: &[&str] = &["google.com", "gstatic.com"];

/// Configuration for the host blocklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostFilterConfig {
    /// Domains to drop; subdomains are dropped as well
    #[serde(default = "default_excluded_domains")]
    pub excluded_domains: Vec<String>,
}

fn default_excluded_domains() -> Vec<String> {
    DEFAULT_EXCLUDED_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

impl Default for HostFilterConfig {
    fn default() -> Self {
        Self {
            excluded_domains: default_excluded_domains(),
        }
    }
}

/// Drops URLs served from blocklisted hosts
#[derive(Debug, Clone)]
pub struct HostFilter {
    excluded: Vec<String>,
}

impl Default for HostFilter {
    fn default() -> Self {
        Self::new(HostFilterConfig::default())
    }
}

impl HostFilter {
    /// Create a new filter from configuration
    pub fn new(config: HostFilterConfig) -> Self {
        let excluded = config
            .excluded_domains
            .into_iter()
            .map(|d| d.trim_start_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { excluded }
    }

    /// Whether the URL may be returned as a result.
    /// URLs that do not parse or have no host are rejected.
    pub fn allows(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                ::log::debug!("Dropping unparsable URL {}: {}", url, e);
                return false;
            }
        };
        let host = match parsed.host_str() {
            Some(h) => h.to_ascii_lowercase(),
            None => return false,
        };
        !self.is_excluded_host(&host)
    }

    /// Check a host against the blocklist, matching the domain and its subdomains
    fn is_excluded_host(&self, host: &str) -> bool {
        self.excluded.iter().any(|domain| {
            host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_domain_and_subdomains() {
        let filter = HostFilter::default();
        assert!(!filter.allows("https://google.com/logo.png"));
        assert!(!filter.allows("https://www.google.com/logo.png"));
        assert!(!filter.allows("https://encrypted-tbn0.gstatic.com/images?q=a.jpg"));
        assert!(filter.allows("https://example.com/cat.png"));
    }

    #[test]
    fn test_lookalike_host_is_allowed() {
        let filter = HostFilter::default();
        assert!(filter.allows("https://notgoogle.com/cat.png"));
        assert!(filter.allows("https://example.com/google.com/cat.png"));
    }

    #[test]
    fn test_custom_config() {
        let filter = HostFilter::new(HostFilterConfig {
            excluded_domains: vec![".Example.org".to_string()],
        });
        assert!(!filter.allows("https://img.example.org/a.gif"));
        assert!(filter.allows("https://www.google.com/a.gif"));
    }

    #[test]
    fn test_unparsable_url_is_rejected() {
        assert!(!HostFilter::default().allows("not a url"));
    }
}
