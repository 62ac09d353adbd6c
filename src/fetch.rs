use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::CogConfig;
use crate::errors::SearchError;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Client hints sent along with the user agent
const BROWSER_HINTS: &[(&str, &str)] = &[
    ("upgrade-insecure-requests", "1"),
    ("sec-ch-arch", "x86"),
    ("sec-ch-viewport-width", "1920"),
    ("sec-ch-bitness", "32"),
];

/// Whether a search may return unrestricted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFilter {
    Safe,
    Unrestricted,
}

impl ContentFilter {
    pub fn from_nsfw_allowed(allowed: bool) -> Self {
        if allowed {
            ContentFilter::Unrestricted
        } else {
            ContentFilter::Safe
        }
    }

    pub fn is_safe(self) -> bool {
        self == ContentFilter::Safe
    }
}

/// Response body together with the URL it was finally served from
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: String,
    pub final_url: String,
}

/// Process-wide HTTP client with a browser-like header set.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build the shared client from configuration
    pub fn new(config: &CogConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .default_headers(browser_headers(config))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .deflate(true)
            .build()?;
        Ok(Self { client })
    }

    /// GET a page. Any status other than 200 is an error.
    pub async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<Fetched, SearchError> {
        ::log::info!("Fetching {}", url);
        let response = self.client.get(url).query(params).send().await?;
        check_status(response.status())?;

        let final_url = response.url().to_string();
        let body = response.text().await?;
        ::log::debug!("Fetched {} bytes from {}", body.len(), final_url);
        Ok(Fetched { body, final_url })
    }

    /// GET a search page, asking for safe results unless unrestricted content is allowed
    pub async fn fetch_filtered(
        &self,
        url: &str,
        params: &[(&str, &str)],
        filter: ContentFilter,
    ) -> Result<Fetched, SearchError> {
        let mut params = params.to_vec();
        if filter.is_safe() {
            params.push(("safe", "active"));
        }
        self.fetch(url, &params).await
    }

    /// GET and decode a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        let fetched = self.fetch(url, params).await?;
        Ok(serde_json::from_str(&fetched.body)?)
    }
}

fn check_status(status: StatusCode) -> Result<(), SearchError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        ::log::info!("Request failed with status {}", status);
        Err(SearchError::Http(status.as_u16()))
    }
}

fn browser_headers(config: &CogConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, USER_AGENT, &config.user_agent);
    insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language);
    insert_header(&mut headers, ACCEPT, ACCEPT_HTML);
    for (name, value) in BROWSER_HINTS {
        insert_header(&mut headers, HeaderName::from_static(*name), value);
    }
    headers
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(e) => ::log::warn!("Ignoring invalid value for header {}: {}", name, e),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// A complete 200 response carrying `body`
    pub(crate) fn ok_response(content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            content_type,
            body.len(),
            body
        )
    }

    /// Serve one canned HTTP response on a local port, returning the base URL
    /// and a handle resolving to the raw request that was received
    pub(crate) async fn serve_once(
        response: impl Into<String>,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let response = response.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_ok_response_with_browser_headers_and_safe_search() {
        let (base, request) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
        )
        .await;
        let fetcher = Fetcher::new(&CogConfig::default()).unwrap();
        let fetched = fetcher
            .fetch_filtered(&format!("{}/search", base), &[("q", "rust lang")], ContentFilter::Safe)
            .await
            .unwrap();
        assert_eq!(fetched.body, "hello");
        assert!(fetched.final_url.starts_with(&base));

        let request = request.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /search?q=rust+lang&safe=active "));
        assert!(request.contains("user-agent: mozilla/5.0"));
        assert!(request.contains("sec-ch-viewport-width: 1920"));
    }

    #[tokio::test]
    async fn test_unrestricted_search_has_no_safe_flag() {
        let (base, request) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let fetcher = Fetcher::new(&CogConfig::default()).unwrap();
        fetcher
            .fetch_filtered(&base, &[("q", "x")], ContentFilter::Unrestricted)
            .await
            .unwrap();
        let request = request.await.unwrap();
        assert!(!request.contains("safe=active"));
    }

    #[tokio::test]
    async fn test_non_200_status_is_http_error() {
        let (base, _request) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let fetcher = Fetcher::new(&CogConfig::default()).unwrap();
        let err = fetcher.fetch(&base, &[]).await.unwrap_err();
        assert!(matches!(err, SearchError::Http(404)));
        assert_eq!(err.user_message(), "https://http.cat/404");
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = CogConfig {
            request_timeout_secs: 1,
            ..CogConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();
        let err = fetcher
            .fetch(&format!("http://{}", addr), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Timeout));
        assert_eq!(err.user_message(), "Operation timed out.");
    }

    #[tokio::test]
    async fn test_get_json() {
        let (base, _request) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 17\r\nConnection: close\r\n\r\n[\"q\",[\"q1\",\"q2\"]]",
        )
        .await;
        let fetcher = Fetcher::new(&CogConfig::default()).unwrap();
        let value: serde_json::Value = fetcher.get_json(&base, &[]).await.unwrap();
        assert_eq!(value, serde_json::json!(["q", ["q1", "q2"]]));
    }
}
