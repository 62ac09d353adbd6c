use thiserror::Error;

use crate::parsers::script::ScriptError;

/// Errors that end a single command invocation
#[derive(Debug, Error)]
pub enum SearchError {
    /// The remote answered with something other than 200
    #[error("HTTP status {0}")]
    Http(u16),

    /// No response arrived within the client timeout
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or body read failure
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not the JSON we expected
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The blocking extraction task panicked or was cancelled
    #[error("extraction task failed: {0}")]
    Task(String),

    /// An inline page script could not be evaluated
    #[error("script evaluation failed: {0}")]
    Script(#[from] ScriptError),
}

impl SearchError {
    /// Message shown to the invoking user
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Http(status) => format!("https://http.cat/{}", status),
            SearchError::Timeout => "Operation timed out.".to_string(),
            SearchError::Request(_) | SearchError::Task(_) => {
                "Something went wrong while searching.".to_string()
            }
            SearchError::Json(_) | SearchError::Script(_) => {
                "Could not read the response.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if let Some(status) = err.status() {
            SearchError::Http(status.as_u16())
        } else {
            SearchError::Request(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for SearchError {
    fn from(err: tokio::task::JoinError) -> Self {
        SearchError::Task(err.to_string())
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(SearchError::Http(404).user_message(), "https://http.cat/404");
        assert_eq!(SearchError::Timeout.user_message(), "Operation timed out.");
    }
}
