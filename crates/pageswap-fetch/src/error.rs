//! Fetch error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Network error ({kind}) for {url}: {message}")]
    Network {
        kind: &'static str,
        url: String,
        message: String,
    },

    #[error("No content fragment in response for {0}")]
    MissingFragment(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn network(url: &str, e: &reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connect"
        } else if e.is_redirect() {
            "redirect"
        } else if e.is_body() || e.is_decode() {
            "body"
        } else if e.is_request() {
            "request"
        } else {
            "unknown"
        };

        Self::Network {
            kind,
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
