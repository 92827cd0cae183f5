//! Page sources
//!
//! `PageSource` is the network seam. `HttpPageSource` issues the navigation
//! GET with reqwest; hosts with their own transport implement the trait.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::Result;

/// A successful navigation response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Url as requested by the router
    pub url: String,
    /// Url after redirects
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url`. Any non-2xx status is an error.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Header marking the request as an in-app navigation
    pub navigation_header: String,
    pub navigation_header_value: String,
    pub user_agent: Option<String>,
    /// No timeout unless set
    pub timeout: Option<Duration>,
    pub max_redirects: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            navigation_header: "X-Requested-With".to_string(),
            navigation_header_value: "XMLHttpRequest".to_string(),
            user_agent: None,
            timeout: None,
            max_redirects: 10,
        }
    }
}

pub struct HttpPageSource {
    client: reqwest::Client,
    origin: Url,
    header_name: HeaderName,
    header_value: HeaderValue,
}

impl HttpPageSource {
    pub fn new(origin: Url, options: &FetchOptions) -> Result<Self> {
        let header_name = HeaderName::from_bytes(options.navigation_header.as_bytes())
            .map_err(|e| FetchError::Client(format!("navigation header name: {e}")))?;
        let header_value = HeaderValue::from_str(&options.navigation_header_value)
            .map_err(|e| FetchError::Client(format!("navigation header value: {e}")))?;

        let mut builder = reqwest::Client::builder().redirect(Policy::limited(options.max_redirects));
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = options.user_agent.as_deref() {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            origin,
            header_name,
            header_value,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        self.origin
            .join(url)
            .map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let target = self.resolve(url)?;

        let resp = self
            .client
            .get(target)
            .header(self.header_name.clone(), self.header_value.clone())
            .send()
            .await
            .map_err(|e| FetchError::network(url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = resp.url().to_string();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::network(url, &e))?;

        tracing::debug!(
            url = %url,
            final_url = %final_url,
            status = status.as_u16(),
            bytes = body.len(),
            "Fetched page"
        );

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}
