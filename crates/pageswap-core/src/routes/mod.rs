//! Route table
//!
//! Maps normalized urls to the handler that renders them. Static routes
//! render inline markup; everything else falls back to fetching the page.

mod fetch_route;
mod static_route;

pub use fetch_route::FetchRoute;
pub use static_route::{StaticRoute, HUB_PATH};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use pageswap_fetch::{PageFetcher, PageSource};

use crate::config::RouterConfig;
use crate::error::RenderError;

/// Markup ready to swap in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub html: String,
    /// Url recorded in history for this view
    pub history_url: String,
    pub title: Option<String>,
}

#[async_trait]
pub trait RouteHandler: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the site header is shown on this route's views
    fn header_visible(&self) -> bool;

    fn exit_delay(&self) -> Duration;

    async fn render(&self, url: &str) -> Result<RenderedView, RenderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    /// Matches urls equal to or ending with the path
    Suffix(String),
}

impl RoutePattern {
    pub fn path(&self) -> &str {
        match self {
            Self::Exact(path) | Self::Suffix(path) => path,
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(path) => url == path,
            Self::Suffix(path) => url == path || url.ends_with(path.as_str()),
        }
    }
}

pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub handler: Arc<dyn RouteHandler>,
}

pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: Arc<dyn RouteHandler>,
}

impl RouteTable {
    pub fn new(fallback: Arc<dyn RouteHandler>) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    /// The hub view on `/dashboard1`, every other url fetched
    pub fn standard(config: &RouterConfig, source: Arc<dyn PageSource>) -> Self {
        let fetcher = PageFetcher::new(
            source,
            config.container_id.clone(),
            config.fallback_selector.clone(),
        );
        Self::new(Arc::new(FetchRoute::new(fetcher, config.fetch_exit_delay()))).with_route(
            RoutePattern::Suffix(HUB_PATH.to_string()),
            Arc::new(StaticRoute::hub(config.static_exit_delay())),
        )
    }

    /// Add a route; earlier routes win on overlap
    pub fn with_route(mut self, pattern: RoutePattern, handler: Arc<dyn RouteHandler>) -> Self {
        tracing::debug!(path = %pattern.path(), route = %handler.name(), "Registered route");
        self.entries.push(RouteEntry { pattern, handler });
        self
    }

    pub fn entry_for(&self, url: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.pattern.matches(url))
    }

    pub fn resolve(&self, url: &str) -> Arc<dyn RouteHandler> {
        self.entry_for(url)
            .map(|e| Arc::clone(&e.handler))
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
