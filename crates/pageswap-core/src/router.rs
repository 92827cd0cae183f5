//! Navigation interceptor
//!
//! Turns link clicks, popstate events and programmatic calls into in-app
//! navigations. Each navigation runs as its own task:
//!
//! normalize → pick route → header → render → swap
//!
//! Any failure hands the url to the browser for a full page load.

use std::sync::Arc;
use tokio::task::JoinHandle;

use pageswap_fetch::{HttpPageSource, PageSource};
use pageswap_navigation::{ClickEvent, HistoryState, LinkDecision};
use pageswap_transition::{TimerClock, TransitionClock, TransitionError};

use crate::activation::{ActivationRegistry, ActivationReport};
use crate::config::RouterConfig;
use crate::context::RouterContext;
use crate::host::PageHost;
use crate::routes::RouteTable;
use crate::swap::ContentSwapper;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    /// Rewrite the current history entry instead of pushing one
    pub replace: bool,
}

impl NavigationRequest {
    pub fn push(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            replace: false,
        }
    }

    pub fn replace(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            replace: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Content swapped in place
    Rendered {
        url: String,
        route: String,
        activations: ActivationReport,
    },
    /// Handed to the browser
    FullNavigation { url: String, reason: String },
    /// A newer navigation took over
    Superseded { url: String },
}

/// Back/forward event; `state` is whatever was stored with the entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopStateEvent {
    pub state: Option<serde_json::Value>,
}

impl PopStateEvent {
    pub fn new(state: Option<serde_json::Value>) -> Self {
        Self { state }
    }
}

struct RouterInner {
    context: RouterContext,
    routes: RouteTable,
    swapper: ContentSwapper,
}

pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    pub fn new(context: RouterContext, routes: RouteTable, activations: ActivationRegistry) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                context,
                routes,
                swapper: ContentSwapper::new(activations),
            }),
        }
    }

    /// Router fetching over HTTP from the host's origin with timer driven
    /// transitions
    pub fn standard(
        config: RouterConfig,
        host: Arc<dyn PageHost>,
        activations: ActivationRegistry,
    ) -> Result<Self> {
        let source = HttpPageSource::new(host.origin(), &config.fetch_options())?;
        let clock = TimerClock::with_frame_interval(config.frame_interval());
        Self::assemble(config, host, Arc::new(source), Arc::new(clock), activations)
    }

    /// Standard route table over any page source and clock
    pub fn assemble(
        config: RouterConfig,
        host: Arc<dyn PageHost>,
        source: Arc<dyn PageSource>,
        clock: Arc<dyn TransitionClock>,
        activations: ActivationRegistry,
    ) -> Result<Self> {
        let routes = RouteTable::standard(&config, source);
        let context = RouterContext::new(config, host, clock)?;
        Ok(Self::new(context, routes, activations))
    }

    pub fn context(&self) -> &RouterContext {
        &self.inner.context
    }

    pub fn activations(&self) -> &ActivationRegistry {
        self.inner.swapper.activations()
    }

    /// Handle a click. In-app links get their default prevented and a
    /// navigation spawned; everything else is left to the browser.
    pub fn on_click(&self, event: &mut ClickEvent) -> Option<JoinHandle<NavigationOutcome>> {
        match self.context().classifier().classify(event) {
            LinkDecision::Navigate(href) => {
                event.prevent_default();
                Some(self.spawn(NavigationRequest::push(href)))
            }
            LinkDecision::Ignore(reason) => {
                tracing::trace!(reason = ?reason, "Click left to browser");
                None
            }
        }
    }

    /// Replay the url stored with the entry the browser moved to
    pub fn on_popstate(&self, event: &PopStateEvent) -> JoinHandle<NavigationOutcome> {
        let url = event
            .state
            .as_ref()
            .and_then(HistoryState::from_value)
            .map(|s| s.url)
            .unwrap_or_else(|| self.context().host().location_path());

        tracing::debug!(url = %url, "Popstate");
        self.spawn(NavigationRequest::replace(url))
    }

    pub fn navigate_to(&self, url: &str) -> JoinHandle<NavigationOutcome> {
        self.spawn(NavigationRequest::push(url))
    }

    /// Render the static view if the page was loaded exactly on its path
    pub fn start(&self) -> Option<JoinHandle<NavigationOutcome>> {
        let path = self.context().host().location_path();
        let entry = self
            .inner
            .routes
            .entry_for(&path)
            .filter(|e| e.pattern.path() == path)?;

        tracing::info!(path = %path, route = %entry.handler.name(), "Rendering initial route");
        Some(self.spawn(NavigationRequest::replace(path)))
    }

    pub async fn navigate(&self, request: NavigationRequest) -> NavigationOutcome {
        let ctx = self.context();
        let url = ctx.normalize(&request.url);
        let token = ctx.transition().begin();
        let handler = self.inner.routes.resolve(&url);

        tracing::info!(
            router = %ctx.id(),
            url = %url,
            route = %handler.name(),
            generation = token.generation(),
            replace = request.replace,
            "Navigation started"
        );

        ctx.set_header_visible(handler.header_visible());

        let view = match handler.render(&url).await {
            Ok(view) => view,
            Err(e) => {
                if !token.is_current() {
                    tracing::debug!(url = %url, error = %e, "Superseded navigation failed");
                    return NavigationOutcome::Superseded { url };
                }
                let reason = e.to_string();
                ctx.fail_open(&url, &reason);
                return NavigationOutcome::FullNavigation { url, reason };
            }
        };

        match self
            .inner
            .swapper
            .swap(ctx, &token, &view, handler.exit_delay(), request.replace)
            .await
        {
            Ok(activations) => NavigationOutcome::Rendered {
                url,
                route: handler.name().to_string(),
                activations,
            },
            Err(TransitionError::Superseded { generation, current }) => {
                tracing::debug!(url = %url, generation, current, "Navigation superseded");
                NavigationOutcome::Superseded { url }
            }
            Err(e) => {
                let reason = e.to_string();
                ctx.fail_open(&url, &reason);
                NavigationOutcome::FullNavigation { url, reason }
            }
        }
    }

    fn spawn(&self, request: NavigationRequest) -> JoinHandle<NavigationOutcome> {
        let router = self.clone();
        tokio::spawn(async move { router.navigate(request).await })
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
