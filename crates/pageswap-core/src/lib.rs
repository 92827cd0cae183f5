//! pageswap core
//!
//! Client-side navigation for server-rendered pages. Links and history
//! events are intercepted, the next page's content fragment is fetched (or
//! rendered inline for static routes) and swapped into the content region
//! with an exit/enter transition. Anything that goes wrong falls back to a
//! normal full page load.

mod activation;
mod config;
mod context;
mod error;
mod headless;
mod host;
mod router;
mod routes;
mod swap;

pub use activation::{Activation, ActivationRegistry, ActivationReport};
pub use config::RouterConfig;
pub use context::RouterContext;
pub use error::{RenderError, RouterError};
pub use headless::{HeadlessHeader, HeadlessPage, HeadlessRegion};
pub use host::{HeaderRegion, PageHost};
pub use router::{NavigationOutcome, NavigationRequest, PopStateEvent, Router};
pub use routes::{
    FetchRoute, RenderedView, RouteEntry, RouteHandler, RoutePattern, RouteTable, StaticRoute,
    HUB_PATH,
};
pub use swap::ContentSwapper;

// Re-export component crates
pub use pageswap_fetch::{
    FetchError, FetchOptions, FetchedPage, Fragment, HttpPageSource, PageFetcher, PageSource,
};
pub use pageswap_navigation::{
    normalize, BrowserHistory, ClickEvent, ElementNode, HistoryManager, HistoryState,
    LinkClassifier, LinkDecision, Modifiers, MouseButton, NavigationError, SessionHistory,
};
pub use pageswap_transition::{
    ContentRegion, ContentTransition, ImmediateClock, NavigationToken, OverlapPolicy, TimerClock,
    TransitionClasses, TransitionClock, TransitionError, TransitionPhase,
};

pub type Result<T> = std::result::Result<T, RouterError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
