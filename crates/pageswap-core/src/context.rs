//! Router context
//!
//! Everything one router needs from the page, resolved once at startup and
//! passed to each component. Routers on different pages share nothing.

use std::sync::Arc;
use uuid::Uuid;

use pageswap_navigation::{HistoryManager, LinkClassifier, Normalizer};
use pageswap_transition::{ContentTransition, TransitionClock};

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::host::{HeaderRegion, PageHost};
use crate::Result;

pub struct RouterContext {
    /// Identifies this router in logs
    id: Uuid,
    config: RouterConfig,
    host: Arc<dyn PageHost>,
    normalizer: Normalizer,
    classifier: LinkClassifier,
    /// Site header, if the page has one
    header: Option<Arc<dyn HeaderRegion>>,
    history: HistoryManager,
    /// Drives the content region through exit and enter
    transition: ContentTransition,
}

impl RouterContext {
    /// Resolve the page's elements. Fails when the content container is
    /// missing, in which case the page keeps plain browser navigation.
    pub fn new(
        config: RouterConfig,
        host: Arc<dyn PageHost>,
        clock: Arc<dyn TransitionClock>,
    ) -> Result<Self> {
        config.validate()?;

        let region = host
            .content_region(&config.container_id)
            .ok_or_else(|| RouterError::MissingContainer(config.container_id.clone()))?;

        let header = host.header(&config.header_id);
        if header.is_none() {
            tracing::debug!(id = %config.header_id, "No site header on page");
        }

        let transition =
            ContentTransition::new(region, config.classes.clone(), clock, config.overlap);
        let id = Uuid::new_v4();

        tracing::info!(
            router = %id,
            origin = %host.origin(),
            container = %config.container_id,
            "Router context created"
        );

        Ok(Self {
            id,
            normalizer: Normalizer::new(host.origin()),
            classifier: LinkClassifier::with_internal_attribute(config.internal_attribute.clone()),
            header,
            history: HistoryManager::new(host.history()),
            transition,
            host,
            config,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn host(&self) -> &Arc<dyn PageHost> {
        &self.host
    }

    pub fn classifier(&self) -> &LinkClassifier {
        &self.classifier
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn transition(&self) -> &ContentTransition {
        &self.transition
    }

    /// `path?query` of `url` against the page origin
    pub fn normalize(&self, url: &str) -> String {
        self.normalizer.normalize(url)
    }

    pub fn set_header_visible(&self, visible: bool) {
        if let Some(header) = &self.header {
            header.set_visible(visible);
        }
    }

    /// Hand `url` to the browser for a full page load
    pub fn fail_open(&self, url: &str, reason: &str) {
        tracing::warn!(router = %self.id, url = %url, reason = %reason, "Falling back to full navigation");
        self.host.assign_location(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessPage;
    use pageswap_transition::ImmediateClock;
    use url::Url;

    fn origin() -> Url {
        Url::parse("https://fit.example").unwrap()
    }

    #[test]
    fn test_missing_container() {
        let host: Arc<dyn PageHost> = Arc::new(HeadlessPage::new(origin(), "/").without_container());
        let result = RouterContext::new(RouterConfig::default(), host, Arc::new(ImmediateClock));
        assert!(matches!(result, Err(RouterError::MissingContainer(id)) if id == "main-content"));
    }

    #[test]
    fn test_header_is_optional() {
        let page = Arc::new(HeadlessPage::new(origin(), "/").without_header());
        let host: Arc<dyn PageHost> = page.clone();
        let ctx = RouterContext::new(RouterConfig::default(), host, Arc::new(ImmediateClock)).unwrap();
        ctx.set_header_visible(false);
        assert!(!page.header_visible());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let host: Arc<dyn PageHost> = Arc::new(HeadlessPage::new(origin(), "/"));
        let config = RouterConfig {
            header_id: String::new(),
            ..Default::default()
        };
        let result = RouterContext::new(config, host, Arc::new(ImmediateClock));
        assert!(matches!(result, Err(RouterError::Config(_))));
    }

    #[test]
    fn test_independent_contexts() {
        let a = Arc::new(HeadlessPage::new(origin(), "/"));
        let b = Arc::new(HeadlessPage::new(origin(), "/"));
        let host_a: Arc<dyn PageHost> = a.clone();
        let host_b: Arc<dyn PageHost> = b.clone();
        let ctx_a = RouterContext::new(RouterConfig::default(), host_a, Arc::new(ImmediateClock)).unwrap();
        let ctx_b = RouterContext::new(RouterConfig::default(), host_b, Arc::new(ImmediateClock)).unwrap();

        assert_ne!(ctx_a.id(), ctx_b.id());
        ctx_a.set_header_visible(false);
        ctx_a.fail_open("/missing", "test");

        assert!(!a.header_visible());
        assert!(b.header_visible());
        assert_eq!(a.full_navigations(), vec!["/missing".to_string()]);
        assert!(b.full_navigations().is_empty());
        assert_eq!(ctx_a.normalize("https://fit.example/meals#top"), "/meals");
    }
}
