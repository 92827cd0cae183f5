//! In-memory page host
//!
//! Holds the content region, header flag, session history and location in
//! memory. Used for server-side rendering checks and for tests.

use parking_lot::RwLock;
use std::sync::Arc;
use url::Url;

use pageswap_navigation::{BrowserHistory, HistoryState, SessionHistory};
use pageswap_transition::ContentRegion;

use crate::host::{HeaderRegion, PageHost};
use crate::router::PopStateEvent;

#[derive(Default)]
pub struct HeadlessRegion {
    html: RwLock<String>,
    classes: RwLock<Vec<String>>,
}

impl HeadlessRegion {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: RwLock::new(html.into()),
            classes: RwLock::new(Vec::new()),
        }
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.read().clone()
    }
}

impl ContentRegion for HeadlessRegion {
    fn inner_html(&self) -> String {
        self.html.read().clone()
    }

    fn set_inner_html(&self, html: &str) {
        *self.html.write() = html.to_string();
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.classes.write();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.write().retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.read().iter().any(|c| c == class)
    }
}

pub struct HeadlessHeader {
    visible: RwLock<bool>,
}

impl HeadlessHeader {
    pub fn new() -> Self {
        Self {
            visible: RwLock::new(true),
        }
    }
}

impl Default for HeadlessHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRegion for HeadlessHeader {
    fn set_visible(&self, visible: bool) {
        *self.visible.write() = visible;
    }

    fn is_visible(&self) -> bool {
        *self.visible.read()
    }
}

pub struct HeadlessPage {
    origin: Url,
    container_id: String,
    header_id: String,
    region: Option<Arc<HeadlessRegion>>,
    header: Option<Arc<HeadlessHeader>>,
    history: SessionHistory,
    title: RwLock<Option<String>>,
    full_navigations: RwLock<Vec<String>>,
}

impl HeadlessPage {
    /// A page loaded at `initial_url` with `#main-content` and `#site-header`
    pub fn new(origin: Url, initial_url: &str) -> Self {
        Self {
            origin,
            container_id: "main-content".to_string(),
            header_id: "site-header".to_string(),
            region: Some(Arc::new(HeadlessRegion::default())),
            header: Some(Arc::new(HeadlessHeader::new())),
            history: SessionHistory::new(initial_url),
            title: RwLock::new(None),
            full_navigations: RwLock::new(Vec::new()),
        }
    }

    pub fn with_ids(mut self, container_id: &str, header_id: &str) -> Self {
        self.container_id = container_id.to_string();
        self.header_id = header_id.to_string();
        self
    }

    pub fn with_content(mut self, html: &str) -> Self {
        self.region = Some(Arc::new(HeadlessRegion::new(html)));
        self
    }

    pub fn without_container(mut self) -> Self {
        self.region = None;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = None;
        self
    }

    pub fn region(&self) -> Option<&Arc<HeadlessRegion>> {
        self.region.as_ref()
    }

    /// Current content markup, empty when the page has no container
    pub fn content(&self) -> String {
        self.region
            .as_ref()
            .map(|r| r.inner_html())
            .unwrap_or_default()
    }

    pub fn header_visible(&self) -> bool {
        self.header.as_ref().is_some_and(|h| h.is_visible())
    }

    pub fn session_history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn title(&self) -> Option<String> {
        self.title.read().clone()
    }

    /// Urls handed to the browser for a full page load
    pub fn full_navigations(&self) -> Vec<String> {
        self.full_navigations.read().clone()
    }

    /// Press the back button; returns the event the browser would fire
    pub fn back(&self) -> Option<PopStateEvent> {
        self.history.back().map(|entry| PopStateEvent::new(entry.state))
    }

    pub fn forward(&self) -> Option<PopStateEvent> {
        self.history.forward().map(|entry| PopStateEvent::new(entry.state))
    }

    fn current_url(&self) -> String {
        self.history
            .current()
            .map(|entry| {
                entry
                    .state
                    .as_ref()
                    .and_then(HistoryState::from_value)
                    .map(|s| s.url)
                    .unwrap_or(entry.url)
            })
            .unwrap_or_else(|| "/".to_string())
    }
}

impl PageHost for HeadlessPage {
    fn origin(&self) -> Url {
        self.origin.clone()
    }

    fn location_path(&self) -> String {
        let url = self.current_url();
        match self.origin.join(&url) {
            Ok(resolved) => resolved.path().to_string(),
            Err(_) => url,
        }
    }

    fn content_region(&self, id: &str) -> Option<Arc<dyn ContentRegion>> {
        if id != self.container_id {
            return None;
        }
        self.region
            .as_ref()
            .map(|r| Arc::clone(r) as Arc<dyn ContentRegion>)
    }

    fn header(&self, id: &str) -> Option<Arc<dyn HeaderRegion>> {
        if id != self.header_id {
            return None;
        }
        self.header
            .as_ref()
            .map(|h| Arc::clone(h) as Arc<dyn HeaderRegion>)
    }

    fn history(&self) -> Arc<dyn BrowserHistory> {
        Arc::new(self.history.clone())
    }

    fn assign_location(&self, url: &str) {
        tracing::info!(url = %url, "Full page navigation");
        self.full_navigations.write().push(url.to_string());
    }

    fn set_title(&self, title: &str) {
        *self.title.write() = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(initial: &str) -> HeadlessPage {
        HeadlessPage::new(Url::parse("https://fit.example").unwrap(), initial)
    }

    #[test]
    fn test_region_lookup_by_id() {
        let page = page("/");
        assert!(page.content_region("main-content").is_some());
        assert!(page.content_region("other").is_none());
        assert!(page.header("site-header").is_some());

        let page = page.with_ids("content", "top");
        assert!(page.content_region("content").is_some());
        assert!(page.header("top").is_some());
    }

    #[test]
    fn test_location_follows_history() {
        let page = page("/meals?day=2");
        assert_eq!(page.location_path(), "/meals");

        page.history()
            .push_state(HistoryState::new("/activities").to_value().unwrap(), "/activities")
            .unwrap();
        assert_eq!(page.location_path(), "/activities");

        let event = page.back().unwrap();
        assert!(event.state.is_none());
        assert_eq!(page.location_path(), "/meals");
    }

    #[test]
    fn test_region_classes_are_a_set() {
        let region = HeadlessRegion::default();
        region.add_class("page-enter");
        region.add_class("page-enter");
        assert_eq!(region.classes(), vec!["page-enter".to_string()]);
        region.remove_class("page-enter");
        assert!(!region.has_class("page-enter"));
    }

    #[test]
    fn test_assign_location_is_recorded() {
        let page = page("/");
        page.assign_location("/missing");
        assert_eq!(page.full_navigations(), vec!["/missing".to_string()]);
        assert_eq!(page.history().len(), 1);
    }
}
