//! Host page abstraction
//!
//! The router only touches the page through these traits: the content
//! region, the header, history and location. Browser shells implement them
//! over the DOM; `HeadlessPage` implements them in memory.

use std::sync::Arc;
use url::Url;

use pageswap_navigation::BrowserHistory;
use pageswap_transition::ContentRegion;

pub trait HeaderRegion: Send + Sync {
    fn set_visible(&self, visible: bool);

    fn is_visible(&self) -> bool;
}

pub trait PageHost: Send + Sync {
    /// Origin every href is resolved against
    fn origin(&self) -> Url;

    /// Current location pathname, without query or fragment
    fn location_path(&self) -> String;

    fn content_region(&self, id: &str) -> Option<Arc<dyn ContentRegion>>;

    fn header(&self, id: &str) -> Option<Arc<dyn HeaderRegion>>;

    fn history(&self) -> Arc<dyn BrowserHistory>;

    /// Full browser navigation to `url`; the page is replaced
    fn assign_location(&self, url: &str);

    /// Update the document title after a swap
    fn set_title(&self, _title: &str) {}
}
