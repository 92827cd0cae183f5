//! pageswap navigation primitives
//!
//! - Href normalization to `path?query`
//! - Click classification: in-app navigation or browser default
//! - History sync: one entry per completed in-app navigation

mod error;
mod history;
mod link;
mod normalize;

pub use error::NavigationError;
pub use history::{BrowserHistory, HistoryEntry, HistoryManager, HistoryState, SessionHistory};
pub use link::{
    ClickEvent, ElementNode, IgnoreReason, LinkClassifier, LinkDecision, Modifiers, MouseButton,
    DEFAULT_INTERNAL_ATTRIBUTE,
};
pub use normalize::{normalize, Normalizer};

pub type Result<T> = std::result::Result<T, NavigationError>;
