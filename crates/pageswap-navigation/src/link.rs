//! Link click classification
//!
//! Decides whether a click should be handled as in-app navigation:
//! - nearest enclosing `<a>` along the event path
//! - `http*`, `mailto:` and targeted links go to the browser
//! - the internal marker attribute or a `/`-prefixed href means in-app

use serde::{Deserialize, Serialize};

/// Default attribute that forces in-app navigation
pub const DEFAULT_INTERNAL_ATTRIBUTE: &str = "data-internal";

/// An element on the path of a DOM event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// Shorthand for `<a href="...">`
    pub fn anchor(href: impl Into<String>) -> Self {
        Self::new("a").with_attr("href", href)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into().to_lowercase(), value.into()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is_anchor(&self) -> bool {
        self.tag == "a"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click as delivered by the host, target element first
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    /// Event path from the target up to the document root
    pub path: Vec<ElementNode>,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(path: Vec<ElementNode>) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    /// Click directly on a single element with no ancestors
    pub fn on(element: ElementNode) -> Self {
        Self::new(vec![element])
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Nearest enclosing anchor, like `Element.closest("a")`
    pub fn closest_anchor(&self) -> Option<&ElementNode> {
        self.path.iter().find(|el| el.is_anchor())
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Why a click was left to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    NoAnchor,
    NoHref,
    External,
    Targeted,
    Download,
    ModifiedClick,
    AlreadyHandled,
    NotInternal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    /// Navigate in-app to the raw href
    Navigate(String),
    Ignore(IgnoreReason),
}

pub struct LinkClassifier {
    internal_attribute: String,
}

impl LinkClassifier {
    pub fn new() -> Self {
        Self::with_internal_attribute(DEFAULT_INTERNAL_ATTRIBUTE.to_string())
    }

    pub fn with_internal_attribute(attribute: String) -> Self {
        Self {
            internal_attribute: attribute,
        }
    }

    pub fn internal_attribute(&self) -> &str {
        &self.internal_attribute
    }

    /// Classify a click event
    pub fn classify(&self, event: &ClickEvent) -> LinkDecision {
        if event.default_prevented() {
            return LinkDecision::Ignore(IgnoreReason::AlreadyHandled);
        }

        if event.button != MouseButton::Primary || event.modifiers.any() {
            return LinkDecision::Ignore(IgnoreReason::ModifiedClick);
        }

        match event.closest_anchor() {
            Some(anchor) => self.classify_anchor(anchor),
            None => LinkDecision::Ignore(IgnoreReason::NoAnchor),
        }
    }

    /// Classify an anchor element on its own
    pub fn classify_anchor(&self, anchor: &ElementNode) -> LinkDecision {
        let href = match anchor.attr("href") {
            Some(href) if !href.is_empty() => href,
            _ => return LinkDecision::Ignore(IgnoreReason::NoHref),
        };

        if href.starts_with("http") || href.starts_with("mailto:") {
            return LinkDecision::Ignore(IgnoreReason::External);
        }

        if anchor.attr("target").is_some_and(|t| !t.is_empty()) {
            return LinkDecision::Ignore(IgnoreReason::Targeted);
        }

        if anchor.has_attr("download") {
            return LinkDecision::Ignore(IgnoreReason::Download);
        }

        if anchor.has_attr(&self.internal_attribute) || href.starts_with('/') {
            LinkDecision::Navigate(href.to_string())
        } else {
            LinkDecision::Ignore(IgnoreReason::NotInternal)
        }
    }
}

impl Default for LinkClassifier {
    fn default() -> Self {
        Self::new()
    }
}
