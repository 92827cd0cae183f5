//! Content region
//!
//! The one element whose markup the router replaces, plus the class names
//! it toggles so stylesheets can animate the swap.

use serde::{Deserialize, Serialize};

/// The replaceable content container
pub trait ContentRegion: Send + Sync {
    /// Current inner markup
    fn inner_html(&self) -> String;

    /// Replace the inner markup
    fn set_inner_html(&self, html: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;
}

/// Class names applied during a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionClasses {
    /// Present while old content animates out
    pub exit_active: String,
    /// Initial state of new content
    pub enter: String,
    /// Added one frame after `enter` to trigger the CSS transition
    pub enter_active: String,
}

impl Default for TransitionClasses {
    fn default() -> Self {
        Self {
            exit_active: "page-exit-active".to_string(),
            enter: "page-enter".to_string(),
            enter_active: "page-enter-active".to_string(),
        }
    }
}

impl TransitionClasses {
    pub fn is_valid(&self) -> bool {
        [&self.exit_active, &self.enter, &self.enter_active]
            .iter()
            .all(|c| !c.trim().is_empty() && !c.contains(char::is_whitespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classes() {
        let classes = TransitionClasses::default();
        assert_eq!(classes.exit_active, "page-exit-active");
        assert_eq!(classes.enter, "page-enter");
        assert_eq!(classes.enter_active, "page-enter-active");
        assert!(classes.is_valid());
    }

    #[test]
    fn test_invalid_class_names() {
        let classes = TransitionClasses {
            enter: "page enter".to_string(),
            ..Default::default()
        };
        assert!(!classes.is_valid());

        let classes = TransitionClasses {
            exit_active: String::new(),
            ..Default::default()
        };
        assert!(!classes.is_valid());
    }
}
