//! Router configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use pageswap_fetch::FetchOptions;
use pageswap_navigation::DEFAULT_INTERNAL_ATTRIBUTE;
use pageswap_transition::{OverlapPolicy, TransitionClasses, DEFAULT_FRAME_INTERVAL};

use crate::error::RouterError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Id of the replaceable content container
    pub container_id: String,
    /// Id of the site header hidden on static views
    pub header_id: String,
    /// Selector tried when a fetched page has no container id
    pub fallback_selector: String,
    /// Attribute forcing in-app navigation on a link
    pub internal_attribute: String,
    /// Attribute declaring behaviors on swapped content
    pub behavior_attribute: String,
    /// Header marking fetches as in-app navigations
    pub navigation_header: String,
    pub navigation_header_value: String,
    pub user_agent: Option<String>,
    /// Exit delay of the static view
    pub static_exit_ms: u64,
    /// Exit delay of fetched views
    pub fetch_exit_ms: u64,
    pub frame_interval_ms: u64,
    pub classes: TransitionClasses,
    pub overlap: OverlapPolicy,
    /// No timeout unless set
    pub request_timeout_ms: Option<u64>,
    pub max_redirects: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            container_id: "main-content".to_string(),
            header_id: "site-header".to_string(),
            fallback_selector: "main".to_string(),
            internal_attribute: DEFAULT_INTERNAL_ATTRIBUTE.to_string(),
            behavior_attribute: "data-behavior".to_string(),
            navigation_header: "X-Requested-With".to_string(),
            navigation_header_value: "XMLHttpRequest".to_string(),
            user_agent: None,
            static_exit_ms: 120,
            fetch_exit_ms: 140,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL.as_millis() as u64,
            classes: TransitionClasses::default(),
            overlap: OverlapPolicy::default(),
            request_timeout_ms: None,
            max_redirects: 10,
        }
    }
}

impl RouterConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("container_id", &self.container_id),
            ("header_id", &self.header_id),
            ("fallback_selector", &self.fallback_selector),
            ("internal_attribute", &self.internal_attribute),
            ("behavior_attribute", &self.behavior_attribute),
            ("navigation_header", &self.navigation_header),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RouterError::Config(format!("{name} must not be empty")));
            }
        }

        if !self
            .navigation_header
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
        {
            return Err(RouterError::Config(format!(
                "invalid navigation header name: {}",
                self.navigation_header
            )));
        }

        if !self.classes.is_valid() {
            return Err(RouterError::Config(
                "transition classes must be single non-empty class names".to_string(),
            ));
        }

        Ok(())
    }

    pub fn static_exit_delay(&self) -> Duration {
        Duration::from_millis(self.static_exit_ms)
    }

    pub fn fetch_exit_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_exit_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            navigation_header: self.navigation_header.clone(),
            navigation_header_value: self.navigation_header_value.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_redirects: self.max_redirects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.container_id, "main-content");
        assert_eq!(config.static_exit_delay(), Duration::from_millis(120));
        assert_eq!(config.fetch_exit_delay(), Duration::from_millis(140));
        assert_eq!(config.overlap, OverlapPolicy::LatestWins);
        assert!(config.fetch_options().timeout.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RouterConfig::from_json(
            r#"{"container_id": "content", "overlap": "unguarded", "request_timeout_ms": 5000}"#,
        )
        .unwrap();
        assert_eq!(config.container_id, "content");
        assert_eq!(config.header_id, "site-header");
        assert_eq!(config.overlap, OverlapPolicy::Unguarded);
        assert_eq!(
            config.fetch_options().timeout,
            Some(Duration::from_millis(5000))
        );
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            RouterConfig::from_json(r#"{"container_id": ""}"#),
            Err(RouterError::Config(_))
        ));
        assert!(matches!(
            RouterConfig::from_json(r#"{"navigation_header": "X Requested"}"#),
            Err(RouterError::Config(_))
        ));
        assert!(matches!(
            RouterConfig::from_json("not json"),
            Err(RouterError::Serialization(_))
        ));
    }
}
