//! Behavior activation for swapped content
//!
//! Swapped markup declares behaviors by name:
//!
//! ```html
//! <canvas id="weekly" data-behavior="chart tooltip"></canvas>
//! ```
//!
//! After each swap every declared name is looked up in the registry and its
//! initializer runs once per declaring element, in document order. Markup is
//! never executed: inline `<script>` elements are reported and skipped.

use parking_lot::RwLock;
use scraper::{Html, Selector};
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

type Initializer = Arc<dyn Fn(&Activation) -> anyhow::Result<()> + Send + Sync>;

/// One behavior declared by one element
#[derive(Debug, Clone)]
pub struct Activation {
    pub behavior: String,
    pub element_id: Option<String>,
    pub attributes: BTreeMap<String, String>,
    /// Url the content was swapped in for
    pub url: String,
}

impl Activation {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationReport {
    pub invoked: usize,
    pub failed: usize,
    /// Declared names with no registered initializer
    pub unknown: Vec<String>,
    /// Inline scripts found and not executed
    pub skipped_scripts: usize,
}

pub struct ActivationRegistry {
    initializers: Arc<RwLock<HashMap<String, Initializer>>>,
}

impl ActivationRegistry {
    pub fn new() -> Self {
        Self {
            initializers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register `init` under `name`, replacing any earlier initializer
    pub fn register<F>(&self, name: impl Into<String>, init: F)
    where
        F: Fn(&Activation) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(behavior = %name, "Registered behavior");
        self.initializers.write().insert(name, Arc::new(init));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.initializers.read().contains_key(name)
    }

    /// Run the behaviors declared in `html` via `attribute`
    pub fn activate(&self, html: &str, attribute: &str, url: &str) -> ActivationReport {
        let (activations, skipped_scripts) = collect_activations(html, attribute, url);
        let mut report = ActivationReport {
            skipped_scripts,
            ..Default::default()
        };

        if skipped_scripts > 0 {
            tracing::warn!(
                url = %url,
                count = skipped_scripts,
                "Inline scripts in swapped content are not executed; declare behaviors instead"
            );
        }

        for activation in activations {
            // Clone out so initializers may register further behaviors
            let init = self.initializers.read().get(&activation.behavior).cloned();
            let Some(init) = init else {
                tracing::debug!(behavior = %activation.behavior, "No initializer registered");
                if !report.unknown.contains(&activation.behavior) {
                    report.unknown.push(activation.behavior.clone());
                }
                continue;
            };

            report.invoked += 1;
            match catch_unwind(AssertUnwindSafe(|| init(&activation))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    report.failed += 1;
                    tracing::warn!(
                        behavior = %activation.behavior,
                        url = %url,
                        error = %e,
                        "Behavior initializer failed"
                    );
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(
                        behavior = %activation.behavior,
                        url = %url,
                        "Behavior initializer panicked"
                    );
                }
            }
        }

        report
    }
}

impl Default for ActivationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ActivationRegistry {
    fn clone(&self) -> Self {
        Self {
            initializers: Arc::clone(&self.initializers),
        }
    }
}

fn collect_activations(html: &str, attribute: &str, url: &str) -> (Vec<Activation>, usize) {
    let fragment = Html::parse_fragment(html);

    let scripts = Selector::parse("script")
        .map(|sel| fragment.select(&sel).count())
        .unwrap_or(0);

    let selector = match Selector::parse(&format!("[{attribute}]")) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(attribute = %attribute, error = %e, "Bad behavior attribute");
            return (Vec::new(), scripts);
        }
    };

    let mut activations = Vec::new();
    for el in fragment.select(&selector) {
        let element = el.value();
        let names = element.attr(attribute).unwrap_or_default();
        let attributes: BTreeMap<String, String> = element
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        for name in names.split_whitespace() {
            activations.push(Activation {
                behavior: name.to_string(),
                element_id: element.id().map(str::to_string),
                attributes: attributes.clone(),
                url: url.to_string(),
            });
        }
    }

    (activations, scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_declared_behavior_runs_once() {
        let registry = ActivationRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(RwLock::new(Vec::new()));
        {
            let calls = calls.clone();
            let seen = seen.clone();
            registry.register("chart", move |a| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.write().push((a.element_id.clone(), a.attr("data-range").map(String::from)));
                Ok(())
            });
        }

        let report = registry.activate(
            r#"<section><canvas id="weekly" data-behavior="chart" data-range="7d"></canvas></section>"#,
            "data-behavior",
            "/activities",
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.invoked, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(
            seen.read().clone(),
            vec![(Some("weekly".to_string()), Some("7d".to_string()))]
        );
    }

    #[test]
    fn test_failure_does_not_stop_later_behaviors() {
        let registry = ActivationRegistry::new();
        let order = Arc::new(RwLock::new(Vec::new()));
        {
            let order = order.clone();
            registry.register("broken", move |_| {
                order.write().push("broken");
                anyhow::bail!("chart data missing")
            });
        }
        {
            let order = order.clone();
            registry.register("panicky", move |_| {
                order.write().push("panicky");
                panic!("initializer bug")
            });
        }
        {
            let order = order.clone();
            registry.register("form", move |_| {
                order.write().push("form");
                Ok(())
            });
        }

        let report = registry.activate(
            r#"<div data-behavior="broken"></div><div data-behavior="panicky"></div><form data-behavior="form"></form>"#,
            "data-behavior",
            "/meals",
        );

        assert_eq!(order.read().clone(), vec!["broken", "panicky", "form"]);
        assert_eq!(report.invoked, 3);
        assert_eq!(report.failed, 2);
    }

    #[test]
    fn test_multiple_names_and_unknown_behaviors() {
        let registry = ActivationRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            registry.register("tooltip", move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        let report = registry.activate(
            r#"<span data-behavior="tooltip  sparkline"></span><span data-behavior="tooltip"></span>"#,
            "data-behavior",
            "/leaderboard",
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.unknown, vec!["sparkline".to_string()]);
    }

    #[test]
    fn test_inline_scripts_are_never_run() {
        let registry = ActivationRegistry::new();
        let report = registry.activate(
            r#"<p>hi</p><script>window.hacked = true</script>"#,
            "data-behavior",
            "/meals",
        );
        assert_eq!(report.skipped_scripts, 1);
        assert_eq!(report.invoked, 0);
    }

    #[test]
    fn test_registration_replaces_previous() {
        let registry = ActivationRegistry::new();
        registry.register("chart", |_| anyhow::bail!("old"));
        registry.register("chart", |_| Ok(()));
        assert!(registry.is_registered("chart"));

        let report = registry.activate(r#"<i data-behavior="chart"></i>"#, "data-behavior", "/");
        assert_eq!(report.failed, 0);
    }
}
