//! Parsed navigation responses
//!
//! A `ParsedDocument` lives only long enough to pull the content fragment
//! out of a fetched page. `scraper::Html` is not `Send`, so it is never held
//! across an await.

use scraper::{Html, Selector};

/// Where a fragment was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSource {
    /// Element carrying the content container's id
    ContainerId,
    /// First element matching the fallback selector (`main`)
    Fallback,
}

/// Replaceable content extracted from a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub source: FragmentSource,
    pub inner_html: String,
    /// Document title, if the page has one
    pub title: Option<String>,
}

pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Locate the fragment: the element with `container_id`, else the first
    /// match of `fallback_selector`.
    pub fn fragment(&self, container_id: &str, fallback_selector: &str) -> Option<Fragment> {
        let title = self.title();

        if let Some(inner_html) = self.inner_html_by_id(container_id) {
            return Some(Fragment {
                source: FragmentSource::ContainerId,
                inner_html,
                title,
            });
        }

        let selector = match Selector::parse(fallback_selector) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(selector = %fallback_selector, error = %e, "Bad fallback selector");
                return None;
            }
        };

        self.html.select(&selector).next().map(|el| Fragment {
            source: FragmentSource::Fallback,
            inner_html: el.inner_html(),
            title,
        })
    }

    pub fn title(&self) -> Option<String> {
        let sel = Selector::parse("title").ok()?;
        self.html
            .select(&sel)
            .map(|el| normalize_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
            .find(|t| !t.is_empty())
    }

    fn inner_html_by_id(&self, id: &str) -> Option<String> {
        let sel = Selector::parse("[id]").ok()?;
        self.html
            .select(&sel)
            .find(|el| el.value().id() == Some(id))
            .map(|el| el.inner_html())
    }
}

/// Parse `body` and extract its fragment in one step
pub fn extract_fragment(body: &str, container_id: &str, fallback_selector: &str) -> Option<Fragment> {
    ParsedDocument::parse(body).fragment(container_id, fallback_selector)
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_by_container_id() {
        let doc = ParsedDocument::parse(
            r#"<html><head><title> Meals </title></head><body>
            <header id="site-header">nav</header>
            <div id="main-content">X</div>
            </body></html>"#,
        );
        let fragment = doc.fragment("main-content", "main").unwrap();
        assert_eq!(fragment.source, FragmentSource::ContainerId);
        assert_eq!(fragment.inner_html, "X");
        assert_eq!(fragment.title.as_deref(), Some("Meals"));
    }

    #[test]
    fn test_bare_fragment_body() {
        let fragment = extract_fragment(r#"<div id="main-content">X</div>"#, "main-content", "main")
            .unwrap();
        assert_eq!(fragment.inner_html, "X");
        assert!(fragment.title.is_none());
    }

    #[test]
    fn test_falls_back_to_main() {
        let body = r#"<body><main><h1>Leaderboard</h1></main><main>second</main></body>"#;
        let fragment = extract_fragment(body, "main-content", "main").unwrap();
        assert_eq!(fragment.source, FragmentSource::Fallback);
        assert_eq!(fragment.inner_html, "<h1>Leaderboard</h1>");
    }

    #[test]
    fn test_container_id_wins_over_main() {
        let body = r#"<main><div id="main-content"><p>inner</p></div></main>"#;
        let fragment = extract_fragment(body, "main-content", "main").unwrap();
        assert_eq!(fragment.source, FragmentSource::ContainerId);
        assert_eq!(fragment.inner_html, "<p>inner</p>");
    }

    #[test]
    fn test_missing_fragment() {
        let body = r#"<body><div id="other">nothing here</div></body>"#;
        assert!(extract_fragment(body, "main-content", "main").is_none());
    }

    #[test]
    fn test_invalid_fallback_selector() {
        assert!(extract_fragment("<main>x</main>", "main-content", "[[").is_none());
    }
}
