//! Page fetcher
//!
//! Fetches a page through a `PageSource` and extracts the content fragment.

use std::sync::Arc;

use crate::document::{extract_fragment, Fragment};
use crate::error::FetchError;
use crate::source::PageSource;
use crate::Result;

pub struct PageFetcher {
    source: Arc<dyn PageSource>,
    container_id: String,
    fallback_selector: String,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn PageSource>, container_id: String, fallback_selector: String) -> Self {
        Self {
            source,
            container_id,
            fallback_selector,
        }
    }

    /// Fetch `url` and return its content fragment
    pub async fn fetch_fragment(&self, url: &str) -> Result<Fragment> {
        let page = self.source.fetch(url).await?;

        extract_fragment(&page.body, &self.container_id, &self.fallback_selector)
            .ok_or_else(|| FetchError::MissingFragment(url.to_string()))
    }
}

impl Clone for PageFetcher {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            container_id: self.container_id.clone(),
            fallback_selector: self.fallback_selector.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FragmentSource;
    use crate::source::FetchedPage;
    use async_trait::async_trait;

    struct StaticSource(&'static str);

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            Ok(FetchedPage {
                url: url.to_string(),
                final_url: url.to_string(),
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    fn fetcher(body: &'static str) -> PageFetcher {
        PageFetcher::new(
            Arc::new(StaticSource(body)),
            "main-content".to_string(),
            "main".to_string(),
        )
    }

    #[tokio::test]
    async fn test_fetch_fragment() {
        let fragment = fetcher(r#"<div id="main-content">X</div>"#)
            .fetch_fragment("/meals")
            .await
            .unwrap();
        assert_eq!(fragment.inner_html, "X");
        assert_eq!(fragment.source, FragmentSource::ContainerId);
    }

    #[tokio::test]
    async fn test_missing_fragment_is_an_error() {
        let err = fetcher("<p>plain page</p>")
            .fetch_fragment("/plain")
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::MissingFragment("/plain".to_string()));
    }
}
