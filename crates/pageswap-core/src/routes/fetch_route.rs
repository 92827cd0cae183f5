use async_trait::async_trait;
use std::time::Duration;

use pageswap_fetch::PageFetcher;

use super::{RenderedView, RouteHandler};
use crate::error::RenderError;

/// Server-rendered page fetched and cut down to its content fragment
pub struct FetchRoute {
    fetcher: PageFetcher,
    exit_delay: Duration,
}

impl FetchRoute {
    pub fn new(fetcher: PageFetcher, exit_delay: Duration) -> Self {
        Self {
            fetcher,
            exit_delay,
        }
    }
}

#[async_trait]
impl RouteHandler for FetchRoute {
    fn name(&self) -> &str {
        "fetch"
    }

    fn header_visible(&self) -> bool {
        true
    }

    fn exit_delay(&self) -> Duration {
        self.exit_delay
    }

    async fn render(&self, url: &str) -> Result<RenderedView, RenderError> {
        let fragment = self.fetcher.fetch_fragment(url).await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Page fetch failed");
            e
        })?;

        tracing::debug!(url = %url, source = ?fragment.source, "Fragment extracted");
        Ok(RenderedView {
            html: fragment.inner_html,
            history_url: url.to_string(),
            title: fragment.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageswap_fetch::{FetchError, FetchedPage, PageSource};
    use std::sync::Arc;

    struct Fixed(u16, &'static str);

    #[async_trait]
    impl PageSource for Fixed {
        async fn fetch(&self, url: &str) -> pageswap_fetch::Result<FetchedPage> {
            if !(200..300).contains(&self.0) {
                return Err(FetchError::Status {
                    status: self.0,
                    url: url.to_string(),
                });
            }
            Ok(FetchedPage {
                url: url.to_string(),
                final_url: url.to_string(),
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    fn route(status: u16, body: &'static str) -> FetchRoute {
        let fetcher = PageFetcher::new(
            Arc::new(Fixed(status, body)),
            "main-content".to_string(),
            "main".to_string(),
        );
        FetchRoute::new(fetcher, Duration::from_millis(140))
    }

    #[tokio::test]
    async fn test_render_fragment() {
        let view = route(
            200,
            r#"<html><head><title>Meals</title></head><body><div id="main-content">X</div></body></html>"#,
        )
        .render("/meals?day=2")
        .await
        .unwrap();

        assert_eq!(view.html, "X");
        assert_eq!(view.history_url, "/meals?day=2");
        assert_eq!(view.title.as_deref(), Some("Meals"));
    }

    #[tokio::test]
    async fn test_render_errors() {
        let err = route(404, "").render("/missing").await.unwrap_err();
        assert!(matches!(
            err,
            RenderError::Fetch(FetchError::Status { status: 404, .. })
        ));

        let err = route(200, "<p>no content</p>").render("/bare").await.unwrap_err();
        assert!(matches!(err, RenderError::Fetch(FetchError::MissingFragment(_))));
    }
}
