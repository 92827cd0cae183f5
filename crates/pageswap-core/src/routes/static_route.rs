use async_trait::async_trait;
use std::time::Duration;

use super::{RenderedView, RouteHandler};
use crate::error::RenderError;

/// Path of the client-rendered hub view
pub const HUB_PATH: &str = "/dashboard1";

const HUB_HTML: &str = r#"
    <section class="center-dashboard">
      <div class="center-card">
        <h1>Welcome to FitGenix</h1>
        <p class="lead muted">Choose where you want to go</p>

        <div class="center-options">
          <a class="big-btn" href="/meals" data-internal>Meal Logger</a>
          <a class="big-btn" href="/activities" data-internal>Activity Logger</a>
          <a class="big-btn" href="/leaderboard" data-internal>Lifestyle Leaderboard</a>
        </div>
      </div>
    </section>
"#;

/// Fixed markup rendered without a request. The header is hidden.
pub struct StaticRoute {
    path: String,
    html: String,
    title: Option<String>,
    exit_delay: Duration,
}

impl StaticRoute {
    pub fn new(path: impl Into<String>, html: impl Into<String>, exit_delay: Duration) -> Self {
        Self {
            path: path.into(),
            html: html.into(),
            title: None,
            exit_delay,
        }
    }

    pub fn hub(exit_delay: Duration) -> Self {
        Self::new(HUB_PATH, HUB_HTML, exit_delay)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl RouteHandler for StaticRoute {
    fn name(&self) -> &str {
        "static"
    }

    fn header_visible(&self) -> bool {
        false
    }

    fn exit_delay(&self) -> Duration {
        self.exit_delay
    }

    async fn render(&self, _url: &str) -> Result<RenderedView, RenderError> {
        Ok(RenderedView {
            html: self.html.clone(),
            history_url: self.path.clone(),
            title: self.title.clone(),
        })
    }
}
