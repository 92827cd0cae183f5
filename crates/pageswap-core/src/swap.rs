//! Content swapper
//!
//! exit → replace → history → title → activations → enter

use std::time::Duration;

use pageswap_transition::{NavigationToken, TransitionError};

use crate::activation::{ActivationRegistry, ActivationReport};
use crate::context::RouterContext;
use crate::routes::RenderedView;

pub struct ContentSwapper {
    activations: ActivationRegistry,
}

impl ContentSwapper {
    pub fn new(activations: ActivationRegistry) -> Self {
        Self { activations }
    }

    pub fn activations(&self) -> &ActivationRegistry {
        &self.activations
    }

    /// Swap `view` into the content region.
    ///
    /// Returns `Superseded` if a newer navigation started before the markup
    /// was replaced. Once replaced, the swap counts as done even if the
    /// enter animation is cut short.
    pub async fn swap(
        &self,
        ctx: &RouterContext,
        token: &NavigationToken,
        view: &RenderedView,
        exit_delay: Duration,
        replace: bool,
    ) -> Result<ActivationReport, TransitionError> {
        let transition = ctx.transition();

        transition.exit(token, exit_delay).await?;
        transition.replace(token, &view.html)?;

        // Replays show an entry the browser already points at
        if replace {
            tracing::debug!(url = %view.history_url, "History left as is");
        } else if let Err(e) = ctx.history().record(&view.history_url, false) {
            tracing::warn!(url = %view.history_url, error = %e, "Failed to record history");
        }

        if let Some(title) = &view.title {
            ctx.host().set_title(title);
        }

        let report = self.activations.activate(
            &view.html,
            &ctx.config().behavior_attribute,
            &view.history_url,
        );

        match transition.enter(token).await {
            Ok(()) => {}
            Err(TransitionError::Superseded { generation, current }) => {
                tracing::debug!(generation, current, "Enter cut short by a newer navigation");
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            url = %view.history_url,
            generation = token.generation(),
            behaviors = report.invoked,
            "Content swapped"
        );
        Ok(report)
    }
}

impl Clone for ContentSwapper {
    fn clone(&self) -> Self {
        Self {
            activations: self.activations.clone(),
        }
    }
}
