//! Content transition driver
//!
//! Sequences exit, swap and enter on the shared content region. Each step
//! that follows an await re-checks the navigation token, so a superseded
//! navigation stops without touching the region.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::TransitionClock;
use crate::error::TransitionError;
use crate::phase::TransitionPhase;
use crate::region::{ContentRegion, TransitionClasses};
use crate::token::{Generations, NavigationToken, OverlapPolicy};
use crate::Result;

pub struct ContentTransition {
    region: Arc<dyn ContentRegion>,
    classes: TransitionClasses,
    clock: Arc<dyn TransitionClock>,
    phase: Arc<Mutex<TransitionPhase>>,
    generations: Generations,
}

impl ContentTransition {
    pub fn new(
        region: Arc<dyn ContentRegion>,
        classes: TransitionClasses,
        clock: Arc<dyn TransitionClock>,
        policy: OverlapPolicy,
    ) -> Self {
        Self {
            region,
            classes,
            clock,
            phase: Arc::new(Mutex::new(TransitionPhase::Idle)),
            generations: Generations::new(policy),
        }
    }

    /// Start a navigation, superseding any in flight
    pub fn begin(&self) -> NavigationToken {
        let token = self.generations.next();
        tracing::debug!(generation = token.generation(), "Navigation started");
        token
    }

    pub fn phase(&self) -> TransitionPhase {
        *self.phase.lock()
    }

    pub fn region(&self) -> &Arc<dyn ContentRegion> {
        &self.region
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.generations.policy()
    }

    /// Animate the old content out and wait for the exit to finish
    pub async fn exit(&self, token: &NavigationToken, delay: Duration) -> Result<()> {
        token.ensure_current()?;
        self.advance(TransitionPhase::Exiting)?;
        self.region.remove_class(&self.classes.enter);
        self.region.remove_class(&self.classes.enter_active);
        self.region.add_class(&self.classes.exit_active);

        self.clock.exit_finished(delay).await;

        token.ensure_current()?;
        self.advance(TransitionPhase::Swapping)
    }

    /// Replace the region's markup
    pub fn replace(&self, token: &NavigationToken, html: &str) -> Result<()> {
        token.ensure_current()?;
        self.region.set_inner_html(html);
        Ok(())
    }

    /// Animate the new content in: `enter` now, `enter_active` one frame later
    pub async fn enter(&self, token: &NavigationToken) -> Result<()> {
        token.ensure_current()?;
        self.advance(TransitionPhase::Entering)?;
        self.region.remove_class(&self.classes.exit_active);
        self.region.add_class(&self.classes.enter);

        self.clock.next_frame().await;

        token.ensure_current()?;
        self.region.add_class(&self.classes.enter_active);
        self.advance(TransitionPhase::Idle)
    }

    fn advance(&self, target: TransitionPhase) -> Result<()> {
        let mut phase = self.phase.lock();
        let from = *phase;
        if !from.can_transition_to(target) {
            if self.generations.policy() == OverlapPolicy::LatestWins {
                return Err(TransitionError::InvalidTransition {
                    from: from.to_string(),
                    to: target.to_string(),
                });
            }
            // Overlapping navigations interleave freely when unguarded
            tracing::warn!(from = %from, to = %target, "Out of order transition step");
        }

        tracing::debug!(from = %from, to = %target, "Transition phase change");
        *phase = target;
        Ok(())
    }
}

impl Clone for ContentTransition {
    fn clone(&self) -> Self {
        Self {
            region: Arc::clone(&self.region),
            classes: self.classes.clone(),
            clock: Arc::clone(&self.clock),
            phase: Arc::clone(&self.phase),
            generations: self.generations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ImmediateClock, TimerClock};
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct TestRegion {
        html: Mutex<String>,
        classes: Mutex<BTreeSet<String>>,
    }

    impl ContentRegion for TestRegion {
        fn inner_html(&self) -> String {
            self.html.lock().clone()
        }

        fn set_inner_html(&self, html: &str) {
            *self.html.lock() = html.to_string();
        }

        fn add_class(&self, class: &str) {
            self.classes.lock().insert(class.to_string());
        }

        fn remove_class(&self, class: &str) {
            self.classes.lock().remove(class);
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.lock().contains(class)
        }
    }

    fn transition(
        region: Arc<TestRegion>,
        clock: Arc<dyn TransitionClock>,
        policy: OverlapPolicy,
    ) -> ContentTransition {
        ContentTransition::new(region, TransitionClasses::default(), clock, policy)
    }

    #[tokio::test]
    async fn test_full_sequence() {
        let region = Arc::new(TestRegion::default());
        let t = transition(
            region.clone(),
            Arc::new(ImmediateClock),
            OverlapPolicy::LatestWins,
        );

        let token = t.begin();
        t.exit(&token, Duration::from_millis(140)).await.unwrap();
        assert_eq!(t.phase(), TransitionPhase::Swapping);
        assert!(region.has_class("page-exit-active"));

        t.replace(&token, "<p>new</p>").unwrap();
        t.enter(&token).await.unwrap();

        assert_eq!(t.phase(), TransitionPhase::Idle);
        assert_eq!(region.inner_html(), "<p>new</p>");
        assert!(!region.has_class("page-exit-active"));
        assert!(region.has_class("page-enter"));
        assert!(region.has_class("page-enter-active"));
    }

    #[tokio::test]
    async fn test_exit_clears_previous_enter_classes() {
        let region = Arc::new(TestRegion::default());
        region.add_class("page-enter");
        region.add_class("page-enter-active");
        let t = transition(
            region.clone(),
            Arc::new(ImmediateClock),
            OverlapPolicy::LatestWins,
        );

        let token = t.begin();
        t.exit(&token, Duration::ZERO).await.unwrap();
        assert!(!region.has_class("page-enter"));
        assert!(!region.has_class("page-enter-active"));
        assert!(region.has_class("page-exit-active"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_navigation_leaves_region_alone() {
        let region = Arc::new(TestRegion::default());
        region.set_inner_html("<p>old</p>");
        let t = transition(
            region.clone(),
            Arc::new(TimerClock::new()),
            OverlapPolicy::LatestWins,
        );

        let stale = t.begin();
        let stale_exit = {
            let t = t.clone();
            let stale = stale.clone();
            tokio::spawn(async move { t.exit(&stale, Duration::from_millis(140)).await })
        };
        tokio::task::yield_now().await;

        let fresh = t.begin();
        let result = stale_exit.await.unwrap();
        assert!(matches!(result, Err(TransitionError::Superseded { .. })));
        assert!(t.replace(&stale, "<p>stale</p>").is_err());
        assert_eq!(region.inner_html(), "<p>old</p>");

        t.exit(&fresh, Duration::from_millis(140)).await.unwrap();
        t.replace(&fresh, "<p>fresh</p>").unwrap();
        t.enter(&fresh).await.unwrap();
        assert_eq!(region.inner_html(), "<p>fresh</p>");
    }

    #[tokio::test]
    async fn test_unguarded_runs_stale_navigation() {
        let region = Arc::new(TestRegion::default());
        let t = transition(
            region.clone(),
            Arc::new(ImmediateClock),
            OverlapPolicy::Unguarded,
        );

        let first = t.begin();
        let second = t.begin();
        t.exit(&second, Duration::ZERO).await.unwrap();
        t.replace(&second, "second").unwrap();
        t.enter(&second).await.unwrap();

        // The older navigation still completes and overwrites the region
        t.exit(&first, Duration::ZERO).await.unwrap();
        t.replace(&first, "first").unwrap();
        t.enter(&first).await.unwrap();
        assert_eq!(region.inner_html(), "first");
    }

    #[tokio::test]
    async fn test_enter_without_swap_is_rejected() {
        let region = Arc::new(TestRegion::default());
        let t = transition(region, Arc::new(ImmediateClock), OverlapPolicy::LatestWins);
        let token = t.begin();
        let result = t.enter(&token).await;
        assert!(matches!(
            result,
            Err(TransitionError::InvalidTransition { .. })
        ));
    }
}
