//! Transition completion signals
//!
//! The transition driver never guesses how long an animation takes; it asks
//! the clock. Browser hosts answer from `transitionend` and
//! `requestAnimationFrame`. `TimerClock` falls back to fixed delays.

use async_trait::async_trait;
use std::time::Duration;

/// Default frame interval used by `TimerClock`
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[async_trait]
pub trait TransitionClock: Send + Sync {
    /// Resolve once the exit animation is done. `delay` is the route's
    /// expected exit duration.
    async fn exit_finished(&self, delay: Duration);

    /// Resolve at the next animation frame boundary
    async fn next_frame(&self);
}

/// Clock driven by timers
#[derive(Debug, Clone)]
pub struct TimerClock {
    frame: Duration,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame: Duration) -> Self {
        Self { frame }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame
    }
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransitionClock for TimerClock {
    async fn exit_finished(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    async fn next_frame(&self) {
        tokio::time::sleep(self.frame).await;
    }
}

/// Clock for hosts that do not animate (reduced motion, headless rendering).
/// Every signal resolves after a single scheduler yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateClock;

#[async_trait]
impl TransitionClock for ImmediateClock {
    async fn exit_finished(&self, _delay: Duration) {
        tokio::task::yield_now().await;
    }

    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }
}
