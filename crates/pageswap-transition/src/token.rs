//! Navigation generations
//!
//! Every navigation takes a token from the shared counter. Async
//! continuations check their token before touching shared state; only the
//! newest navigation passes.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::TransitionError;
use crate::Result;

/// How overlapping navigations are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Only the most recently started navigation may mutate the page
    #[default]
    LatestWins,
    /// Every navigation runs to completion; the last callback to fire wins
    Unguarded,
}

#[derive(Debug, Clone)]
pub struct NavigationToken {
    generation: u64,
    counter: Arc<AtomicU64>,
    policy: OverlapPolicy,
}

impl NavigationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        match self.policy {
            OverlapPolicy::LatestWins => self.counter.load(Ordering::SeqCst) == self.generation,
            OverlapPolicy::Unguarded => true,
        }
    }

    /// Fail with `Superseded` when a newer navigation has started
    pub fn ensure_current(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(TransitionError::Superseded {
                generation: self.generation,
                current: self.counter.load(Ordering::SeqCst),
            })
        }
    }
}

/// Issues navigation tokens
#[derive(Debug, Clone)]
pub struct Generations {
    counter: Arc<AtomicU64>,
    policy: OverlapPolicy,
}

impl Generations {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(0)),
            policy,
        }
    }

    /// Start a new generation, superseding every earlier token
    pub fn next(&self) -> NavigationToken {
        let generation = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        NavigationToken {
            generation,
            counter: Arc::clone(&self.counter),
            policy: self.policy,
        }
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }
}

impl Default for Generations {
    fn default() -> Self {
        Self::new(OverlapPolicy::default())
    }
}
