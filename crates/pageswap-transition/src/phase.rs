//! Transition phase state machine
//!
//! ```text
//! Idle
//!   ↓ navigation starts
//! Exiting
//!   ↓ exit finished
//! Swapping
//!   ↓ markup replaced
//! Entering
//!   ↓ next frame
//! Idle
//! ```
//!
//! A newer navigation may restart the exit from any phase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// Content is settled
    #[default]
    Idle,
    /// Old content is animating out
    Exiting,
    /// Markup is being replaced
    Swapping,
    /// New content is animating in
    Entering,
}

impl TransitionPhase {
    /// Check if moving to `target` is a legal step
    pub fn can_transition_to(&self, target: TransitionPhase) -> bool {
        match (self, target) {
            // Any phase can restart the exit
            (_, TransitionPhase::Exiting) => true,
            (TransitionPhase::Exiting, TransitionPhase::Swapping) => true,
            (TransitionPhase::Swapping, TransitionPhase::Entering) => true,
            (TransitionPhase::Entering, TransitionPhase::Idle) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::Idle => "idle",
            TransitionPhase::Exiting => "exiting",
            TransitionPhase::Swapping => "swapping",
            TransitionPhase::Entering => "entering",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransitionPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(TransitionPhase::Idle),
            "exiting" => Ok(TransitionPhase::Exiting),
            "swapping" => Ok(TransitionPhase::Swapping),
            "entering" => Ok(TransitionPhase::Entering),
            _ => Err(format!("Unknown transition phase: {}", s)),
        }
    }
}
