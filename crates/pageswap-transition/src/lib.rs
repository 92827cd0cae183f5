//! pageswap content transitions
//!
//! Drives the exit → swap → enter sequence of the content region as an
//! explicit state machine. Completion comes from a `TransitionClock`, and
//! every navigation carries a token so superseded navigations cannot
//! mutate the region.

mod clock;
mod error;
mod phase;
mod region;
mod token;
mod transition;

pub use clock::{ImmediateClock, TimerClock, TransitionClock, DEFAULT_FRAME_INTERVAL};
pub use error::TransitionError;
pub use phase::TransitionPhase;
pub use region::{ContentRegion, TransitionClasses};
pub use token::{Generations, NavigationToken, OverlapPolicy};
pub use transition::ContentTransition;

pub type Result<T> = std::result::Result<T, TransitionError>;
