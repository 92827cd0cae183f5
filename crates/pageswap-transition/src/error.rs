//! Transition error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Navigation {generation} superseded by navigation {current}")]
    Superseded { generation: u64, current: u64 },
}
