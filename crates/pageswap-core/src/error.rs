//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Content container not found: #{0}")]
    MissingContainer(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] pageswap_navigation::NavigationError),

    #[error("Transition error: {0}")]
    Transition(#[from] pageswap_transition::TransitionError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] pageswap_fetch::FetchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a route could not produce a view. Every variant fails open.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Fetch(#[from] pageswap_fetch::FetchError),
}
