//! Href normalization
//!
//! Every href the router sees is resolved against the page origin and
//! reduced to `path?query`. Fragments never reach the router or history.
//! Input that cannot be resolved is passed through untouched so the browser
//! can deal with it.

use url::Url;

use crate::error::NavigationError;
use crate::Result;

pub struct Normalizer {
    /// Origin of the page the router runs in
    origin: Url,
}

impl Normalizer {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Build a normalizer from an origin string such as `https://example.com`
    pub fn parse(origin: &str) -> Result<Self> {
        let origin =
            Url::parse(origin).map_err(|e| NavigationError::InvalidUrl(format!("{origin}: {e}")))?;
        Ok(Self::new(origin))
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve `input` to `path?query`, or return it unchanged on failure
    pub fn normalize(&self, input: &str) -> String {
        normalize(input, &self.origin)
    }
}

/// Resolve `input` against `origin` and keep only path and query.
pub fn normalize(input: &str, origin: &Url) -> String {
    match origin.join(input) {
        Ok(resolved) => match resolved.query().filter(|q| !q.is_empty()) {
            Some(query) => format!("{}?{}", resolved.path(), query),
            None => resolved.path().to_string(),
        },
        Err(e) => {
            tracing::debug!(input = %input, error = %e, "Leaving unresolvable href as-is");
            input.to_string()
        }
    }
}
