//! History management

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::NavigationError;
use crate::Result;

/// State object stored with every entry the router creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub url: String,
}

impl HistoryState {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Read the url out of an arbitrary popstate state object
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value
            .get("url")
            .and_then(|u| u.as_str())
            .filter(|u| !u.is_empty())
            .map(Self::new)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub state: Option<serde_json::Value>,
    pub recorded_at: DateTime<Utc>,
}

/// The browser's session history as seen by the router
pub trait BrowserHistory: Send + Sync {
    /// Add an entry after the current one, dropping forward entries
    fn push_state(&self, state: serde_json::Value, url: &str) -> Result<()>;

    /// Overwrite the current entry
    fn replace_state(&self, state: serde_json::Value, url: &str) -> Result<()>;

    /// Number of entries in the session history
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn current(&self) -> Option<HistoryEntry>;
}

/// In-memory session history with browser semantics
pub struct SessionHistory {
    inner: Arc<RwLock<SessionInner>>,
}

struct SessionInner {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl SessionHistory {
    /// Start with a single entry for the initially loaded page
    pub fn new(initial_url: impl Into<String>) -> Self {
        let entry = HistoryEntry {
            url: initial_url.into(),
            state: None,
            recorded_at: Utc::now(),
        };
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                entries: vec![entry],
                index: 0,
            })),
        }
    }

    /// Move one entry back, returning the entry now current
    pub fn back(&self) -> Option<HistoryEntry> {
        self.go(-1)
    }

    pub fn forward(&self) -> Option<HistoryEntry> {
        self.go(1)
    }

    /// Move `delta` entries; out of range moves are ignored
    pub fn go(&self, delta: isize) -> Option<HistoryEntry> {
        let mut inner = self.inner.write();
        let target = inner.index.checked_add_signed(delta)?;
        if target >= inner.entries.len() {
            return None;
        }
        inner.index = target;
        inner.entries.get(target).cloned()
    }

    pub fn index(&self) -> usize {
        self.inner.read().index
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner.read().entries.clone()
    }
}

impl BrowserHistory for SessionHistory {
    fn push_state(&self, state: serde_json::Value, url: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(HistoryEntry {
            url: url.to_string(),
            state: Some(state),
            recorded_at: Utc::now(),
        });
        inner.index = keep;
        Ok(())
    }

    fn replace_state(&self, state: serde_json::Value, url: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let index = inner.index;
        match inner.entries.get_mut(index) {
            Some(entry) => {
                entry.url = url.to_string();
                entry.state = Some(state);
                entry.recorded_at = Utc::now();
                Ok(())
            }
            None => Err(NavigationError::History {
                operation: "replace_state",
                url: url.to_string(),
                reason: "no current entry".to_string(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    fn current(&self) -> Option<HistoryEntry> {
        let inner = self.inner.read();
        inner.entries.get(inner.index).cloned()
    }
}

impl Clone for SessionHistory {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Keeps browser history in step with completed navigations
pub struct HistoryManager {
    history: Arc<dyn BrowserHistory>,
}

impl HistoryManager {
    pub fn new(history: Arc<dyn BrowserHistory>) -> Self {
        Self { history }
    }

    /// Record a completed navigation to `url`.
    ///
    /// `replace = false` pushes a new entry with state `{url}`. `replace = true`
    /// rewrites the current entry instead, so history never grows from
    /// back/forward replays or initial load sync.
    pub fn record(&self, url: &str, replace: bool) -> Result<()> {
        let state = HistoryState::new(url).to_value()?;
        if replace {
            self.history.replace_state(state, url)?;
            tracing::debug!(url = %url, "Replaced history entry");
        } else {
            self.history.push_state(state, url)?;
            tracing::debug!(url = %url, len = self.history.len(), "Pushed history entry");
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn current(&self) -> Option<HistoryEntry> {
        self.history.current()
    }
}

impl Clone for HistoryManager {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
        }
    }
}
