//! Recently looked-up jobs, persisted across sessions.
//!
//! Invariant: at most `MAX_HISTORY` items, most recent first, no two with the
//! same `url`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::StoreError;
use crate::store::LocalStore;

pub const MAX_HISTORY: usize = 5;

/// Store key holding the serialized list.
pub const HISTORY_KEY: &str = "history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Default)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the persisted list. A missing entry is an empty history; an
    /// unreadable one is logged and treated the same way.
    pub fn load(store: &LocalStore) -> Self {
        let raw = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                warn!("Could not read history: {e}");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
            Ok(items) => {
                let mut history = Self::new();
                // Oldest first so the stored front ends up at the front.
                for item in items.into_iter().rev() {
                    history.push(item.url, item.title);
                }
                history
            }
            Err(e) => {
                warn!("Discarding corrupt history entry: {e}");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &LocalStore) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.items)?;
        store.set(HISTORY_KEY, &raw)
    }

    /// Moves `url` to the front (inserting it if new) and drops the oldest
    /// entries beyond `MAX_HISTORY`.
    pub fn push(&mut self, url: impl Into<String>, title: impl Into<String>) {
        let url = url.into();
        self.items.retain(|item| item.url != url);
        self.items.insert(
            0,
            HistoryItem {
                url,
                title: title.into(),
            },
        );
        self.items.truncate(MAX_HISTORY);
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
