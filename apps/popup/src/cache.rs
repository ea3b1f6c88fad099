use std::collections::HashMap;

/// Session-lifetime prediction cache, keyed by the literal job URL.
///
/// Keys are not normalized: `.../job-id` and `.../job-id?ref=x` are distinct
/// entries. No eviction; the cache lives as long as its session.
#[derive(Debug, Default)]
pub struct PredictionCache {
    entries: HashMap<String, String>,
}

impl PredictionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores a completed prediction, replacing any earlier one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
