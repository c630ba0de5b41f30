//! Recent search history
//!
//! A short most-recent-first list of queries, persisted as a JSON array of
//! strings next to the result cache.

use crate::cache::normalize_query;
use crate::storage::KeyValueStore;

/// Store key holding the history list
pub const HISTORY_KEY: &str = "searchHistory";

/// Maximum number of remembered queries
pub const MAX_HISTORY_SIZE: usize = 10;

/// Most-recent-first list of past queries
#[derive(Debug)]
pub struct SearchHistory<S> {
    store: S,
}

impl<S: KeyValueStore> SearchHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Remembered queries, newest first
    pub fn entries(&self) -> Vec<String> {
        self.store.read(HISTORY_KEY).unwrap_or_default()
    }

    /// Move `query` to the front, dropping older duplicates and overflow
    ///
    /// Duplicates are matched the way cache keys are, ignoring case and
    /// surrounding whitespace; the latest spelling wins.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let normalized = normalize_query(query);
        let mut entries = self.entries();
        entries.retain(|q| normalize_query(q) != normalized);
        entries.insert(0, query.to_string());
        entries.truncate(MAX_HISTORY_SIZE);
        self.save(&entries);
    }

    /// Forget `query`; returns whether it was present
    pub fn remove(&mut self, query: &str) -> bool {
        let normalized = normalize_query(query);
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|q| normalize_query(q) != normalized);

        if entries.len() == before {
            return false;
        }
        self.save(&entries);
        true
    }

    fn save(&self, entries: &[String]) {
        if let Err(e) = self.store.write(HISTORY_KEY, entries) {
            tracing::warn!(error = %e, "failed to persist search history");
        }
    }
}
