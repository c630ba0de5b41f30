//! Paginated, expiring, capacity-bounded cache of search responses

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::entry::{cache_key, normalize_query, CacheEntry};
use super::eviction::{most_recently_touched_first, oldest_inserted_first};
use super::{
    CACHE_EXPIRATION_MS, CACHE_KEY, MAX_CACHE_ENTRIES, MAX_PAGES_PER_QUERY, MAX_RESULTS_TO_CACHE,
};
use crate::clock::{Clock, SystemClock};
use crate::storage::KeyValueStore;

/// Persisted shape: composite key to entry
pub type CacheMap = BTreeMap<String, CacheEntry>;

/// A cache hit
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage<T> {
    pub results: Vec<T>,
    pub total_results: u64,
}

/// Search result cache over an injected store and clock
///
/// Operations never fail. A mapping that cannot be read is treated as an empty
/// cache, and a failed write is logged and dropped. Mutating operations take
/// `&mut self` so one handle never interleaves its own read-modify-write
/// cycles. Nothing guards the store itself: two handles over the same store,
/// in one process or several, can overwrite each other's updates.
#[derive(Debug)]
pub struct SearchCache<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> SearchCache<S, SystemClock> {
    /// Cache on the wall clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> SearchCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Look up a cached page
    ///
    /// An expired entry is deleted before reporting a miss. A hit refreshes the
    /// entry's timestamp but never its insertion order.
    pub fn get<T: DeserializeOwned>(&mut self, query: &str, page: u32) -> Option<CachedPage<T>> {
        let mut map = self.load()?;
        let key = cache_key(query, page);
        let now = self.clock.now_millis();

        let entry = map.get_mut(&key)?;

        if entry.is_expired(now, CACHE_EXPIRATION_MS) {
            tracing::debug!(key = %key, "cache entry expired");
            map.remove(&key);
            self.persist(&map);
            return None;
        }

        let results: Vec<T> = match serde_json::from_value(Value::Array(entry.results.clone())) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "cached results do not match the expected type");
                return None;
            }
        };
        let total_results = entry.total_results;

        entry.timestamp = now;
        self.persist(&map);

        tracing::debug!(key = %key, "cache hit");
        Some(CachedPage {
            results,
            total_results,
        })
    }

    /// Cache a page of results
    ///
    /// Pages larger than `MAX_RESULTS_TO_CACHE` are skipped. Once the query
    /// already holds `MAX_PAGES_PER_QUERY` pages its oldest insertion is
    /// evicted, and if the cache then exceeds `MAX_CACHE_ENTRIES` only the most
    /// recently touched entries are kept.
    pub fn set<T: Serialize>(&mut self, query: &str, page: u32, results: &[T], total_results: u64) {
        if results.len() > MAX_RESULTS_TO_CACHE {
            tracing::debug!(
                query,
                page,
                count = results.len(),
                "result page too large to cache"
            );
            return;
        }

        let results = match results
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(query, page, error = %e, "failed to serialize results for cache");
                return;
            }
        };

        let mut map = self.load().unwrap_or_default();
        let normalized = normalize_query(query);

        evict_oldest_page(&mut map, &normalized);

        let access_order = match next_access_order(&map) {
            Some(order) => order,
            None => {
                tracing::warn!("insertion counter exhausted, discarding cached pages");
                map.clear();
                1
            }
        };
        map.insert(
            cache_key(query, page),
            CacheEntry {
                query: query.to_string(),
                page,
                results,
                total_results,
                timestamp: self.clock.now_millis(),
                access_order,
            },
        );

        if map.len() > MAX_CACHE_ENTRIES {
            map = keep_most_recent(map, MAX_CACHE_ENTRIES);
        }

        self.persist(&map);
    }

    /// Remove one page of a query, or every page when `page` is `None`
    pub fn remove(&mut self, query: &str, page: Option<u32>) {
        let Some(mut map) = self.load() else {
            return;
        };

        let before = map.len();
        match page {
            Some(page) => {
                map.remove(&cache_key(query, page));
            }
            None => {
                let normalized = normalize_query(query);
                map.retain(|_, entry| !entry.matches_query(&normalized));
            }
        }

        if map.len() != before {
            self.persist(&map);
        }
    }

    /// Replace the mapping with an empty one
    pub fn clear(&mut self) {
        self.persist(&CacheMap::new());
    }

    /// Snapshot of the persisted mapping, empty if absent or unreadable
    pub fn entries(&self) -> CacheMap {
        self.load().unwrap_or_default()
    }

    fn load(&self) -> Option<CacheMap> {
        self.store.read(CACHE_KEY)
    }

    fn persist(&self, map: &CacheMap) {
        if let Err(e) = self.store.write(CACHE_KEY, map) {
            tracing::warn!(error = %e, "failed to persist search cache");
        }
    }
}

/// Drops the oldest-inserted page of `normalized` once it is at capacity
fn evict_oldest_page(map: &mut CacheMap, normalized: &str) {
    let pages = map.values().filter(|e| e.matches_query(normalized)).count();
    if pages < MAX_PAGES_PER_QUERY {
        return;
    }

    let victim = map
        .iter()
        .filter(|(_, e)| e.matches_query(normalized))
        .min_by(|(_, a), (_, b)| oldest_inserted_first(a, b))
        .map(|(key, _)| key.clone());

    if let Some(key) = victim {
        tracing::debug!(key = %key, "evicting oldest page for query");
        map.remove(&key);
    }
}

/// One past the highest insertion counter, `None` once it cannot grow
fn next_access_order(map: &CacheMap) -> Option<u64> {
    map.values()
        .map(|e| e.access_order)
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

/// Rebuilds the mapping from the `limit` most recently touched entries
fn keep_most_recent(map: CacheMap, limit: usize) -> CacheMap {
    let mut entries: Vec<(String, CacheEntry)> = map.into_iter().collect();
    entries.sort_by(|(_, a), (_, b)| most_recently_touched_first(a, b));

    for (key, _) in entries.iter().skip(limit) {
        tracing::debug!(key = %key, "evicting least recently touched entry");
    }
    entries.truncate(limit);

    entries.into_iter().collect()
}
