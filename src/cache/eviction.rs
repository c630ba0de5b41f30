//! Eviction orderings
//!
//! Two policies share the same entry collection and must stay distinct:
//! per-query overflow evicts by insertion order, global overflow keeps the
//! most recently touched entries.

use std::cmp::Ordering;

use super::entry::CacheEntry;

/// Oldest insertion first (ascending `access_order`)
///
/// The first element under this ordering is the per-query FIFO victim.
pub fn oldest_inserted_first(a: &CacheEntry, b: &CacheEntry) -> Ordering {
    a.access_order.cmp(&b.access_order)
}

/// Most recently touched first (descending `timestamp`)
///
/// Ties fall back to the later insertion. The global trim keeps the leading
/// entries under this ordering.
pub fn most_recently_touched_first(a: &CacheEntry, b: &CacheEntry) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.access_order.cmp(&a.access_order))
}
