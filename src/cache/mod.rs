//! Search result cache
//!
//! Memoizes remote search responses keyed by (normalized query, page). The
//! whole mapping lives under a single store key and every operation is a full
//! read-modify-write of it. Entries expire an hour after their last read,
//! each query keeps at most five pages (oldest insertion evicted first), and
//! the cache as a whole holds at most fifty entries (least recently touched
//! dropped first).

mod entry;
pub mod eviction;
mod search_cache;

pub use entry::{cache_key, normalize_query, CacheEntry};
pub use search_cache::{CacheMap, CachedPage, SearchCache};

/// Store key holding the persisted mapping
pub const CACHE_KEY: &str = "movieSearchCache";

/// Entries untouched for longer than this are treated as absent
pub const CACHE_EXPIRATION_MS: i64 = 1000 * 60 * 60;

/// Pages with more results than this are never cached
pub const MAX_RESULTS_TO_CACHE: usize = 20;

/// Global entry cap
pub const MAX_CACHE_ENTRIES: usize = 50;

/// Distinct pages kept per normalized query
pub const MAX_PAGES_PER_QUERY: usize = 5;
