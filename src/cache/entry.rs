//! Cached page record and key construction

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Query as the caller typed it, before normalization
    pub query: String,
    /// 1-based page number
    pub page: u32,
    /// Result records, opaque to the cache
    pub results: Vec<Value>,
    /// Total hits for the query across all pages at fetch time
    pub total_results: u64,
    /// Creation or last-read instant, epoch milliseconds
    pub timestamp: i64,
    /// Global insertion counter, fixed at write time
    pub access_order: u64,
}

impl CacheEntry {
    /// Whether this entry belongs to the given normalized query
    pub fn matches_query(&self, normalized: &str) -> bool {
        normalize_query(&self.query) == normalized
    }

    /// Whether more than `window_ms` has elapsed since the last touch
    pub fn is_expired(&self, now: i64, window_ms: i64) -> bool {
        now.saturating_sub(self.timestamp) > window_ms
    }
}

/// Lower-cases and trims a query so lookups ignore case and outer whitespace
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Composite key `<normalized-query>_page<page>`
pub fn cache_key(query: &str, page: u32) -> String {
    format!("{}_page{}", normalize_query(query), page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  MATRIX  "), "matrix");
        assert_eq!(normalize_query("The Dark Knight"), "the dark knight");
        assert_eq!(normalize_query("测试 тест"), "测试 тест");
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key("Batman", 2), "batman_page2");
        assert_eq!(cache_key("  batman ", 2), cache_key("BATMAN", 2));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = CacheEntry {
            query: "Batman".into(),
            page: 1,
            results: vec![],
            total_results: 42,
            timestamp: 1_000,
            access_order: 3,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["totalResults"], 42);
        assert_eq!(json["accessOrder"], 3);
        assert_eq!(json["query"], "Batman");
    }

    #[test]
    fn test_expiration_boundary() {
        let entry = CacheEntry {
            query: "q".into(),
            page: 1,
            results: vec![],
            total_results: 0,
            timestamp: 0,
            access_order: 1,
        };

        assert!(!entry.is_expired(100, 100));
        assert!(entry.is_expired(101, 100));
    }

    #[test]
    fn test_expiration_with_extreme_timestamps() {
        let mut entry = CacheEntry {
            query: "q".into(),
            page: 1,
            results: vec![],
            total_results: 0,
            timestamp: i64::MIN,
            access_order: 1,
        };
        assert!(entry.is_expired(1_700_000_000_000, 3_600_000));

        entry.timestamp = i64::MAX;
        assert!(!entry.is_expired(i64::MIN, 3_600_000));
    }
}
