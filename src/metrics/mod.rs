//! Cache Metrics System
//!
//! Counters kept by the cache as it serves requests, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap` so that the key order is stable
//! across runs.
//!
//! Metrics are plain counters updated inline on every operation; there is no
//! sampling and no background work.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to any bounded cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of promoting lookups (`get` / `get_mut`)
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new keys admitted
    pub insertions: u64,

    /// Number of entries dropped to make room for a new key
    pub evictions: u64,

    /// Number of entries dropped on request (`remove`, `pop_lru`, `clear`)
    pub removals: u64,

    /// Entries currently held
    pub entries: u64,

    /// Maximum number of entries
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters for a cache holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that missed. Misses are `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key entering the cache.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.entries += 1;
    }

    /// Records the least recently used entry being evicted for a new key.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.entries -= 1;
    }

    /// Records `count` entries leaving the cache on request.
    pub fn record_removal(&mut self, count: u64) {
        self.removals += count;
        self.entries -= count;
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is, between 0.0 and 1.0.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.entries as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Fraction of admitted keys that had to push an older entry out, or 0.0
    /// before the first insertion. Always between 0.0 and 1.0, since every
    /// eviction is paid for by exactly one insertion.
    pub fn eviction_rate(&self) -> f64 {
        if self.insertions > 0 {
            self.evictions as f64 / self.insertions as f64
        } else {
            0.0
        }
    }

    /// Converts the counters and derived rates to a sorted map.
    ///
    /// `eviction_rate` is only present once a key has been inserted.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("utilization".to_string(), self.utilization());

        if self.insertions > 0 {
            metrics.insert("eviction_rate".to_string(), self.eviction_rate());
        }

        metrics
    }
}

/// Uniform read access to a cache's metrics.
pub trait CacheMetrics {
    /// Returns every metric keyed by name, in alphabetical order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short identifier of the eviction policy, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_before_any_request() {
        let metrics = CoreCacheMetrics::new(4);
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.miss_rate(), 0.0);
        assert_eq!(metrics.utilization(), 0.0);
        assert!(!metrics.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_hit_and_miss_accounting() {
        let mut metrics = CoreCacheMetrics::new(4);
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        assert_eq!(metrics.requests, 4);
        assert_eq!(metrics.hit_rate(), 0.75);
        assert_eq!(metrics.miss_rate(), 0.25);

        let map = metrics.to_btreemap();
        assert_eq!(map.get("cache_misses"), Some(&1.0));
        // lookups alone never admit a key
        assert!(!map.contains_key("eviction_rate"));
    }

    #[test]
    fn test_eviction_rate_counts_against_insertions() {
        let mut metrics = CoreCacheMetrics::new(1);
        // put-only workload: no lookups at all
        metrics.record_insertion();
        for _ in 0..3 {
            metrics.record_eviction();
            metrics.record_insertion();
        }
        assert_eq!(metrics.requests, 0);
        assert_eq!(metrics.eviction_rate(), 0.75);
        assert_eq!(metrics.to_btreemap().get("eviction_rate"), Some(&0.75));

        // a single lookup must not push the rate above 1.0
        metrics.record_hit();
        assert!(metrics.eviction_rate() <= 1.0);
        assert_eq!(metrics.eviction_rate(), 0.75);
    }

    #[test]
    fn test_entry_accounting() {
        let mut metrics = CoreCacheMetrics::new(2);
        metrics.record_insertion();
        metrics.record_insertion();
        assert_eq!(metrics.utilization(), 1.0);
        metrics.record_eviction();
        metrics.record_insertion();
        metrics.record_removal(2);
        assert_eq!(metrics.entries, 0);
        assert_eq!(metrics.insertions, 3);
        assert_eq!(metrics.evictions, 1);
        assert_eq!(metrics.removals, 2);
    }

    #[test]
    fn test_btreemap_keys_are_sorted() {
        let metrics = CoreCacheMetrics::new(1).to_btreemap();
        let keys: alloc::vec::Vec<&String> = metrics.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
