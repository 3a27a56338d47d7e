//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends [`CoreCacheMetrics`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of `put` calls that overwrote the value of a present key
    pub updates: u64,

    /// Number of accesses that moved an entry that was not already the most
    /// recently used one to the front of the recency order
    pub promotions: u64,
}

impl LruCacheMetrics {
    /// Creates zeroed metrics for a cache of `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            updates: 0,
            promotions: 0,
        }
    }

    /// Records an overwrite of a present key.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry moving up to most recently used.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Converts LRU metrics to a sorted map.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
