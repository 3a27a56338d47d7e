#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Basic use
//!
//! ```rust
//! use recency_lru::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));   // 1 is now most recent
//!
//! cache.put(3, "three");                      // evicts 2
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![3, 1]);
//! ```
//!
//! ## Construction from untrusted input
//!
//! ```rust
//! use recency_lru::config::LruCacheConfig;
//! use recency_lru::{CacheError, LruCache};
//!
//! assert!(matches!(
//!     LruCacheConfig::try_from(-1i64),
//!     Err(CacheError::InvalidArgument(_))
//! ));
//!
//! let config = LruCacheConfig::try_from(128i64).unwrap();
//! let cache: LruCache<u64, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 128);
//! ```
//!
//! ## Metrics
//!
//! ```rust
//! use recency_lru::LruCache;
//! use recency_lru::metrics::CacheMetrics;
//!
//! let mut cache = LruCache::new(1).unwrap();
//! cache.put("a", 1);
//! cache.get(&"a");
//! cache.get(&"b");
//! cache.put("b", 2);
//!
//! let m = cache.metrics();
//! assert_eq!(m["cache_hits"], 1.0);
//! assert_eq!(m["cache_misses"], 1.0);
//! assert_eq!(m["evictions"], 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the cache and its iterators
//! - [`config`]: validated construction parameters
//! - [`error`]: error type for rejected construction arguments
//! - [`metrics`]: hit/miss/eviction counters
//! - [`concurrent`]: single-lock thread-safe wrapper (requires `concurrent` feature)

#![no_std]
#![forbid(unsafe_code)]

#[cfg(any(test, not(feature = "hashbrown")))]
extern crate std;

/// Error type returned when a construction argument is rejected.
pub mod error;

/// Arena-backed doubly linked list that records recency order.
///
/// Internal infrastructure: nodes are addressed by integer handles and the
/// list owns every node, including the two sentinels.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry
/// when a new key arrives at a full cache.
pub mod lru;

/// Cache metrics.
///
/// Counters for requests, hits, insertions, evictions and removals, reported
/// through the [`metrics::CacheMetrics`] trait.
pub mod metrics;

/// Thread-safe cache wrapper.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{CacheError, Result};
pub use lru::LruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
