//! Concurrent Cache Implementation
//!
//! A thread-safe wrapper around [`LruCache`] for callers that need to share
//! one cache between threads.
//!
//! # Locking
//!
//! Every LRU operation, `get` included, rewrites the usage list together with
//! the key index, so the whole cache sits behind a single
//! `parking_lot::Mutex`. Calls are serialized and the recency order is
//! global: eviction order matches what a single-threaded cache would produce
//! for the same interleaving of calls.
//!
//! Values leave the lock by clone ([`ConcurrentLruCache::get`]) or are
//! inspected in place while the lock is held ([`ConcurrentLruCache::get_with`]).
//!
//! # Example
//!
//! ```rust
//! use recency_lru::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key_{}_{}", t, i);
//!                 cache.put(key.clone(), i);
//!                 assert_eq!(cache.get(&key), Some(i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::lru::LruCache;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache: an [`LruCache`] behind one mutex.
///
/// All methods take `&self`, so the cache can be shared through an `Arc`.
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> ConcurrentLruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::InvalidArgument`](crate::CacheError) when
    /// `capacity` is zero.
    pub fn new(capacity: usize) -> Result<ConcurrentLruCache<K, V, DefaultHashBuilder>> {
        Ok(ConcurrentLruCache {
            inner: Mutex::new(LruCache::new(capacity)?),
        })
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Creates an empty cache from a validated config.
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        ConcurrentLruCache {
            inner: Mutex::new(LruCache::init(config, hasher)),
        }
    }

    /// Creates an empty cache with the given capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        ConcurrentLruCache {
            inner: Mutex::new(LruCache::with_hasher(cap, hash_builder)),
        }
    }

    /// Wraps an existing cache, keeping its contents and recency order.
    pub fn from_cache(cache: LruCache<K, V, S>) -> Self {
        ConcurrentLruCache {
            inner: Mutex::new(cache),
        }
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> LruCache<K, V, S> {
        self.inner.into_inner()
    }

    /// Maximum number of entries.
    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Runs `f` on the value for `key` while the lock is held, marking the
    /// entry most recently used.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Returns true if `key` is cached. Does not affect recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Inserts or updates `key`; see [`LruCache::put`].
    pub fn put(&self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.inner.lock().put(key, value)
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Drops every entry. Capacity and metrics history are kept.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Snapshot of the keys from most to least recently used.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.lock().keys().cloned().collect()
    }

    /// Runs [`LruCache::assert_invariants`] under the lock.
    pub fn assert_invariants(&self) {
        self.inner.lock().assert_invariants()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ConcurrentLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_lru_basic() {
        let cache = ConcurrentLruCache::new(2).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.put(3, 30), Some((2, 20)));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.keys(), alloc::vec![3, 1]);
        assert_eq!(cache.get_with(&3, |v| v + 1), Some(31));
        cache.assert_invariants();
    }

    #[test]
    fn test_concurrent_lru_rejects_zero_capacity() {
        assert!(ConcurrentLruCache::<u8, u8>::new(0).is_err());
    }

    #[test]
    fn test_concurrent_lru_round_trips_inner_cache() {
        let mut plain = LruCache::new(3).unwrap();
        plain.put("a", 1);
        plain.put("b", 2);
        let shared = ConcurrentLruCache::from_cache(plain);
        shared.put("c", 3);
        let plain = shared.into_inner();
        let keys: Vec<&str> = plain.keys().copied().collect();
        assert_eq!(keys, alloc::vec!["c", "b", "a"]);
    }

    #[test]
    fn test_concurrent_lru_threads_respect_capacity() {
        let cache = Arc::new(ConcurrentLruCache::new(50).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500 {
                        let key = i % 100;
                        if (i + t) % 2 == 0 {
                            cache.put(key, t * 1000 + i);
                        } else {
                            let _ = cache.get(&key);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 50);
        cache.assert_invariants();
        assert_eq!(cache.algorithm_name(), "ConcurrentLRU");
    }
}
