//! Least Recently Used (LRU) Cache Implementation
//!
//! A capacity-bounded key-value store with O(1) `get` and `put`. Every
//! successful access moves its entry to the front of the recency order; when
//! a new key arrives at a full cache the entry at the back (the least
//! recently used one) is evicted first.
//!
//! # Structure
//!
//! ```text
//!   map: HashMap<K, Handle>           list: arena of (K, V) slots
//!  ┌──────────┬────────┐
//!  │  "a"     │ h2     │──┐    HEAD ⇄ [h2 "a"] ⇄ [h0 "c"] ⇄ [h1 "b"] ⇄ TAIL
//!  │  "b"     │ h1     │──┼──────────────────────────────────┘
//!  │  "c"     │ h0     │──┘       most recent              least recent
//!  └──────────┴────────┘
//! ```
//!
//! The index and the list always change together: every insert, move and
//! removal touches both before the call returns, so a key is in the index
//! exactly when its node is linked into the list.
//!
//! # Missing keys
//!
//! Lookups return `Option`. A missing key is `None` from [`LruCache::get`],
//! [`LruCache::get_mut`], [`LruCache::peek`] and [`LruCache::remove`] alike;
//! it is never an error and never a sentinel value.
//!
//! # Performance Characteristics
//!
//! - Get / Put / Remove / Pop: O(1) average
//! - Memory: one arena slot and one index slot per entry; small caches are
//!   reserved up front, large ones grow on insert and stop growing once full
//!
//! # Thread Safety
//!
//! Every operation, including `get`, needs `&mut self`. For shared access,
//! wrap the cache in a lock or enable the `concurrent` feature and use
//! `ConcurrentLruCache`.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::list::{self, Handle, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the entries reserved at construction. Larger caches grow
/// the arena and the index on insert until they first fill up.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches capacity,
/// the least recently used entry will be evicted to make room for new entries.
///
/// # Examples
///
/// ```
/// use recency_lru::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, Handle, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::InvalidArgument`](crate::CacheError) when
    /// `capacity` is zero.
    pub fn new(capacity: usize) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        let config = LruCacheConfig::new(capacity)?;
        Ok(LruCache::init(config, None))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates an empty cache from a validated config.
    ///
    /// `hasher` defaults to `S::default()` when `None`.
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Creates an empty cache with the given capacity and hash builder.
    ///
    /// Any capacity is accepted. Storage for at most a few thousand entries
    /// is reserved up front, the rest is allocated as keys arrive.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let reserved = cap.get().min(MAX_PREALLOCATED_ENTRIES);
        debug!(capacity = cap.get(), reserved, "creating lru cache");
        LruCache {
            config: LruCacheConfig::from(cap),
            list: List::with_capacity(reserved),
            map: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            metrics: LruCacheMetrics::new(cap.get() as u64),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Counters accumulated since construction.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.lookup(key)?;
        self.list.get(node).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key` and marks it most
    /// recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.lookup(key)?;
        self.list.get_mut(node).map(|(_, v)| v)
    }

    /// Returns the value for `key` without touching the recency order or
    /// the metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = *self.map.get(key)?;
        self.list.get(node).map(|(_, v)| v)
    }

    /// Returns true if `key` is cached. Does not affect recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// The entry that would be evicted next.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let node = self.list.back()?;
        self.list.get(node).map(|(k, v)| (k, v))
    }

    /// The most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let node = self.list.front()?;
        self.list.get(node).map(|(k, v)| (k, v))
    }

    /// Inserts or updates `key`.
    ///
    /// - Present key: the value is replaced, the entry becomes most recently
    ///   used and `Some((key, old_value))` is returned.
    /// - New key with room to spare: inserted as most recently used, `None`
    ///   is returned.
    /// - New key in a full cache: the least recently used entry is evicted
    ///   and returned, then the new key is inserted.
    ///
    /// The cache never holds more than [`cap`](Self::cap) entries afterwards.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(&node) = self.map.get(&key) {
            self.promote(node);
            self.metrics.record_update();
            return self.list.replace(node, (key, value));
        }

        let evicted = if self.map.len() >= self.cap().get() {
            self.evict_lru()
        } else {
            None
        };

        let node = self.list.push_front((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();
        trace!(len = self.map.len(), "inserted new entry");
        debug_assert_eq!(self.map.len(), self.list.len());
        debug_assert!(self.map.len() <= self.cap().get());

        evicted
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        let (_, value) = self.list.remove(node)?;
        self.metrics.core.record_removal(1);
        trace!(len = self.map.len(), "removed entry");
        debug_assert_eq!(self.map.len(), self.list.len());
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        self.metrics.core.record_removal(1);
        debug_assert_eq!(self.map.len(), self.list.len());
        Some((key, value))
    }

    /// Drops every entry. Capacity and metrics history are kept.
    pub fn clear(&mut self) {
        let dropped = self.map.len();
        self.map.clear();
        self.list.clear();
        self.metrics.core.record_removal(dropped as u64);
        debug!(dropped, "cleared lru cache");
    }

    /// Iterates entries from most to least recently used without affecting
    /// recency. Reverse it for eviction order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Checks that the index and the usage list describe the same entries.
    ///
    /// # Panics
    ///
    /// Panics if the list links are broken, if the index and the list
    /// disagree on length or on which key lives in which node, or if the
    /// cache holds more entries than its capacity. Any of these is an
    /// internal bug, never a recoverable condition.
    pub fn assert_invariants(&self) {
        self.list.assert_linked();
        assert_eq!(
            self.map.len(),
            self.list.len(),
            "index and usage list disagree on entry count"
        );
        assert!(
            self.map.len() <= self.cap().get(),
            "cache holds {} entries with capacity {}",
            self.map.len(),
            self.cap()
        );
        for (key, &node) in self.map.iter() {
            match self.list.get(node) {
                Some((node_key, _)) => {
                    assert!(node_key == key, "index entry points at a node for another key")
                }
                None => panic!("index entry points at an unlinked node"),
            }
        }
        assert_eq!(
            self.metrics.core.entries,
            self.map.len() as u64,
            "entry counter drifted from index"
        );
    }

    /// Resolves `key`, promoting its node and recording the hit or miss.
    fn lookup<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.promote(node);
                self.metrics.core.record_hit();
                Some(node)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    fn promote(&mut self, node: Handle) {
        if self.list.front() != Some(node) {
            self.list.move_to_front(node);
            self.metrics.record_promotion();
        }
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction();
        trace!(
            capacity = self.cap().get(),
            "evicted least recently used entry"
        );
        Some((key, value))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries, most recently used first.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, (k, v))| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, (k, v))| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}
