//! Cache Configuration Module
//!
//! Configuration for [`LruCache`](crate::LruCache). The struct has a public
//! field so it can be built directly from a `NonZeroUsize`, or validated from
//! a plain integer when the capacity comes from user input.
//!
//! # Sizing
//!
//! `capacity` is the maximum number of entries. Each entry costs one arena
//! slot (key, value and two links) plus one hash index slot, so memory grows
//! linearly with the number of entries held. Only a bounded prefix is
//! reserved at construction; a very large capacity costs nothing until keys
//! arrive, and a full cache reuses its slots instead of allocating.
//!
//! # Examples
//!
//! ```
//! use recency_lru::config::LruCacheConfig;
//! use recency_lru::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Build directly when the capacity is known to be positive
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // Validate untrusted input
//! assert!(LruCacheConfig::try_from(-1i64).is_err());
//! assert!(LruCacheConfig::new(0).is_err());
//! ```

extern crate alloc;

use crate::error::{CacheError, Result};
use alloc::format;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. A full cache
///   evicts its least recently used entry before admitting a new key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Validates `capacity` and builds a config.
    ///
    /// Returns [`CacheError::InvalidArgument`] for a capacity of zero. The
    /// value is never clamped.
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(|capacity| LruCacheConfig { capacity })
            .ok_or_else(|| {
                CacheError::InvalidArgument(format!(
                    "capacity must be positive, got {capacity}"
                ))
            })
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: usize) -> Result<Self> {
        LruCacheConfig::new(capacity)
    }
}

impl TryFrom<i64> for LruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: i64) -> Result<Self> {
        let capacity = usize::try_from(capacity).map_err(|_| {
            CacheError::InvalidArgument(format!("capacity must be positive, got {capacity}"))
        })?;
        LruCacheConfig::new(capacity)
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        LruCacheConfig { capacity }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
