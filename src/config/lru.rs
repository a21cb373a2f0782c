//! Configuration for the Least Recently Used (LRU) cache.

/// Configuration for an LRU cache.
///
/// # Examples
///
/// ```
/// use cachekit::config::LruCacheConfig;
///
/// let config = LruCacheConfig { capacity: 100 };
/// assert_eq!(config.capacity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    /// A capacity of zero is legal but degenerate: nothing is ever stored.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Creates a new configuration with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}
