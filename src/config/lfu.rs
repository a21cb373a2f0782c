//! Configuration for the Least Frequently Used (LFU) cache.

/// Configuration for an LFU cache.
///
/// # Examples
///
/// ```
/// use cachekit::config::LfuCacheConfig;
///
/// let config = LfuCacheConfig { capacity: 100 };
/// assert_eq!(config.capacity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    /// A capacity of zero is legal but degenerate: nothing is ever stored.
    pub capacity: usize,
}

impl LfuCacheConfig {
    /// Creates a new configuration with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}
