//! Configuration for the Segmented Least Recently Used (SLRU) cache.

use core::fmt;

/// Configuration for an SLRU (Segmented LRU) cache.
///
/// SLRU divides the cache into two segments: a probationary segment for new
/// entries and a protected segment for frequently accessed entries.
///
/// # Examples
///
/// ```
/// use cachekit::config::SlruCacheConfig;
///
/// // Total capacity of 4 items, protected capacity of 2 items
/// let config = SlruCacheConfig::new(4, 2);
///
/// assert_eq!(config.capacity(), 4);
/// assert_eq!(config.protected_capacity(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct SlruCacheConfig {
    /// Total capacity of the cache (protected + probationary)
    capacity: usize,

    /// Maximum size for the protected segment
    protected_capacity: usize,
}

impl SlruCacheConfig {
    /// Creates a new configuration for an SLRU cache.
    ///
    /// # Arguments
    /// * `capacity` - Total number of key-value pairs the cache can hold
    /// * `protected_capacity` - Maximum size of the protected segment
    ///
    /// # Panics
    /// Panics if `protected_capacity` is greater than `capacity`
    pub fn new(capacity: usize, protected_capacity: usize) -> Self {
        assert!(
            protected_capacity <= capacity,
            "Protected capacity must be less than or equal to total capacity"
        );

        Self {
            capacity,
            protected_capacity,
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the maximum size of the protected segment.
    pub fn protected_capacity(&self) -> usize {
        self.protected_capacity
    }

    /// Returns the probationary share of the capacity.
    pub fn probationary_capacity(&self) -> usize {
        self.capacity - self.protected_capacity
    }
}

impl fmt::Debug for SlruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlruCacheConfig")
            .field("capacity", &self.capacity)
            .field("protected_capacity", &self.protected_capacity)
            .finish()
    }
}
