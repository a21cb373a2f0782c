//! Configuration for the TinyLFU admission cache.

use super::SketchPolicy;

/// Configuration for a TinyLFU cache.
///
/// TinyLFU keeps an LRU main region of `capacity` entries and a frequency
/// sketch sized to it; the sketch variant is chosen here.
///
/// # Examples
///
/// ```
/// use cachekit::config::{SketchPolicy, TinyLfuCacheConfig};
///
/// let config = TinyLfuCacheConfig {
///     capacity: 100,
///     sketch: SketchPolicy::CaffeineBloom,
/// };
/// assert_eq!(config.capacity, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TinyLfuCacheConfig {
    /// Maximum number of key-value pairs the main region can hold.
    pub capacity: usize,

    /// Frequency sketch variant backing the admission test.
    pub sketch: SketchPolicy,
}

impl TinyLfuCacheConfig {
    /// Creates a new configuration with the default sketch variant.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sketch: SketchPolicy::default(),
        }
    }
}
