//! Configuration for the Windowed TinyLFU (W-TinyLFU) cache.

use super::SketchPolicy;
use core::fmt;

/// Configuration for a W-TinyLFU cache.
///
/// The capacity splits into a small admission **window** (1% of the total,
/// at least one entry) and an SLRU **main region** taking the rest, with an
/// 80% protected share. Every new key first passes through the window; the
/// window's LRU evictee must win the frequency duel against the main
/// region's nominated victim to enter it.
///
/// # Examples
///
/// ```
/// use cachekit::config::WTinyLfuCacheConfig;
///
/// let config = WTinyLfuCacheConfig::new(1000);
/// assert_eq!(config.window_capacity(), 10);
/// assert_eq!(config.main_capacity(), 990);
/// assert_eq!(config.protected_capacity(), 792);
///
/// // Small caches still get a window entry
/// let small = WTinyLfuCacheConfig::new(10);
/// assert_eq!(small.window_capacity(), 1);
/// assert_eq!(small.main_capacity(), 9);
/// ```
#[derive(Clone, Copy)]
pub struct WTinyLfuCacheConfig {
    /// Total capacity across window and main region
    capacity: usize,

    /// Frequency sketch variant backing the admission test
    sketch: SketchPolicy,
}

impl WTinyLfuCacheConfig {
    /// Creates a new configuration with the default sketch variant.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sketch: SketchPolicy::default(),
        }
    }

    /// Creates a new configuration with an explicit sketch variant.
    pub fn with_sketch(capacity: usize, sketch: SketchPolicy) -> Self {
        Self { capacity, sketch }
    }

    /// Returns the total capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the sketch variant backing the admission test.
    pub fn sketch(&self) -> SketchPolicy {
        self.sketch
    }

    /// Capacity of the admission window (1% of the total, at least 1).
    pub fn window_capacity(&self) -> usize {
        if self.capacity == 0 {
            0
        } else {
            (self.capacity / 100).max(1)
        }
    }

    /// Capacity of the SLRU main region.
    pub fn main_capacity(&self) -> usize {
        self.capacity - self.window_capacity()
    }

    /// Protected share of the main region (80%).
    pub fn protected_capacity(&self) -> usize {
        self.main_capacity() * 4 / 5
    }
}

impl fmt::Debug for WTinyLfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WTinyLfuCacheConfig")
            .field("capacity", &self.capacity)
            .field("window_capacity", &self.window_capacity())
            .field("main_capacity", &self.main_capacity())
            .field("sketch", &self.sketch)
            .finish()
    }
}
