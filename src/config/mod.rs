//! Cache Configuration Module
//!
//! This module provides configuration structures for all cache algorithm
//! implementations, plus the policy name enums that form the contract
//! between host configuration and core construction.
//!
//! # Design Philosophy
//!
//! Each cache is created from its configuration struct as the **single entry
//! point**:
//!
//! - **Consistent API**: every cache is created the same way, `Cache::init(config, None)`
//! - **Type safety**: all required parameters are provided at construction
//! - **Extensible**: new parameters can be added without breaking existing code
//!
//! Capacities are plain `usize` values. A capacity of zero is legal but
//! degenerate: such a cache stores nothing, `put` reports the insertion and
//! `get` always misses.
//!
//! # Configs
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | [`LruCacheConfig`] | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | [`SlruCacheConfig`] | [`SlruCache`](crate::SlruCache) | Segmented LRU |
//! | [`LfuCacheConfig`] | [`LfuCache`](crate::LfuCache) | Least Frequently Used |
//! | [`ArcCacheConfig`] | [`ArcCache`](crate::ArcCache) | Adaptive Replacement Cache |
//! | [`TinyLfuCacheConfig`] | [`TinyLfuCache`](crate::TinyLfuCache) | TinyLFU admission over LRU |
//! | [`WTinyLfuCacheConfig`] | [`WTinyLfuCache`](crate::WTinyLfuCache) | Windowed TinyLFU |
//!
//! # Examples
//!
//! ```
//! use cachekit::config::LruCacheConfig;
//! use cachekit::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<&str, i32> = LruCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

use core::fmt;
use core::str::FromStr;

pub mod arc;
pub mod lfu;
pub mod lru;
pub mod slru;
pub mod tinylfu;
pub mod wtinylfu;

// Re-exports for convenience
pub use arc::ArcCacheConfig;
pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;
pub use slru::SlruCacheConfig;
pub use tinylfu::TinyLfuCacheConfig;
pub use wtinylfu::WTinyLfuCacheConfig;

/// Eviction policy names understood by host configuration.
///
/// The string forms returned by [`CachePolicy::name`] (and parsed by
/// `FromStr`) are the contract between host config files and core
/// construction; they also appear as
/// [`algorithm_name`](crate::metrics::CacheMetrics::algorithm_name) in
/// metrics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used.
    Lru,
    /// Segmented LRU.
    Slru,
    /// Least Frequently Used.
    Lfu,
    /// TinyLFU admission in front of an LRU main region.
    TinyLfu,
    /// Windowed TinyLFU: window LRU + SLRU main region.
    WTinyLfu,
    /// Adaptive Replacement Cache.
    Arc,
}

impl CachePolicy {
    /// Returns the policy name as it appears in host configuration.
    pub fn name(&self) -> &'static str {
        match self {
            CachePolicy::Lru => "LRU",
            CachePolicy::Slru => "SLRU",
            CachePolicy::Lfu => "LFU",
            CachePolicy::TinyLfu => "TinyLFU",
            CachePolicy::WTinyLfu => "W-TinyLFU",
            CachePolicy::Arc => "ARC",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LRU" => Ok(CachePolicy::Lru),
            "SLRU" => Ok(CachePolicy::Slru),
            "LFU" => Ok(CachePolicy::Lfu),
            "TinyLFU" => Ok(CachePolicy::TinyLfu),
            "W-TinyLFU" => Ok(CachePolicy::WTinyLfu),
            "ARC" => Ok(CachePolicy::Arc),
            _ => Err(UnknownPolicy),
        }
    }
}

/// Frequency sketch variant names understood by host configuration.
///
/// Selects the sketch backing sketch-based policies (TinyLFU, W-TinyLFU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SketchPolicy {
    /// Plain 4-bit counting Bloom filter with caller-driven aging.
    Bloom,
    /// One-bit doorkeeper filter in front of a plain counting sketch.
    DoorkeeperBloom,
    /// Caffeine-style sketch with periodic internal aging.
    #[default]
    CaffeineBloom,
}

impl SketchPolicy {
    /// Returns the sketch variant name as it appears in host configuration.
    pub fn name(&self) -> &'static str {
        match self {
            SketchPolicy::Bloom => "Bloom",
            SketchPolicy::DoorkeeperBloom => "DoorkeeperBloom",
            SketchPolicy::CaffeineBloom => "CaffeineBloom",
        }
    }
}

impl fmt::Display for SketchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SketchPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bloom" => Ok(SketchPolicy::Bloom),
            "DoorkeeperBloom" => Ok(SketchPolicy::DoorkeeperBloom),
            "CaffeineBloom" => Ok(SketchPolicy::CaffeineBloom),
            _ => Err(UnknownPolicy),
        }
    }
}

/// Error returned when a policy name string is not part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPolicy;

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown cache policy name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names_round_trip() {
        let policies = [
            CachePolicy::Lru,
            CachePolicy::Slru,
            CachePolicy::Lfu,
            CachePolicy::TinyLfu,
            CachePolicy::WTinyLfu,
            CachePolicy::Arc,
        ];
        for policy in policies {
            assert_eq!(policy.name().parse::<CachePolicy>(), Ok(policy));
        }
        assert_eq!("LFUDA".parse::<CachePolicy>(), Err(UnknownPolicy));
    }

    #[test]
    fn test_sketch_names_round_trip() {
        let sketches = [
            SketchPolicy::Bloom,
            SketchPolicy::DoorkeeperBloom,
            SketchPolicy::CaffeineBloom,
        ];
        for sketch in sketches {
            assert_eq!(sketch.name().parse::<SketchPolicy>(), Ok(sketch));
        }
        assert_eq!("Trivial".parse::<SketchPolicy>(), Err(UnknownPolicy));
    }

    #[test]
    fn test_default_sketch_is_caffeine() {
        assert_eq!(SketchPolicy::default(), SketchPolicy::CaffeineBloom);
    }
}
