//! Cache Metrics System
//!
//! Provides a flexible metrics system for cache algorithms using BTreeMap-based
//! metrics reporting. Each cache algorithm can track its own specific metrics
//! while implementing a common CacheMetrics trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several critical reasons:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for testing and benchmarking comparisons
//! - **Stable serialization**: JSON/CSV exports have predictable key ordering
//!
//! The performance difference (O(log n) vs O(1)) is negligible with ~15 metric
//! keys, but the deterministic behavior is invaluable when comparing runs.
//!
//! # Recording model
//!
//! Hits are recorded by the cache itself on the hit path. Misses are recorded
//! by the host through `record_miss()`: the cache cannot see the host's
//! fetch-on-miss, so the host reports it after consulting the backing store.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

// Re-export algorithm-specific metrics
pub mod arc;
pub mod lfu;
pub mod lru;
pub mod slru;
pub mod tinylfu;
pub mod wtinylfu;

pub use arc::ArcCacheMetrics;
pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;
pub use slru::SlruCacheMetrics;
pub use tinylfu::TinyLfuCacheMetrics;
pub use wtinylfu::WTinyLfuCacheMetrics;

/// Common metrics tracked by all cache algorithms.
///
/// Everything is entry-count based; the caches carry no notion of entry
/// size.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of requests (gets) made to the cache
    pub requests: u64,

    /// Number of requests that resulted in cache hits
    pub cache_hits: u64,

    /// Number of fresh insertions accepted by the cache
    pub insertions: u64,

    /// Number of overwrites of an already-resident key
    pub updates: u64,

    /// Number of items evicted due to capacity constraints or removal
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates a new CoreCacheMetrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit - when requested data was found in the cache.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss - when requested data was not found in the cache.
    ///
    /// Driven by the host after it consulted the backing store.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a fresh insertion.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an overwrite of an existing entry.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an eviction (capacity pressure or explicit removal).
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Calculates the cache hit rate.
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the cache miss rate.
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting.
    ///
    /// Uses BTreeMap to ensure deterministic, consistent ordering of metrics
    /// which is critical for reproducible testing and comparison results.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all cache algorithms must implement for metrics reporting.
///
/// This trait provides a uniform interface for retrieving metrics from any
/// cache implementation, with BTreeMap guaranteeing deterministic ordering.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    ///
    /// The returned BTreeMap contains all relevant metrics for the cache
    /// algorithm, including both core metrics and any algorithm-specific
    /// metrics. Keys are sorted alphabetically for consistent output.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification.
    ///
    /// # Returns
    /// The host-contract policy name (e.g., "LRU", "W-TinyLFU", "ARC")
    fn algorithm_name(&self) -> &'static str;
}
