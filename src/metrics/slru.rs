//! SLRU Cache Metrics
//!
//! Metrics specific to the SLRU (Segmented LRU) cache algorithm, tracking
//! traffic between the probationary and protected segments.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// SLRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone)]
pub struct SlruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Hits that landed in the probationary segment
    pub probationary_hits: u64,

    /// Hits that landed in the protected segment
    pub protected_hits: u64,

    /// Promotions from probationary to protected
    pub promotions: u64,

    /// Demotions from protected back to probationary
    pub demotions: u64,

    /// Evictions taken from the probationary segment
    pub probationary_evictions: u64,

    /// Evictions taken from the protected segment
    pub protected_evictions: u64,
}

impl SlruCacheMetrics {
    /// Creates a new SlruCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit in the probationary segment.
    pub fn record_probationary_hit(&mut self) {
        self.core.record_hit();
        self.probationary_hits += 1;
    }

    /// Records a hit in the protected segment.
    pub fn record_protected_hit(&mut self) {
        self.core.record_hit();
        self.protected_hits += 1;
    }

    /// Records a promotion from probationary to protected.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a demotion from protected to probationary.
    pub fn record_demotion(&mut self) {
        self.demotions += 1;
    }

    /// Records an eviction from the probationary segment.
    pub fn record_probationary_eviction(&mut self) {
        self.core.record_eviction();
        self.probationary_evictions += 1;
    }

    /// Records an eviction from the protected segment.
    pub fn record_protected_eviction(&mut self) {
        self.core.record_eviction();
        self.protected_evictions += 1;
    }
}

impl CacheMetrics for SlruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("demotions".to_string(), self.demotions as f64);
        metrics.insert(
            "probationary_evictions".to_string(),
            self.probationary_evictions as f64,
        );
        metrics.insert(
            "probationary_hits".to_string(),
            self.probationary_hits as f64,
        );
        metrics.insert(
            "protected_evictions".to_string(),
            self.protected_evictions as f64,
        );
        metrics.insert("protected_hits".to_string(), self.protected_hits as f64);
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "SLRU"
    }
}
