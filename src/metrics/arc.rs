//! ARC Cache Metrics
//!
//! Metrics specific to the ARC (Adaptive Replacement Cache) algorithm:
//! ghost-list hits driving the adaptation and demotion traffic between the
//! resident and ghost partitions.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// ARC-specific metrics (extends CoreCacheMetrics)
///
/// The live value of the adaptive parameter `p` is reported by the cache
/// itself (it is state, not a counter), under the `target_recency` key.
#[derive(Debug, Default, Clone)]
pub struct ArcCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Ghost hits in B1 (favoring recency; grow p)
    pub b1_ghost_hits: u64,

    /// Ghost hits in B2 (favoring frequency; shrink p)
    pub b2_ghost_hits: u64,

    /// Demotions of T1 residents into the B1 ghost list
    pub t1_demotions: u64,

    /// Demotions of T2 residents into the B2 ghost list
    pub t2_demotions: u64,
}

impl ArcCacheMetrics {
    /// Creates a new ArcCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a ghost hit in B1.
    pub fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }

    /// Records a ghost hit in B2.
    pub fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }

    /// Records a demotion of the T1 tail into B1.
    pub fn record_t1_demotion(&mut self) {
        self.core.record_eviction();
        self.t1_demotions += 1;
    }

    /// Records a demotion of the T2 tail into B2.
    pub fn record_t2_demotion(&mut self) {
        self.core.record_eviction();
        self.t2_demotions += 1;
    }
}

impl CacheMetrics for ArcCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("b1_ghost_hits".to_string(), self.b1_ghost_hits as f64);
        metrics.insert("b2_ghost_hits".to_string(), self.b2_ghost_hits as f64);
        metrics.insert("t1_demotions".to_string(), self.t1_demotions as f64);
        metrics.insert("t2_demotions".to_string(), self.t2_demotions as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}
