//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of per-entry frequency increments performed
    pub frequency_increments: u64,
}

impl LfuCacheMetrics {
    /// Creates a new LfuCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment caused by an access.
    pub fn record_frequency_increment(&mut self) {
        self.frequency_increments += 1;
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert(
            "frequency_increments".to_string(),
            self.frequency_increments as f64,
        );
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
