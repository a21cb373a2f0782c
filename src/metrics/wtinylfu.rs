//! W-TinyLFU Cache Metrics
//!
//! Metrics specific to the windowed TinyLFU policy: admission verdicts for
//! candidates leaving the window.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// W-TinyLFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone)]
pub struct WTinyLfuCacheMetrics {
    /// Core metrics tracked at the admission layer (misses reported by the
    /// host land here; hits are tracked by the window and main regions)
    pub core: CoreCacheMetrics,

    /// Window evictees admitted into the main region
    pub admissions: u64,

    /// Window evictees rejected by the frequency duel
    pub rejections: u64,
}

impl WTinyLfuCacheMetrics {
    /// Creates a new WTinyLfuCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an admission into the main region.
    pub fn record_admission(&mut self) {
        self.admissions += 1;
    }

    /// Records a rejected window evictee.
    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }
}

impl CacheMetrics for WTinyLfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("admissions".to_string(), self.admissions as f64);
        metrics.insert("rejections".to_string(), self.rejections as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "W-TinyLFU"
    }
}
