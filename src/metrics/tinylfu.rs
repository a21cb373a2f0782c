//! TinyLFU Cache Metrics
//!
//! Metrics specific to the TinyLFU admission policy: the outcome of the
//! frequency duel between candidates and nominated victims.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// TinyLFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone)]
pub struct TinyLfuCacheMetrics {
    /// Core metrics tracked at the admission layer (misses reported by the
    /// host land here; hits are tracked by the main region)
    pub core: CoreCacheMetrics,

    /// Candidates admitted over a nominated victim
    pub admissions: u64,

    /// Candidates rejected by the frequency duel
    pub rejections: u64,
}

impl TinyLfuCacheMetrics {
    /// Creates a new TinyLfuCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an admission (candidate won the frequency duel).
    pub fn record_admission(&mut self) {
        self.admissions += 1;
    }

    /// Records a rejection (victim kept its slot).
    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }
}

impl CacheMetrics for TinyLfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("admissions".to_string(), self.admissions as f64);
        metrics.insert("rejections".to_string(), self.rejections as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "TinyLFU"
    }
}
