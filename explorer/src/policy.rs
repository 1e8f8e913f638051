//! Network policy constants consumed by the hash rate estimate

use serde::Serialize;
use crate::error::{ExplorerError, Result};
use crate::hashrate;

/// Target seconds between blocks when nothing else is configured.
pub const DEFAULT_BLOCK_TIME_SECS: f64 = 60.0;

/// Validated network policy. Holding one guarantees a positive, finite block time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkPolicy {
    block_time_secs: f64,
}

impl NetworkPolicy {
    pub fn new(block_time_secs: f64) -> Result<Self> {
        if !(block_time_secs.is_finite() && block_time_secs > 0.0) {
            return Err(ExplorerError::InvalidBlockTime(block_time_secs));
        }
        Ok(Self { block_time_secs })
    }

    pub fn block_time_secs(&self) -> f64 {
        self.block_time_secs
    }

    /// Estimated hashes per second for `difficulty` under this policy.
    pub fn estimate_hash_rate(&self, difficulty: f64) -> f64 {
        hashrate::hashes_per_second(difficulty, self.block_time_secs)
    }
}

impl Default for NetworkPolicy {
    fn default() -> Self {
        Self { block_time_secs: DEFAULT_BLOCK_TIME_SECS }
    }
}
