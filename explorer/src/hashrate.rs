//! Network hash rate estimation from mining difficulty

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::{ExplorerError, Result};

/// Expected hash attempts per unit of difficulty (2^16).
pub const DIFFICULTY_WORK_FACTOR: f64 = 65536.0;

const UNIT_STEP: f64 = 1000.0;

/// Estimates hashes per second from a difficulty value and the target block interval.
///
/// The result is `round(difficulty * 2^16 / block_time_secs)`. Negative or NaN
/// difficulty is treated as zero; results beyond `f64::MAX` saturate there. A block time that is not a positive finite
/// number is rejected instead of dividing by it.
pub fn estimate_hash_rate(difficulty: f64, block_time_secs: f64) -> Result<f64> {
    if !(block_time_secs.is_finite() && block_time_secs > 0.0) {
        return Err(ExplorerError::InvalidBlockTime(block_time_secs));
    }
    Ok(hashes_per_second(difficulty, block_time_secs))
}

/// Caller guarantees `block_time_secs > 0`.
pub(crate) fn hashes_per_second(difficulty: f64, block_time_secs: f64) -> f64 {
    (difficulty.max(0.0) * DIFFICULTY_WORK_FACTOR / block_time_secs)
        .round()
        .min(f64::MAX)
}

/// Renders a hashes-per-second value with the largest unit that keeps it below 1000.
pub fn format_hash_rate(value: f64) -> String {
    HashRate::scaled(value).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HashRateUnit {
    #[serde(rename = "H/s")]
    Hashes,
    #[serde(rename = "kH/s")]
    KiloHashes,
    #[serde(rename = "MH/s")]
    MegaHashes,
    #[serde(rename = "GH/s")]
    GigaHashes,
}

impl HashRateUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            HashRateUnit::Hashes => "H/s",
            HashRateUnit::KiloHashes => "kH/s",
            HashRateUnit::MegaHashes => "MH/s",
            HashRateUnit::GigaHashes => "GH/s",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            HashRateUnit::Hashes => Some(HashRateUnit::KiloHashes),
            HashRateUnit::KiloHashes => Some(HashRateUnit::MegaHashes),
            HashRateUnit::MegaHashes => Some(HashRateUnit::GigaHashes),
            HashRateUnit::GigaHashes => None,
        }
    }
}

/// A hash rate expressed in a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HashRate {
    pub value: f64,
    pub unit: HashRateUnit,
}

impl HashRate {
    /// Scales `hashes_per_second` down by 1000 until it drops below 1000 or
    /// reaches GH/s. Each comparison is made on the already scaled value.
    pub fn scaled(hashes_per_second: f64) -> Self {
        let mut value = hashes_per_second.max(0.0).min(f64::MAX);
        let mut unit = HashRateUnit::Hashes;
        while value >= UNIT_STEP {
            match unit.next() {
                Some(next) => {
                    value /= UNIT_STEP;
                    unit = next;
                }
                None => break,
            }
        }
        Self { value, unit }
    }
}

impl fmt::Display for HashRate {
    // Half away from zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} {}", self.value.round(), self.unit.symbol())
    }
}
