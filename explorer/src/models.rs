//! Data models for the explorer

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ExplorerError;

/// One point of a statistics series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatisticPoint {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub difficulty: f64,
}

/// Statistic a series is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Difficulty,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "difficulty" => Ok(Metric::Difficulty),
            other => Err(ExplorerError::NotFound(format!("metric {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlockRecord {
    pub hash: String,
    pub height: i64,
    pub timestamp: i64,
    pub difficulty: f64,
}

/// Current network hash rate estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashRateSummary {
    pub height: i64,
    pub timestamp: i64,
    pub difficulty: f64,
    pub block_time: f64,
    pub hash_rate: f64,
    pub formatted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parse() {
        assert_eq!("difficulty".parse::<Metric>().unwrap(), Metric::Difficulty);
        assert!(matches!("supply".parse::<Metric>(), Err(ExplorerError::NotFound(_))));
    }

    #[test]
    fn test_point_json_shape() {
        let point = StatisticPoint { timestamp: 1_614_927_840, difficulty: 12.5 };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json, serde_json::json!({ "timestamp": 1_614_927_840, "difficulty": 12.5 }));
    }
}
