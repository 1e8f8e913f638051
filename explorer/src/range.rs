//! Selectable time ranges for statistics charts

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ExplorerError;

const HOUR: i64 = 60 * 60;
const DAY: i64 = 24 * HOUR;

/// Window over which statistics are aggregated and fetched.
///
/// Variants are ordered the way the range selector presents them; the
/// position in [`TimeRange::ALL`] is the tab index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::Day, TimeRange::Week, TimeRange::Month, TimeRange::Year];

    /// Position of this range in the selector.
    pub fn index(self) -> usize {
        match self {
            TimeRange::Day => 0,
            TimeRange::Week => 1,
            TimeRange::Month => 2,
            TimeRange::Year => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Identifier used on the wire, e.g. `month`.
    pub fn name(self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }

    /// Tab caption.
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Day => "Day",
            TimeRange::Week => "Week",
            TimeRange::Month => "Month",
            TimeRange::Year => "Year",
        }
    }

    /// Length of the window ending at "now", in seconds.
    pub fn window_secs(self) -> i64 {
        match self {
            TimeRange::Day => DAY,
            TimeRange::Week => 7 * DAY,
            TimeRange::Month => 30 * DAY,
            TimeRange::Year => 365 * DAY,
        }
    }

    /// Width of one aggregated point, in seconds.
    pub fn bucket_secs(self) -> i64 {
        match self {
            TimeRange::Day => HOUR,
            TimeRange::Week => 6 * HOUR,
            TimeRange::Month => DAY,
            TimeRange::Year => 7 * DAY,
        }
    }

    /// How long a served series stays cached.
    pub fn cache_ttl_secs(self) -> u64 {
        match self {
            TimeRange::Day => 60,
            TimeRange::Week => 300,
            TimeRange::Month => 900,
            TimeRange::Year => 3600,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeRange {
    type Err = ExplorerError;

    /// Accepts either the range name or its selector index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(range) = Self::ALL.iter().find(|r| r.name().eq_ignore_ascii_case(s)) {
            return Ok(*range);
        }
        s.parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| ExplorerError::InvalidInput(format!("unknown range: {}", s)))
    }
}
