//! Axis and tooltip label formatting

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Utc};
use crate::error::{ExplorerError, Result};
use crate::hashrate::format_hash_rate;
use crate::policy::NetworkPolicy;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Time zone timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelTimeZone {
    /// Zone of the running environment.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl LabelTimeZone {
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        FixedOffset::east_opt(minutes * 60)
            .map(LabelTimeZone::Fixed)
            .ok_or_else(|| ExplorerError::Config(format!("UTC offset out of range: {} minutes", minutes)))
    }

    pub fn format(&self, epoch_secs: i64) -> String {
        match self {
            LabelTimeZone::Local => format_timestamp_in(epoch_secs, &Local),
            LabelTimeZone::Fixed(offset) => format_timestamp_in(epoch_secs, offset),
        }
    }
}

/// `"<day>. <Mon> <HH:MM>"` in the local time zone, e.g. `"5. Mar 07:04"`.
pub fn format_timestamp(epoch_secs: i64) -> String {
    format_timestamp_in(epoch_secs, &Local)
}

/// Same as [`format_timestamp`] for an explicit zone. Timestamps chrono cannot
/// represent are rendered as the raw number.
pub fn format_timestamp_in<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> String {
    match DateTime::<Utc>::from_timestamp(epoch_secs, 0) {
        Some(utc) => {
            let date = utc.with_timezone(tz);
            format!(
                "{}. {} {:02}:{:02}",
                date.day(),
                MONTH_ABBREVIATIONS[date.month0() as usize],
                date.hour(),
                date.minute()
            )
        }
        None => epoch_secs.to_string(),
    }
}

pub fn format_difficulty_axis_label(difficulty: f64, policy: &NetworkPolicy) -> String {
    format_hash_rate(policy.estimate_hash_rate(difficulty))
}
