//! Global hash rate chart for the block explorer
//!
//! This crate provides the statistics backend (REST API over the block
//! database) and the chart widget that estimates network hash rate from
//! mining difficulty and renders it over a selectable time range.

pub mod api;
pub mod cache;
pub mod chart;
pub mod cli;
pub mod config;
pub mod database;
pub mod effects;
pub mod error;
pub mod fetcher;
pub mod hashrate;
pub mod host;
pub mod labels;
pub mod logging;
pub mod models;
pub mod policy;
pub mod range;
pub mod store;
pub mod widget;

pub use error::{ExplorerError, Result};
pub use hashrate::{estimate_hash_rate, format_hash_rate};
pub use labels::{format_difficulty_axis_label, format_timestamp};
pub use range::TimeRange;
