use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hashrate-explorer")]
#[command(about = "Block explorer statistics API", long_about = None)]
pub struct ServerArgs {
    /// Path to configuration file (optional, uses defaults if not provided)
    #[arg(short, long)]
    pub config_path: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    pub database_path: Option<PathBuf>,

    /// Address the API binds to
    #[arg(long)]
    pub bind_address: Option<String>,

    /// API port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Redis URL for response caching
    #[arg(long)]
    pub redis_url: Option<String>,

    /// Target seconds between blocks
    #[arg(long)]
    pub block_time: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Parser, Debug)]
#[command(name = "hashrate-chart")]
#[command(about = "Global hash rate chart rendered in the terminal", long_about = None)]
pub struct ChartArgs {
    /// Path to configuration file (optional, uses defaults if not provided)
    #[arg(short, long)]
    pub config_path: Option<PathBuf>,

    /// Explorer API base URL
    #[arg(short, long)]
    pub api_url: Option<String>,

    /// Target seconds between blocks
    #[arg(long)]
    pub block_time: Option<f64>,

    /// Render timestamps at this UTC offset instead of local time
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

pub fn parse_server_args() -> ServerArgs {
    ServerArgs::parse()
}

pub fn parse_chart_args() -> ChartArgs {
    ChartArgs::parse()
}
