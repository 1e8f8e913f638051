//! Explorer configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use crate::cli::{ChartArgs, ServerArgs};
use crate::error::Result;
use crate::labels::LabelTimeZone;
use crate::policy::{NetworkPolicy, DEFAULT_BLOCK_TIME_SECS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub policy: PolicyConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Caching is disabled when unset.
    pub redis_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub block_time_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    /// Local time zone when unset.
    pub utc_offset_minutes: Option<i32>,
}

impl Config {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            tracing::warn!("Config file {:?} not found, using defaults", path);
            Ok(Config::default())
        }
    }

    /// `DATABASE_URL` (optionally `sqlite:`-prefixed) and `REDIS_URL`.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.path = PathBuf::from(url.trim_start_matches("sqlite:"));
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.cache.redis_url = Some(url);
        }
    }

    pub fn apply_server_overrides(&mut self, args: &ServerArgs) {
        if let Some(path) = &args.database_path {
            self.database.path = path.clone();
        }

        if let Some(bind_address) = &args.bind_address {
            self.server.bind_address = bind_address.clone();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(redis_url) = &args.redis_url {
            self.cache.redis_url = Some(redis_url.clone());
        }

        if let Some(block_time) = args.block_time {
            self.policy.block_time_secs = block_time;
        }
    }

    pub fn apply_chart_overrides(&mut self, args: &ChartArgs) {
        if let Some(api_url) = &args.api_url {
            self.client.api_url = api_url.clone();
        }

        if let Some(block_time) = args.block_time {
            self.policy.block_time_secs = block_time;
        }

        if let Some(minutes) = args.utc_offset_minutes {
            self.client.utc_offset_minutes = Some(minutes);
        }
    }

    pub fn network_policy(&self) -> Result<NetworkPolicy> {
        NetworkPolicy::new(self.policy.block_time_secs)
    }

    pub fn label_time_zone(&self) -> Result<LabelTimeZone> {
        match self.client.utc_offset_minutes {
            Some(minutes) => LabelTimeZone::from_offset_minutes(minutes),
            None => Ok(LabelTimeZone::Local),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/explorer.db"),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            block_time_secs: DEFAULT_BLOCK_TIME_SECS,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            utc_offset_minutes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.policy.block_time_secs, 60.0);
        assert!(config.cache.redis_url.is_none());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        fs::write(&path, "[policy]\nblock_time_secs = 30.0\n\n[client]\nutc_offset_minutes = 120\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.policy.block_time_secs, 30.0);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.network_policy().unwrap().block_time_secs(), 30.0);
        assert_eq!(config.label_time_zone().unwrap(), LabelTimeZone::from_offset_minutes(120).unwrap());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        fs::write(&path, "[server\nport = ").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        let args = ServerArgs::parse_from([
            "hashrate-explorer", "--port", "9000", "--redis-url", "redis://cache:6379", "--block-time", "0",
        ]);
        config.apply_server_overrides(&args);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.redis_url.as_deref(), Some("redis://cache:6379"));
        assert!(config.network_policy().is_err());
    }
}
