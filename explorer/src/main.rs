//! Explorer statistics API - main entry point

use std::sync::Arc;
use tracing::{info, warn};
use hashrate_explorer::{
    api::ApiServer,
    cache::Cache,
    cli,
    config::Config,
    database::Database,
    logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse_server_args();
    logging::init(&args.log_level, args.log_json);

    info!("Starting explorer statistics API");

    let mut config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env();
    config.apply_server_overrides(&args);

    let policy = config.network_policy()?;
    info!("Block time: {}s", policy.block_time_secs());

    info!("Database path: {:?}", config.database.path);
    let database = Arc::new(Database::new(&config.database.path).await?);
    database.migrate().await?;
    info!("Database migrations completed");

    let cache = match &config.cache.redis_url {
        Some(url) => match Cache::new(url) {
            Ok(cache) => {
                info!("Caching statistics in Redis at {}", url);
                Some(Arc::new(cache))
            }
            Err(e) => {
                warn!("Redis unavailable, serving uncached: {}", e);
                None
            }
        },
        None => None,
    };

    let api_server = ApiServer::new(
        database,
        cache,
        policy,
        &config.server.bind_address,
        config.server.port,
    );
    api_server.start().await?;

    Ok(())
}
