//! Current network hash rate route

use axum::{
    Router,
    routing::get,
    extract::State,
    Json,
};
use std::sync::Arc;
use crate::database::Database;
use crate::database::queries::BlockQueries;
use crate::error::{ExplorerError, Result};
use crate::hashrate::format_hash_rate;
use crate::models::HashRateSummary;
use crate::policy::NetworkPolicy;

#[derive(Clone)]
pub struct HashRateState {
    pub database: Arc<Database>,
    pub policy: NetworkPolicy,
}

pub fn routes(database: Arc<Database>, policy: NetworkPolicy) -> Router {
    let state = HashRateState { database, policy };
    Router::new()
        .route("/stats/hashrate", get(get_hashrate))
        .with_state(state)
}

#[axum::debug_handler]
async fn get_hashrate(
    State(state): State<HashRateState>,
) -> Result<Json<HashRateSummary>> {
    let pool = Arc::new(state.database.pool().clone());
    let latest = BlockQueries::latest(pool)
        .await?
        .ok_or_else(|| ExplorerError::NotFound("no blocks indexed".to_string()))?;

    let hash_rate = state.policy.estimate_hash_rate(latest.difficulty);

    Ok(Json(HashRateSummary {
        height: latest.height,
        timestamp: latest.timestamp,
        difficulty: latest.difficulty,
        block_time: state.policy.block_time_secs(),
        hash_rate,
        formatted: format_hash_rate(hash_rate),
    }))
}
