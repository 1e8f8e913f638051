//! Statistics series routes

use axum::{
    Router,
    routing::get,
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use crate::cache::{statistics_key, Cache};
use crate::database::Database;
use crate::database::queries::StatisticsQueries;
use crate::error::Result;
use crate::models::{Metric, StatisticPoint};
use crate::range::TimeRange;

#[derive(Clone)]
pub struct StatisticsState {
    pub database: Arc<Database>,
    pub cache: Option<Arc<Cache>>,
}

pub fn routes(database: Arc<Database>, cache: Option<Arc<Cache>>) -> Router {
    let state = StatisticsState { database, cache };
    Router::new()
        .route("/statistics/:metric/:range", get(get_statistics))
        .with_state(state)
}

#[axum::debug_handler]
async fn get_statistics(
    State(state): State<StatisticsState>,
    Path((metric, range)): Path<(String, String)>,
) -> Result<Json<Vec<StatisticPoint>>> {
    let metric: Metric = metric.parse()?;
    let range: TimeRange = range.parse()?;
    let key = statistics_key(metric, range);

    if let Some(cache) = &state.cache {
        match cache.get::<Vec<StatisticPoint>>(&key).await {
            Ok(Some(series)) => return Ok(Json(series)),
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache read for {} failed: {}", key, e),
        }
    }

    let pool = Arc::new(state.database.pool().clone());
    let now = chrono::Utc::now().timestamp();
    let series = StatisticsQueries::series(pool, metric, range, now).await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&key, &series, range.cache_ttl_secs()).await {
            tracing::warn!("Cache write for {} failed: {}", key, e);
        }
    }

    Ok(Json(series))
}
