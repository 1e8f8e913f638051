//! Executes widget effects against a fetcher and the shared store

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use crate::fetcher::StatisticsFetcher;
use crate::store::StatisticsStore;
use crate::widget::Effect;

#[derive(Clone)]
pub struct EffectRunner {
    fetcher: Arc<dyn StatisticsFetcher>,
    store: Arc<StatisticsStore>,
}

impl EffectRunner {
    pub fn new(fetcher: Arc<dyn StatisticsFetcher>, store: Arc<StatisticsStore>) -> Self {
        Self { fetcher, store }
    }

    /// Starts the effect without waiting for it. The outcome reaches the
    /// widget only through the store; the handle is for callers that need to
    /// join, e.g. on shutdown.
    pub fn run(&self, effect: Effect) -> JoinHandle<()> {
        match effect {
            Effect::FetchStatistics { metric, range } => {
                let request = self.store.begin_request();
                let fetcher = self.fetcher.clone();
                let store = self.store.clone();
                debug!("Fetching {} statistics for {} ({:?})", metric, range, request);

                tokio::spawn(async move {
                    let result = fetcher.fetch_statistics(metric, range).await;
                    if let Err(e) = &result {
                        warn!("Failed to fetch {} statistics for {}: {}", metric, range, e);
                    }
                    if store.complete(request, range, result) {
                        debug!("Committed {} statistics for {} ({:?})", metric, range, request);
                    } else {
                        debug!("Discarded stale {} statistics for {} ({:?})", metric, range, request);
                    }
                })
            }
        }
    }
}
