//! Sources of statistics series

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use crate::database::{Database, StatisticsQueries};
use crate::error::Result;
use crate::models::{Metric, StatisticPoint};
use crate::range::TimeRange;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retrieves a statistics series for a metric over a range.
#[async_trait]
pub trait StatisticsFetcher: Send + Sync {
    async fn fetch_statistics(&self, metric: Metric, range: TimeRange) -> Result<Vec<StatisticPoint>>;
}

/// Fetches series from the explorer REST API.
pub struct HttpStatisticsFetcher {
    client: Client,
    base_url: Url,
}

impl HttpStatisticsFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn statistics_url(&self, metric: Metric, range: TimeRange) -> Result<Url> {
        Ok(self.base_url.join(&format!("api/v1/statistics/{}/{}", metric, range))?)
    }
}

#[async_trait]
impl StatisticsFetcher for HttpStatisticsFetcher {
    async fn fetch_statistics(&self, metric: Metric, range: TimeRange) -> Result<Vec<StatisticPoint>> {
        let url = self.statistics_url(metric, range)?;
        tracing::debug!("GET {}", url);

        let series = self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<StatisticPoint>>()
            .await?;

        Ok(series)
    }
}

/// Reads series straight from the explorer database.
pub struct DatabaseStatisticsFetcher {
    database: Arc<Database>,
}

impl DatabaseStatisticsFetcher {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl StatisticsFetcher for DatabaseStatisticsFetcher {
    async fn fetch_statistics(&self, metric: Metric, range: TimeRange) -> Result<Vec<StatisticPoint>> {
        let pool = Arc::new(self.database.pool().clone());
        StatisticsQueries::series(pool, metric, range, chrono::Utc::now().timestamp()).await
    }
}
