//! Database query functions

use std::sync::Arc;
use crate::models::*;
use crate::range::TimeRange;
use crate::error::Result;

pub struct BlockQueries;

impl BlockQueries {
    pub async fn insert(pool: Arc<sqlx::SqlitePool>, block: &BlockRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO blocks (hash, height, timestamp, difficulty)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&block.hash)
        .bind(block.height)
        .bind(block.timestamp)
        .bind(block.difficulty)
        .execute(&*pool)
        .await?;

        Ok(())
    }

    pub async fn latest(pool: Arc<sqlx::SqlitePool>) -> Result<Option<BlockRecord>> {
        let block = sqlx::query_as::<_, BlockRecord>(
            r#"
            SELECT
                hash,
                height,
                timestamp,
                difficulty
            FROM blocks
            ORDER BY height DESC
            LIMIT 1
            "#
        )
        .fetch_optional(&*pool)
        .await?;

        Ok(block)
    }

    pub async fn count(pool: Arc<sqlx::SqlitePool>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) as count FROM blocks"
        )
        .fetch_one(&*pool)
        .await?;

        Ok(count)
    }
}

pub struct StatisticsQueries;

impl StatisticsQueries {
    /// Series for `metric` over the window of `range` ending at `now`.
    pub async fn series(
        pool: Arc<sqlx::SqlitePool>,
        metric: Metric,
        range: TimeRange,
        now: i64,
    ) -> Result<Vec<StatisticPoint>> {
        match metric {
            Metric::Difficulty => Self::difficulty_series(pool, range, now).await,
        }
    }

    /// Average difficulty per bucket, keyed by bucket start, oldest first.
    pub async fn difficulty_series(
        pool: Arc<sqlx::SqlitePool>,
        range: TimeRange,
        now: i64,
    ) -> Result<Vec<StatisticPoint>> {
        let bucket = range.bucket_secs();
        let since = now - range.window_secs();

        let points = sqlx::query_as::<_, StatisticPoint>(
            r#"
            SELECT
                bucket * ? AS timestamp,
                AVG(difficulty) AS difficulty
            FROM (
                SELECT timestamp / ? AS bucket, difficulty
                FROM blocks
                WHERE timestamp >= ? AND timestamp <= ?
            )
            GROUP BY bucket
            ORDER BY bucket
            "#
        )
        .bind(bucket)
        .bind(bucket)
        .bind(since)
        .bind(now)
        .fetch_all(&*pool)
        .await?;

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use tempfile::tempdir;

    const NOW: i64 = 1_614_902_400; // 2021-03-05T00:00:00Z

    fn block(height: i64, timestamp: i64, difficulty: f64) -> BlockRecord {
        BlockRecord {
            hash: format!("{:064x}", height),
            height,
            timestamp,
            difficulty,
        }
    }

    async fn seeded(blocks: &[BlockRecord]) -> (tempfile::TempDir, Arc<sqlx::SqlitePool>) {
        let temp_dir = tempdir().unwrap();
        let db = Database::new(&temp_dir.path().join("test.db")).await.unwrap();
        db.migrate().await.unwrap();
        let pool = Arc::new(db.pool().clone());
        for b in blocks {
            BlockQueries::insert(pool.clone(), b).await.unwrap();
        }
        (temp_dir, pool)
    }

    #[tokio::test]
    async fn test_empty_series() {
        let (_dir, pool) = seeded(&[]).await;
        let series = StatisticsQueries::series(pool, Metric::Difficulty, TimeRange::Day, NOW)
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_day_series_averages_hourly_buckets() {
        let hour = 3600;
        let (_dir, pool) = seeded(&[
            block(1, NOW - 3 * hour, 10.0),
            block(2, NOW - 3 * hour + 60, 20.0),
            block(3, NOW - hour, 40.0),
            // outside the window
            block(4, NOW - 2 * 86_400, 99.0),
        ])
        .await;

        let series = StatisticsQueries::difficulty_series(pool, TimeRange::Day, NOW)
            .await
            .unwrap();

        assert_eq!(
            series,
            vec![
                StatisticPoint { timestamp: NOW - 3 * hour, difficulty: 15.0 },
                StatisticPoint { timestamp: NOW - hour, difficulty: 40.0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_year_series_is_chronological() {
        let day = 86_400;
        let (_dir, pool) = seeded(&[
            block(3, NOW - 10 * day, 3.0),
            block(1, NOW - 300 * day, 1.0),
            block(2, NOW - 100 * day, 2.0),
        ])
        .await;

        let series = StatisticsQueries::difficulty_series(pool, TimeRange::Year, NOW)
            .await
            .unwrap();

        assert_eq!(series.len(), 3);
        assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(series.iter().map(|p| p.difficulty).collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        for point in &series {
            assert_eq!(point.timestamp % TimeRange::Year.bucket_secs(), 0);
        }
    }

    #[tokio::test]
    async fn test_latest_block() {
        let (_dir, pool) = seeded(&[block(7, NOW - 60, 5.0), block(8, NOW, 6.0)]).await;

        let latest = BlockQueries::latest(pool.clone()).await.unwrap().unwrap();
        assert_eq!(latest.height, 8);
        assert_eq!(latest.difficulty, 6.0);
        assert_eq!(BlockQueries::count(pool).await.unwrap(), 2);
    }
}
