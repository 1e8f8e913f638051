//! Shared statistics state read by widgets and written by fetches

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use crate::error::Result;
use crate::models::StatisticPoint;
use crate::range::TimeRange;

/// Identifies one issued fetch. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone)]
pub struct BlocksState {
    /// Last successfully fetched series.
    pub statistics: Arc<[StatisticPoint]>,
    /// Range `statistics` was fetched for, `None` before the first success.
    pub range: Option<TimeRange>,
    /// Message of the most recent failed fetch, cleared by the next success.
    pub last_error: Option<String>,
    /// Request whose outcome was committed last, successful or not.
    pub completed: Option<RequestId>,
}

impl Default for BlocksState {
    fn default() -> Self {
        Self {
            statistics: Arc::from(Vec::new()),
            range: None,
            last_error: None,
            completed: None,
        }
    }
}

/// Owner of [`BlocksState`]. Only completed fetches write to it; readers
/// take snapshots or subscribe for change notifications.
pub struct StatisticsStore {
    state: watch::Sender<BlocksState>,
    latest_request: AtomicU64,
}

impl StatisticsStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BlocksState::default());
        Self {
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BlocksState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BlocksState {
        self.state.borrow().clone()
    }

    /// Registers a new fetch, superseding every earlier one.
    pub fn begin_request(&self) -> RequestId {
        RequestId(self.latest_request.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, request: RequestId) -> bool {
        self.latest_request.load(Ordering::SeqCst) == request.0
    }

    /// True when `state` holds the outcome of the newest issued request.
    pub fn is_settled(&self, state: &BlocksState) -> bool {
        state.completed.map_or(false, |request| self.is_current(request))
    }

    /// Commits the outcome of `request`. Returns `false` without touching the
    /// state when a newer request has been issued since.
    ///
    /// The staleness check runs under the watch lock, so a newer request that
    /// commits concurrently always lands after this one.
    pub fn complete(
        &self,
        request: RequestId,
        range: TimeRange,
        result: Result<Vec<StatisticPoint>>,
    ) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(request) {
                return false;
            }
            match result {
                Ok(series) => {
                    state.statistics = series.into();
                    state.range = Some(range);
                    state.last_error = None;
                }
                Err(e) => {
                    state.last_error = Some(e.to_string());
                }
            }
            state.completed = Some(request);
            true
        })
    }
}

impl Default for StatisticsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;

    fn series(difficulty: f64) -> Vec<StatisticPoint> {
        vec![StatisticPoint { timestamp: 1_000, difficulty }]
    }

    #[test]
    fn test_starts_empty() {
        let store = StatisticsStore::new();
        let state = store.snapshot();
        assert!(state.statistics.is_empty());
        assert_eq!(state.range, None);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_commit_current_request() {
        let store = StatisticsStore::new();
        let request = store.begin_request();

        assert!(store.complete(request, TimeRange::Week, Ok(series(3.0))));

        let state = store.snapshot();
        assert_eq!(&*state.statistics, &series(3.0)[..]);
        assert_eq!(state.range, Some(TimeRange::Week));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let store = StatisticsStore::new();
        let older = store.begin_request();
        let newer = store.begin_request();
        assert!(older < newer);

        assert!(store.complete(newer, TimeRange::Day, Ok(series(2.0))));
        assert!(!store.complete(older, TimeRange::Month, Ok(series(1.0))));

        let state = store.snapshot();
        assert_eq!(state.range, Some(TimeRange::Day));
        assert_eq!(state.statistics[0].difficulty, 2.0);
    }

    #[test]
    fn test_failure_keeps_series() {
        let store = StatisticsStore::new();
        let first = store.begin_request();
        store.complete(first, TimeRange::Month, Ok(series(5.0)));

        let second = store.begin_request();
        assert!(store.complete(second, TimeRange::Day, Err(ExplorerError::Internal("offline".into()))));

        let state = store.snapshot();
        assert_eq!(state.range, Some(TimeRange::Month));
        assert_eq!(state.statistics[0].difficulty, 5.0);
        assert_eq!(state.last_error.as_deref(), Some("Internal error: offline"));
    }

    #[test]
    fn test_stale_completion_does_not_notify() {
        let store = StatisticsStore::new();
        let mut updates = store.subscribe();
        let older = store.begin_request();
        let newer = store.begin_request();

        assert!(!store.complete(older, TimeRange::Month, Ok(series(1.0))));
        assert!(!updates.has_changed().unwrap());

        assert!(store.complete(newer, TimeRange::Day, Ok(series(2.0))));
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().completed, Some(newer));
    }

    #[test]
    fn test_settled_tracks_newest_request() {
        let store = StatisticsStore::new();
        assert!(!store.is_settled(&store.snapshot()));

        let first = store.begin_request();
        store.complete(first, TimeRange::Month, Ok(series(1.0)));
        assert!(store.is_settled(&store.snapshot()));

        store.begin_request();
        assert!(!store.is_settled(&store.snapshot()));
    }

    #[test]
    fn test_concurrent_newer_commit_always_wins() {
        for _ in 0..200 {
            let store = Arc::new(StatisticsStore::new());
            let older = store.begin_request();

            let stale = {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.complete(older, TimeRange::Month, Ok(series(1.0)));
                })
            };
            let fresh = {
                let store = store.clone();
                std::thread::spawn(move || {
                    let newer = store.begin_request();
                    store.complete(newer, TimeRange::Day, Ok(series(2.0)));
                })
            };
            stale.join().unwrap();
            fresh.join().unwrap();

            let state = store.snapshot();
            assert_eq!(state.range, Some(TimeRange::Day));
            assert!(store.is_settled(&state));
        }
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = StatisticsStore::new();
        let mut updates = store.subscribe();

        let request = store.begin_request();
        store.complete(request, TimeRange::Year, Ok(series(9.0)));

        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().range, Some(TimeRange::Year));
    }
}
