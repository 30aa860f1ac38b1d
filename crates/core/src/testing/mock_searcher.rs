//! Mock searcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::searcher::{SearchError, Searcher};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The tuple that was searched.
    pub tuple: String,
    /// Result limit that was requested.
    pub limit: u32,
}

/// Mock implementation of the Searcher trait.
///
/// Provides controllable behavior for testing:
/// - Return fixed URL lists per tuple
/// - Track searches for assertions
/// - Simulate failures and slow responses
///
/// # Example
///
/// ```rust,ignore
/// use tuplefetch_core::testing::MockSearcher;
///
/// let searcher = MockSearcher::new();
/// searcher.set_results("ruby gems", vec!["http://e.com/u1", "http://e.com/u2"]).await;
///
/// let urls = searcher.search("ruby gems", 10).await?;
/// assert_eq!(urls.len(), 2);
/// assert_eq!(searcher.search_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSearcher {
    /// Results per tuple; unknown tuples return nothing.
    results: Arc<RwLock<HashMap<String, Vec<String>>>>,
    /// Tuples that always fail with the given error.
    failures: Arc<RwLock<HashMap<String, SearchError>>>,
    /// Artificial latency per tuple.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// If set, the next search fails with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
}

impl MockSearcher {
    /// Create a new mock searcher with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URLs returned for `tuple`.
    pub async fn set_results<I, U>(&self, tuple: &str, urls: I)
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.results
            .write()
            .await
            .insert(tuple.to_string(), urls.into_iter().map(Into::into).collect());
    }

    /// Make every search for `tuple` fail with `error`.
    pub async fn fail_tuple(&self, tuple: &str, error: SearchError) {
        self.failures.write().await.insert(tuple.to_string(), error);
    }

    /// Delay every search for `tuple` by `delay`.
    pub async fn set_delay(&self, tuple: &str, delay: Duration) {
        self.delays.write().await.insert(tuple.to_string(), delay);
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get recorded searches, in call order.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// How many times `tuple` was searched.
    pub async fn count_for(&self, tuple: &str) -> usize {
        self.searches
            .read()
            .await
            .iter()
            .filter(|s| s.tuple == tuple)
            .count()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, tuple: &str, limit: u32) -> Result<Vec<String>, SearchError> {
        // Record before failing so failed attempts are visible too
        self.searches.write().await.push(RecordedSearch {
            tuple: tuple.to_string(),
            limit,
        });

        let delay = self.delays.read().await.get(tuple).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if let Some(err) = self.failures.read().await.get(tuple) {
            return Err(err.clone());
        }

        Ok(self
            .results
            .read()
            .await
            .get(tuple)
            .map(|urls| urls.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}
