//! Download orchestrator implementation.
//!
//! Drives one run through its two phases:
//! - Search: schedule drawn lazily, searches run `search_concurrency` at a time
//! - Download: starts only after the search stream is drained, fetches run
//!   `download_concurrency` at a time

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::candidates::CandidateStore;
use crate::config::RunConfig;
use crate::fetcher::{derive_filename, prepare_destination, Fetcher};
use crate::sampler::{load_tuples, RandomSource, TupleSampler};
use crate::searcher::Searcher;

use super::types::{DownloadStats, OrchestratorError, RunReport, SearchStats};

/// The download orchestrator - samples tuples, ranks results, fetches the top.
pub struct DownloadOrchestrator {
    config: RunConfig,
    searcher: Arc<dyn Searcher>,
    fetcher: Arc<dyn Fetcher>,
    destination: PathBuf,
}

impl DownloadOrchestrator {
    /// Create a new orchestrator writing into `destination`.
    pub fn new(
        config: RunConfig,
        searcher: Arc<dyn Searcher>,
        fetcher: Arc<dyn Fetcher>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            searcher,
            fetcher,
            destination: destination.into(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Load tuples from `tuple_file` and run both phases.
    pub async fn run_from_file<S: RandomSource>(
        &self,
        tuple_file: &Path,
        source: S,
    ) -> Result<RunReport, OrchestratorError> {
        let tuples = load_tuples(tuple_file).await?;
        self.run(tuples, source).await
    }

    /// Run both phases over `tuples`.
    ///
    /// Fails before any network I/O if `tuples` is empty or the download
    /// folder cannot be created. After that, every search and download
    /// failure is logged and skipped.
    pub async fn run<S: RandomSource>(
        &self,
        tuples: Vec<String>,
        source: S,
    ) -> Result<RunReport, OrchestratorError> {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut sampler = TupleSampler::new(tuples, self.config.max_tuple_searches, source)?;
        let tuples_loaded = sampler.tuples().len();

        prepare_destination(&self.destination)
            .await
            .map_err(OrchestratorError::Destination)?;

        info!(
            searcher = self.searcher.name(),
            tuples = tuples_loaded,
            searches = sampler.len(),
            "Starting search phase"
        );
        let (store, search) = self.search_phase(&mut sampler).await;
        info!(
            searches = search.searches_issued,
            failed = search.searches_failed,
            candidates = store.len(),
            "Search phase complete"
        );

        let selected: Vec<_> = store
            .ranked()
            .into_iter()
            .take(self.config.max_documents)
            .collect();

        info!(
            fetcher = self.fetcher.name(),
            selected = selected.len(),
            destination = %self.destination.display(),
            "Starting download phase"
        );
        let urls: Vec<String> = selected.iter().map(|c| c.url.clone()).collect();
        let download = self.fetch_all(urls).await;
        info!(
            attempted = download.attempted,
            saved = download.succeeded,
            failed = download.failed,
            "Download phase complete"
        );

        Ok(RunReport {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            tuples_loaded,
            searches_issued: search.searches_issued,
            searches_failed: search.searches_failed,
            urls_offered: search.urls_accepted + search.urls_rejected,
            urls_rejected: search.urls_rejected,
            distinct_candidates: store.len(),
            selected,
            downloads_attempted: download.attempted,
            downloads_succeeded: download.succeeded,
            downloads_failed: download.failed,
            saved_files: download.saved,
        })
    }

    /// Search every scheduled tuple and collect the returned URLs.
    ///
    /// Results are consumed in schedule order whatever the concurrency, so
    /// the store's first-seen order depends only on the schedule.
    pub async fn search_phase<S: RandomSource>(
        &self,
        sampler: &mut TupleSampler<S>,
    ) -> (CandidateStore, SearchStats) {
        let searcher = &self.searcher;
        let limit = self.config.max_downloads;

        let mut results = stream::iter(sampler.schedule())
            .map(|tuple| async move {
                let result = searcher.search(tuple, limit).await;
                (tuple, result)
            })
            .buffered(self.config.search_concurrency.max(1));

        let mut store = CandidateStore::new();
        let mut stats = SearchStats::default();

        while let Some((tuple, result)) = results.next().await {
            stats.searches_issued += 1;
            match result {
                Ok(urls) => {
                    debug!(tuple = %tuple, results = urls.len(), "Search returned");
                    for url in &urls {
                        if store.offer(url) {
                            stats.urls_accepted += 1;
                        } else {
                            stats.urls_rejected += 1;
                            debug!(url = %url, "Skipping directory URL");
                        }
                    }
                }
                Err(e) => {
                    stats.searches_failed += 1;
                    warn!(tuple = %tuple, error = %e, "Search failed, counting as no results");
                }
            }
        }

        (store, stats)
    }

    /// Fetch the first `max_documents` ranked candidates of `store`.
    pub async fn download_phase(&self, store: &CandidateStore) -> DownloadStats {
        self.fetch_all(store.top(self.config.max_documents)).await
    }

    /// Fetch `urls` with at most `download_concurrency` in flight.
    ///
    /// URLs that derive the same file name are fetched one after another in
    /// ranked order, so the lowest-ranked of them is the one left on disk.
    async fn fetch_all(&self, urls: Vec<String>) -> DownloadStats {
        let fetcher = &self.fetcher;
        let destination = self.destination.as_path();

        let mut results = stream::iter(group_by_filename(urls))
            .map(|group| async move {
                let mut outcomes = Vec::with_capacity(group.len());
                for url in group {
                    let result = fetcher.fetch(&url, destination).await;
                    outcomes.push((url, result));
                }
                outcomes
            })
            .buffered(self.config.download_concurrency.max(1));

        let mut stats = DownloadStats::default();

        while let Some(outcomes) = results.next().await {
            for (url, result) in outcomes {
                stats.attempted += 1;
                match result {
                    Ok(path) => {
                        debug!(url = %url, path = %path.display(), "Downloaded");
                        stats.succeeded += 1;
                        if !stats.saved.contains(&path) {
                            stats.saved.push(path);
                        }
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!(url = %url, error = %e, "Download failed, skipping");
                    }
                }
            }
        }

        stats
    }
}

/// Group `urls` by derived file name, groups ordered by first appearance.
fn group_by_filename(urls: Vec<String>) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for url in urls {
        let name = derive_filename(&url).to_string();
        match index.get(&name) {
            Some(&i) => groups[i].push(url),
            None => {
                index.insert(name, groups.len());
                groups.push(vec![url]);
            }
        }
    }

    groups
}
