//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::fetcher::{DownloadTarget, FetchError, Fetcher};

/// Mock implementation of the Fetcher trait.
///
/// Resolves the same target path a real fetcher would, records every call,
/// and optionally writes a configured body so tests can inspect the folder.
/// URLs marked as failing return an HTTP status error.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    /// URLs fetched, in call order.
    fetched: Arc<RwLock<Vec<String>>>,
    /// URL -> HTTP status to fail with.
    failures: Arc<RwLock<HashMap<String, u16>>>,
    /// URL -> body written to disk on success. URLs without a body are not written.
    bodies: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Artificial latency per URL, spent while the target file is "open".
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Target path -> fetches currently writing it.
    active: Arc<RwLock<HashMap<PathBuf, usize>>>,
    /// Times a fetch started while another was writing the same path.
    overlaps: Arc<RwLock<usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make fetches of `url` fail with `status`.
    pub async fn fail_url(&self, url: &str, status: u16) {
        self.failures.write().await.insert(url.to_string(), status);
    }

    /// Write `body` to the target file when `url` is fetched.
    pub async fn set_body(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.bodies.write().await.insert(url.to_string(), body.into());
    }

    /// Delay fetches of `url` by `delay`.
    pub async fn set_delay(&self, url: &str, delay: Duration) {
        self.delays.write().await.insert(url.to_string(), delay);
    }

    /// Number of fetches that started while another fetch was writing the
    /// same target path.
    pub async fn overlapping_writes(&self) -> usize {
        *self.overlaps.read().await
    }

    /// URLs passed to `fetch`, in call order.
    pub async fn fetched_urls(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf, FetchError> {
        self.fetched.write().await.push(url.to_string());

        if let Some(&status) = self.failures.read().await.get(url) {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let target = DownloadTarget::new(url, destination)?;

        {
            let mut active = self.active.write().await;
            let writers = active.entry(target.path.clone()).or_insert(0);
            if *writers > 0 {
                *self.overlaps.write().await += 1;
            }
            *writers += 1;
        }

        let delay = self.delays.read().await.get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let body = self.bodies.read().await.get(url).cloned();
        let written = match body {
            Some(body) => tokio::fs::write(&target.path, body)
                .await
                .map_err(|source| FetchError::Io {
                    path: target.path.clone(),
                    source,
                }),
            None => Ok(()),
        };

        if let Some(writers) = self.active.write().await.get_mut(&target.path) {
            *writers -= 1;
        }

        written.map(|()| target.path)
    }
}
