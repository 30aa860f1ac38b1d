//! HTTP document fetcher.

use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::config::FetchConfig;

use super::{DownloadTarget, FetchError, Fetcher};

/// Downloads documents with a single GET and streams the body to disk.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new HttpFetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Stream the response body into `path`, returning the byte count.
    async fn write_body(
        mut response: reqwest::Response,
        path: &Path,
    ) -> Result<u64, FetchError> {
        let io_err = |source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).await.map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let mut total_bytes = 0u64;

        while let Some(chunk) = response.chunk().await.map_err(map_request_error)? {
            writer.write_all(&chunk).await.map_err(io_err)?;
            total_bytes += chunk.len() as u64;
        }

        writer.flush().await.map_err(io_err)?;
        Ok(total_bytes)
    }
}

fn map_request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::ConnectionFailed(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf, FetchError> {
        let target = DownloadTarget::new(url, destination)?;
        debug!(url = %url, path = %target.path.display(), "Fetching document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        match Self::write_body(response, &target.path).await {
            Ok(bytes) => {
                debug!(url = %url, bytes = bytes, "Document saved");
                Ok(target.path)
            }
            Err(e) => {
                // Best effort: do not leave a truncated document behind.
                let _ = tokio::fs::remove_file(&target.path).await;
                Err(e)
            }
        }
    }
}
