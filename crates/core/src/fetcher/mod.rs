//! Document download abstraction.
//!
//! A `Fetcher` retrieves the bytes behind a candidate URL and stores them in
//! the download folder under a name derived from the URL's last path
//! segment. `HttpFetcher` is the HTTP implementation.

mod http;
mod target;

pub use http::HttpFetcher;
pub use target::{derive_filename, prepare_destination, DownloadTarget};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while downloading a document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Cannot derive a file name from {url}")]
    InvalidTarget { url: String },

    #[error("Failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for document download backends.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Download `url` into `destination`, returning the written path.
    ///
    /// An existing file with the same derived name is overwritten.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf, FetchError>;
}
