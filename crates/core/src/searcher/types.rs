//! Types for the web search system.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during search operations.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Search provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search provider API error: {0}")]
    ApiError(String),

    #[error("Failed to parse search response: {0}")]
    Parse(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for web search backends.
///
/// One call issues exactly one query. Callers that want "no results" on
/// failure decide that themselves; implementations report what went wrong.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Search for the exact phrase `tuple`, returning up to `limit` result
    /// URLs in provider order.
    async fn search(&self, tuple: &str, limit: u32) -> Result<Vec<String>, SearchError>;
}
