//! HTTP search backend for XML result-set providers.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::SearchConfig;

use super::response::parse_result_urls;
use super::{SearchError, Searcher};

/// Search backend issuing one GET per query and parsing the XML result set.
pub struct WebSearcher {
    client: Client,
    config: SearchConfig,
}

impl WebSearcher {
    /// Create a new WebSearcher with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the provider URL for an exact-phrase search.
    fn build_search_url(&self, tuple: &str, limit: u32) -> String {
        let separator = if self.config.endpoint.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}appid={}&query=%22{}%22&results={}",
            self.config.endpoint,
            separator,
            urlencoding::encode(&self.config.app_id),
            urlencoding::encode(tuple),
            limit
        )
    }
}

#[async_trait]
impl Searcher for WebSearcher {
    fn name(&self) -> &str {
        "web"
    }

    async fn search(&self, tuple: &str, limit: u32) -> Result<Vec<String>, SearchError> {
        let start = Instant::now();
        let url = self.build_search_url(tuple, limit);
        debug!(tuple = %tuple, limit = limit, "Searching provider");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else if e.is_connect() {
                SearchError::ConnectionFailed(e.to_string())
            } else {
                SearchError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else {
                SearchError::ApiError(format!("Failed to read response: {}", e))
            }
        })?;

        let urls = parse_result_urls(&body)?;

        debug!(
            tuple = %tuple,
            results = urls.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        Ok(urls)
    }
}
