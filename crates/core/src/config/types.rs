use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Limits and worker pool sizes for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunConfig {
    /// Number of top-ranked candidates to download (default: 10).
    #[serde(default = "default_max_documents")]
    pub max_documents: usize,
    /// Result limit requested from the provider for each search (default: 10).
    #[serde(default = "default_max_downloads")]
    pub max_downloads: u32,
    /// Number of tuples drawn from the input list (default: 50).
    #[serde(default = "default_max_tuple_searches")]
    pub max_tuple_searches: usize,
    /// Searches in flight at once (default: 1).
    #[serde(default = "default_concurrency")]
    pub search_concurrency: usize,
    /// Downloads in flight at once (default: 1).
    #[serde(default = "default_concurrency")]
    pub download_concurrency: usize,
    /// Fixed seed for tuple sampling. Unset means seeded from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_documents: default_max_documents(),
            max_downloads: default_max_downloads(),
            max_tuple_searches: default_max_tuple_searches(),
            search_concurrency: default_concurrency(),
            download_concurrency: default_concurrency(),
            seed: None,
        }
    }
}

fn default_max_documents() -> usize {
    10
}

fn default_max_downloads() -> u32 {
    10
}

fn default_max_tuple_searches() -> usize {
    50
}

fn default_concurrency() -> usize {
    1
}

/// Web search provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search endpoint URL, queried with `appid`, `query` and `results` parameters.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Application id sent with every request
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app_id: default_app_id(),
            timeout_secs: default_search_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://search.yahooapis.com/WebSearchService/V1/webSearch".to_string()
}

fn default_app_id() -> String {
    "WebFerret".to_string()
}

fn default_search_timeout() -> u32 {
    30
}

/// Document download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_fetch_timeout() -> u32 {
    60
}
