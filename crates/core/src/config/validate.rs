use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Worker pool sizes are not 0
/// - Timeouts are not 0
/// - Per-search result limit is not 0
/// - Search endpoint is an absolute http(s) URL
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.run.search_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "run.search_concurrency cannot be 0".to_string(),
        ));
    }

    if config.run.download_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "run.download_concurrency cannot be 0".to_string(),
        ));
    }

    if config.run.max_downloads == 0 {
        return Err(ConfigError::ValidationError(
            "run.max_downloads cannot be 0".to_string(),
        ));
    }

    if config.search.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "search.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.fetch.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "fetch.timeout_secs cannot be 0".to_string(),
        ));
    }

    let endpoint = reqwest::Url::parse(&config.search.endpoint).map_err(|e| {
        ConfigError::ValidationError(format!(
            "search.endpoint '{}' is not a valid URL: {}",
            config.search.endpoint, e
        ))
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "search.endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    Ok(())
}
