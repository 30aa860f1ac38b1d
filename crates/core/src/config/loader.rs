use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment variable overrides, e.g. `TUPLEFETCH_RUN__MAX_DOCUMENTS=3`.
pub const ENV_PREFIX: &str = "TUPLEFETCH_";

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load defaults with environment variable overrides (no config file)
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[run]
max_documents = 4
max_tuple_searches = 12
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.run.max_documents, 4);
        assert_eq!(config.run.max_tuple_searches, 12);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[run]
max_documents = "lots"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/tuplefetch.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[run]
max_downloads = 25
download_concurrency = 4

[search]
endpoint = "http://127.0.0.1:8000/ws"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.run.max_downloads, 25);
        assert_eq!(config.run.download_concurrency, 4);
        assert_eq!(config.run.max_documents, 10);
        assert_eq!(config.search.endpoint, "http://127.0.0.1:8000/ws");
        assert_eq!(config.search.app_id, "WebFerret");
    }

    #[test]
    fn test_env_overrides_nested_field() {
        std::env::set_var("TUPLEFETCH_FETCH__TIMEOUT_SECS", "7");
        let config = load_config_from_env();
        std::env::remove_var("TUPLEFETCH_FETCH__TIMEOUT_SECS");

        let config = config.unwrap();
        assert_eq!(config.fetch.timeout_secs, 7);
        assert_eq!(config.search.timeout_secs, 30);
    }
}
