//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `QKART_API_ENDPOINT` - Backend base URL (default: `http://localhost:8082/api/v1`)
//! - `QKART_SEARCH_DEBOUNCE_MS` - Quiet period before a search fires (default: 500)
//! - `QKART_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `QKART_SESSION_FILE` - Where the login session is persisted (default: `.qkart/session.json`)
//! - `QKART_LOG_FORMAT` - `text` or `json` (default: `text`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_ENDPOINT: &str = "http://localhost:8082/api/v1";
const DEFAULT_SEARCH_DEBOUNCE_MS: &str = "500";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "30";
const DEFAULT_SESSION_FILE: &str = ".qkart/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format for the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend base URL. Always ends with `/` so endpoint paths join under it.
    pub api_endpoint: Url,
    /// Quiet period before a debounced search fires.
    pub search_debounce: Duration,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// Path of the persisted login session.
    pub session_file: PathBuf,
    /// Log output format.
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_endpoint = parse_endpoint(
            "QKART_API_ENDPOINT",
            &get("QKART_API_ENDPOINT", DEFAULT_API_ENDPOINT),
        )?;

        let search_debounce = Duration::from_millis(parse_var(
            "QKART_SEARCH_DEBOUNCE_MS",
            &get("QKART_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS),
        )?);

        let http_timeout_secs: u64 = parse_var(
            "QKART_HTTP_TIMEOUT_SECS",
            &get("QKART_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        )?;
        if http_timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "QKART_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let session_file = PathBuf::from(get("QKART_SESSION_FILE", DEFAULT_SESSION_FILE));
        let log_format = parse_var("QKART_LOG_FORMAT", &get("QKART_LOG_FORMAT", "text"))?;

        Ok(Self {
            api_endpoint,
            search_debounce,
            http_timeout: Duration::from_secs(http_timeout_secs),
            session_file,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable with `FromStr`, reporting the variable name on failure.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the backend base URL and make sure relative paths join beneath it.
fn parse_endpoint(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.api_endpoint.as_str(),
            "http://localhost:8082/api/v1/"
        );
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.session_file, PathBuf::from(".qkart/session.json"));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_endpoint_gets_trailing_slash() {
        let config = config_from(&[("QKART_API_ENDPOINT", "https://qkart.example.com/api/v1")])
            .unwrap();
        assert_eq!(
            config.api_endpoint.join("products").unwrap().as_str(),
            "https://qkart.example.com/api/v1/products"
        );
    }

    #[test]
    fn test_endpoint_keeps_existing_slash() {
        let config = config_from(&[("QKART_API_ENDPOINT", "http://127.0.0.1:9000/")]).unwrap();
        assert_eq!(config.api_endpoint.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = config_from(&[("QKART_API_ENDPOINT", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "QKART_API_ENDPOINT"));
    }

    #[test]
    fn test_non_http_endpoint() {
        let result = config_from(&[("QKART_API_ENDPOINT", "ftp://example.com/api")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_debounce_override() {
        let config = config_from(&[("QKART_SEARCH_DEBOUNCE_MS", "250")]).unwrap();
        assert_eq!(config.search_debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_debounce() {
        let err = config_from(&[("QKART_SEARCH_DEBOUNCE_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("QKART_SEARCH_DEBOUNCE_MS"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(config_from(&[("QKART_HTTP_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_log_format() {
        let config = config_from(&[("QKART_LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config_from(&[("QKART_LOG_FORMAT", "xml")]).is_err());
    }
}
