//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_URL` - Backend base URL (default: `http://localhost:3000/API/v1/`)
//! - `SHOPFRONT_CONNECT_TIMEOUT_SECS` - TCP connect timeout (default: 30)
//! - `SHOPFRONT_READ_TIMEOUT_SECS` - Response read timeout (default: 30)
//! - `SHOPFRONT_WRITE_TIMEOUT_SECS` - Request write budget (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/API/v1/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings for the backend HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto. Always ends in `/`.
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// `reqwest` has no write timeout; this is folded into the overall
    /// per-request deadline.
    pub write_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first when one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("SHOPFRONT_API_URL", DEFAULT_API_URL);
        let base_url = parse_base_url(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), e))?;

        Ok(Self {
            base_url,
            connect_timeout: get_secs("SHOPFRONT_CONNECT_TIMEOUT_SECS")?,
            read_timeout: get_secs("SHOPFRONT_READ_TIMEOUT_SECS")?,
            write_timeout: get_secs("SHOPFRONT_WRITE_TIMEOUT_SECS")?,
        })
    }

    /// Configuration pointing at `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("base_url".to_string(), e))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Use the same timeout for connect, read and write.
    #[must_use]
    pub const fn timeouts(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.read_timeout = timeout;
        self.write_timeout = timeout;
        self
    }

    /// Upper bound for a whole request. Saturates at `Duration::MAX`.
    #[must_use]
    pub const fn request_deadline(&self) -> Duration {
        self.connect_timeout
            .saturating_add(self.read_timeout)
            .saturating_add(self.write_timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url: default_base_url(),
            connect_timeout: timeout,
            read_timeout: timeout,
            write_timeout: timeout,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL")
}

/// Parse a base URL and make sure it ends in a slash so `Url::join` keeps the
/// final path segment.
fn parse_base_url(value: &str) -> Result<Url, String> {
    let mut url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("must be an absolute http(s) URL".to_string());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an optional environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_secs(key: &str) -> Result<Duration, ConfigError> {
    let raw = get_env_or_default(key, &DEFAULT_TIMEOUT_SECS.to_string());
    parse_secs(&raw)
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
}

fn parse_secs(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://api.example.com/API/v1").unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/API/v1/");
        assert_eq!(
            url.join("products").unwrap().as_str(),
            "http://api.example.com/API/v1/products"
        );
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs(" 15 ").unwrap(), 15);
        assert!(parse_secs("0").is_err());
        assert!(parse_secs("-1").is_err());
        assert!(parse_secs("soon").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert_eq!(config.request_deadline(), Duration::from_secs(90));
    }

    #[test]
    fn test_with_base_url_and_timeouts() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9000")
            .unwrap()
            .timeouts(Duration::from_secs(2));
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.write_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_request_deadline_saturates() {
        let secs = parse_secs("18446744073709551615").unwrap();
        let config = ClientConfig::default().timeouts(Duration::from_secs(secs));
        assert_eq!(config.request_deadline(), Duration::MAX);

        let config = ClientConfig::default().timeouts(Duration::from_secs(2));
        assert_eq!(config.request_deadline(), Duration::from_secs(6));
    }
}
