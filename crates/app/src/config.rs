//! Timing for background refresh, debounce and view tracking.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_REFRESH_INTERVAL_SECS` - Silent refresh period (default: 30)
//! - `SHOPFRONT_SEARCH_DEBOUNCE_MS` - Quiet period before a search fires (default: 500)
//! - `SHOPFRONT_VIEW_SETTLE_MS` - Time a product must stay shown to count a view (default: 3000)
//! - `SHOPFRONT_PRODUCT_ADDED_DELAY_MS` - Delay before refreshing after a new product (default: 1000)
//! - `SHOPFRONT_RELATED_LIMIT` - Related products shown on a detail screen (default: 4)

use std::time::Duration;

use shopfront_client::ConfigError;

/// Controller timing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    pub refresh_interval: Duration,
    pub search_debounce: Duration,
    pub view_settle: Duration,
    pub product_added_delay: Duration,
    pub related_limit: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            search_debounce: Duration::from_millis(500),
            view_settle: Duration::from_secs(3),
            product_added_delay: Duration::from_secs(1),
            related_limit: 4,
        }
    }
}

impl SyncConfig {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but is not a
    /// non-negative integer, or if the refresh interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Ok(Self {
            refresh_interval: Duration::from_secs(get_period_secs(
                "SHOPFRONT_REFRESH_INTERVAL_SECS",
                defaults.refresh_interval.as_secs(),
            )?),
            search_debounce: get_millis("SHOPFRONT_SEARCH_DEBOUNCE_MS", defaults.search_debounce)?,
            view_settle: get_millis("SHOPFRONT_VIEW_SETTLE_MS", defaults.view_settle)?,
            product_added_delay: get_millis(
                "SHOPFRONT_PRODUCT_ADDED_DELAY_MS",
                defaults.product_added_delay,
            )?,
            related_limit: u32::try_from(get_u64(
                "SHOPFRONT_RELATED_LIMIT",
                u64::from(defaults.related_limit),
            )?)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_RELATED_LIMIT".to_string(), e.to_string())
            })?,
        })
    }

    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce = window;
        self
    }

    #[must_use]
    pub const fn with_view_settle(mut self, settle: Duration) -> Self {
        self.view_settle = settle;
        self
    }

    #[must_use]
    pub const fn with_product_added_delay(mut self, delay: Duration) -> Self {
        self.product_added_delay = delay;
        self
    }

    /// Page size used when fetching related products; one extra so the shown
    /// product can be dropped from the list.
    #[must_use]
    pub const fn related_fetch_limit(&self) -> u32 {
        self.related_limit.saturating_add(1)
    }
}

fn get_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_u64(key, &raw),
        Err(_) => Ok(default),
    }
}

fn get_period_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_period_secs(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Like [`parse_u64`] but refuses zero.
fn parse_period_secs(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match parse_u64(key, raw)? {
        0 => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        secs => Ok(secs),
    }
}

fn get_millis(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    get_u64(key, default_ms).map(Duration::from_millis)
}
