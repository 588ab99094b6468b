//! Explicit configuration for talking to the Locationforecast API.

use crate::utils::get_cache_dir;
use bon::bon;
use reqwest::header::HeaderValue;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// The compact Locationforecast 2.0 product.
pub const DEFAULT_BASE_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("A User-Agent identifying the application is required by the API terms of service")]
    EmptyUserAgent,

    #[error("User-Agent '{0}' is not a valid header value")]
    InvalidUserAgent(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to determine cache directory")]
    CacheDirResolution,

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Settings shared by every [`crate::ForecastCache`].
///
/// # Examples
///
/// ```
/// use locationforecast::ForecastConfig;
/// use std::time::Duration;
///
/// let config = ForecastConfig::builder()
///     .user_agent("my-weather-app/1.0 me@example.com")
///     .cache_dir("/tmp/forecasts")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(config.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    user_agent: String,
    base_url: String,
    cache_dir: PathBuf,
    timeout: Duration,
}

#[bon]
impl ForecastConfig {
    /// Validates and assembles a configuration.
    ///
    /// # Arguments
    ///
    /// * `.user_agent(..)`: **Required.** Identifies the application to the API, e.g. `"app/1.0 contact@example.com"`.
    /// * `.base_url(..)`: Optional. Forecast endpoint; defaults to [`DEFAULT_BASE_URL`].
    /// * `.cache_dir(..)`: Optional. Where envelope files go; defaults to the platform cache dir.
    /// * `.timeout(..)`: Optional. Per-request timeout; defaults to [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty or non-header-safe user agent, an
    /// unparsable base URL, or when no default cache directory can be found.
    #[builder]
    pub fn new(
        #[builder(into)] user_agent: String,
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] cache_dir: Option<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        if HeaderValue::from_str(&user_agent).is_err() {
            return Err(ConfigError::InvalidUserAgent(user_agent));
        }

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if let Err(e) = reqwest::Url::parse(&base_url) {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                reason: e.to_string(),
            });
        }

        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => get_cache_dir().ok_or(ConfigError::CacheDirResolution)?,
        };

        Ok(Self {
            user_agent,
            base_url,
            cache_dir,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
