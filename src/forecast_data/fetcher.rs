use crate::config::{ConfigError, ForecastConfig};
use crate::forecast_data::envelope::CacheEnvelope;
use crate::forecast_data::error::ForecastDataError;
use crate::types::location::Location;
use crate::utils::format_http_date;
use chrono::{DateTime, Utc};
use log::{info, warn};
use reqwest::header::{HeaderMap, IF_MODIFIED_SINCE};
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;

/// What a conditional GET returned.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 2xx: a complete envelope including the JSON body.
    Modified(CacheEnvelope),
    /// 304: only the status and the (possibly refreshed) caching headers.
    NotModified {
        status_code: u16,
        headers: BTreeMap<String, String>,
    },
}

/// Issues the forecast requests for one configured endpoint.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    base_url: String,
}

impl ForecastFetcher {
    pub fn new(config: &ForecastConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// GETs the forecast for `location`.
    ///
    /// With `if_modified_since` set the request is conditional, and an
    /// unchanged forecast comes back as [`FetchOutcome::NotModified`].
    ///
    /// # Errors
    ///
    /// A transport error for network failures and for any status other than
    /// 2xx or 304; a format error if a 2xx body is not JSON.
    pub async fn fetch(
        &self,
        location: &Location,
        if_modified_since: Option<DateTime<Utc>>,
    ) -> Result<FetchOutcome, ForecastDataError> {
        let lat = format!("{:.4}", location.latitude());
        let lon = format!("{:.4}", location.longitude());
        let url = format!("{}?lat={}&lon={}", self.base_url, lat, lon);

        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str())]);
        if let Some(since) = if_modified_since {
            request = request.header(IF_MODIFIED_SINCE, format_http_date(&since));
        }

        info!("Fetching forecast for {} from {}", location, url);
        let response = request
            .send()
            .await
            .map_err(|e| ForecastDataError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        let headers = collect_headers(response.headers());

        if status == StatusCode::NOT_MODIFIED {
            info!("Forecast for {} not modified", location);
            return Ok(FetchOutcome::NotModified {
                status_code: status.as_u16(),
                headers,
            });
        }
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(ForecastDataError::HttpStatus { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastDataError::NetworkRequest(url.clone(), e))?;
        let data = serde_json::from_slice::<serde_json::Value>(&body)
            .map_err(|source| ForecastDataError::ResponseJson {
                url: url.clone(),
                source,
            })?;
        info!(
            "Downloaded {} bytes of forecast data for {}",
            body.len(),
            location
        );

        Ok(FetchOutcome::Modified(CacheEnvelope::new(
            status.as_u16(),
            headers,
            Some(data),
        )))
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
