//! The cache envelope: the HTTP status, headers and raw body of a forecast response.
//!
//! This is the unit written to disk. A [`ForecastSeries`] is always derived from
//! it with [`CacheEnvelope::to_series`], so a reload replays exactly what the API sent.

use crate::forecast_data::error::ForecastDataError;
use crate::forecast_data::parser::parse_envelope;
use crate::types::series::ForecastSeries;
use crate::utils::parse_http_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LAST_MODIFIED: &str = "Last-Modified";
pub const EXPIRES: &str = "Expires";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CacheEnvelope {
    pub fn new(
        status_code: u16,
        headers: BTreeMap<String, String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            status_code,
            headers,
            data,
        }
    }

    /// Envelope for a "not modified" answer to a conditional request.
    ///
    /// The new headers are laid over `previous`'s (names compared
    /// case-insensitively) and the previous body is carried forward, so the
    /// envelope on disk always holds the last payload the API sent.
    pub fn not_modified(
        previous: &CacheEnvelope,
        status_code: u16,
        headers: BTreeMap<String, String>,
    ) -> Self {
        let mut merged = previous.headers.clone();
        for (name, value) in headers {
            merged.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            merged.insert(name, value);
        }
        Self {
            status_code,
            headers: merged,
            data: previous.data.clone(),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_payload(&self) -> bool {
        self.data.is_some()
    }

    /// # Errors
    ///
    /// A format error if the header is absent or not an HTTP date.
    pub fn last_modified(&self) -> Result<DateTime<Utc>, ForecastDataError> {
        self.date_header(LAST_MODIFIED)
    }

    /// # Errors
    ///
    /// A format error if the header is absent or not an HTTP date.
    pub fn expires(&self) -> Result<DateTime<Utc>, ForecastDataError> {
        self.date_header(EXPIRES)
    }

    /// Parses the envelope into a [`ForecastSeries`].
    ///
    /// # Errors
    ///
    /// Any [`crate::ErrorKind::Format`] error: missing headers, a missing body,
    /// or a body that does not follow the Locationforecast schema.
    pub fn to_series(&self) -> Result<ForecastSeries, ForecastDataError> {
        parse_envelope(self)
    }

    fn date_header(&self, header: &'static str) -> Result<DateTime<Utc>, ForecastDataError> {
        let value = self
            .header(header)
            .ok_or(ForecastDataError::MissingHeader(header))?;
        parse_http_date(value).ok_or_else(|| ForecastDataError::InvalidHeaderDate {
            header,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let envelope = CacheEnvelope::new(
            200,
            headers(&[("last-modified", "Mon, 01 Jan 2024 00:00:00 GMT")]),
            None,
        );
        assert_eq!(
            envelope.header("Last-Modified"),
            Some("Mon, 01 Jan 2024 00:00:00 GMT")
        );
        assert_eq!(
            envelope.last_modified().unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_and_invalid_dates() {
        let envelope = CacheEnvelope::new(200, headers(&[("Expires", "soon")]), None);
        assert!(matches!(
            envelope.last_modified(),
            Err(ForecastDataError::MissingHeader(LAST_MODIFIED))
        ));
        assert!(matches!(
            envelope.expires(),
            Err(ForecastDataError::InvalidHeaderDate { header: EXPIRES, .. })
        ));
    }

    #[test]
    fn test_not_modified_merges_headers_and_keeps_body() {
        let previous = CacheEnvelope::new(
            200,
            headers(&[
                ("last-modified", "Mon, 01 Jan 2024 00:00:00 GMT"),
                ("expires", "Mon, 01 Jan 2024 01:00:00 GMT"),
                ("content-type", "application/json"),
            ]),
            Some(serde_json::json!({"properties": {}})),
        );
        let refreshed = CacheEnvelope::not_modified(
            &previous,
            304,
            headers(&[("Expires", "Mon, 01 Jan 2024 03:00:00 GMT")]),
        );
        assert_eq!(refreshed.status_code, 304);
        assert_eq!(refreshed.data, previous.data);
        assert_eq!(refreshed.headers.len(), 3);
        assert_eq!(
            refreshed.expires().unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap()
        );
        assert_eq!(refreshed.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_serialization_omits_absent_body() {
        let envelope = CacheEnvelope::new(304, BTreeMap::new(), None);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"status_code": 304, "headers": {}}));
        let back: CacheEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(back, envelope);
    }
}
