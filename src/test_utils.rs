//! Shared fixtures for unit tests.

use crate::forecast_data::envelope::CacheEnvelope;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const LAST_MODIFIED_VALUE: &str = "Mon, 01 Jan 2024 00:00:00 GMT";
pub const EXPIRES_VALUE: &str = "Mon, 01 Jan 2024 01:00:00 GMT";
pub const FAR_FUTURE: &str = "Fri, 01 Jan 2100 00:00:00 GMT";

pub fn units() -> Value {
    json!({
        "air_pressure_at_sea_level": "hPa",
        "air_temperature": "celsius",
        "cloud_area_fraction": "%",
        "precipitation_amount": "mm",
        "relative_humidity": "%",
        "wind_from_direction": "degrees",
        "wind_speed": "m/s"
    })
}

pub fn payload(timeseries: Vec<Value>) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [10.7461, 59.9127, 0]},
        "properties": {
            "meta": {
                "updated_at": "2023-12-31T23:45:12Z",
                "units": units()
            },
            "timeseries": timeseries
        }
    })
}

/// A timeseries entry with a 1-hour block.
pub fn step(time: &str, air_temperature: f64) -> Value {
    json!({
        "time": time,
        "data": {
            "instant": {"details": {"air_temperature": air_temperature, "wind_speed": 2.0}},
            "next_1_hours": {
                "summary": {"symbol_code": "cloudy"},
                "details": {"precipitation_amount": 0.0}
            }
        }
    })
}

/// Four entries: two hourly, one 6-hourly and a trailing instant-only one
/// that overlaps the 6-hour window.
pub fn sample_payload() -> Value {
    payload(vec![
        json!({
            "time": "2024-01-01T00:00:00Z",
            "data": {
                "instant": {"details": {
                    "air_pressure_at_sea_level": 1003.2,
                    "air_temperature": -1.5,
                    "cloud_area_fraction": 98.4,
                    "relative_humidity": 91.0,
                    "wind_from_direction": 212.3,
                    "wind_speed": 3.2
                }},
                "next_12_hours": {"summary": {"symbol_code": "snow"}, "details": {}},
                "next_1_hours": {
                    "summary": {"symbol_code": "cloudy"},
                    "details": {"precipitation_amount": 0.2}
                },
                "next_6_hours": {
                    "summary": {"symbol_code": "lightsnow"},
                    "details": {"precipitation_amount": 1.1}
                }
            }
        }),
        json!({
            "time": "2024-01-01T01:00:00Z",
            "data": {
                "instant": {"details": {"air_temperature": -1.0, "wind_speed": 3.0}},
                "next_1_hours": {
                    "summary": {"symbol_code": "partlycloudy_night"},
                    "details": {"precipitation_amount": 0.0}
                }
            }
        }),
        json!({
            "time": "2024-01-01T06:00:00Z",
            "data": {
                "instant": {"details": {"air_temperature": 0.5, "wind_speed": 4.1}},
                "next_6_hours": {
                    "summary": {"symbol_code": "lightrain"},
                    "details": {"precipitation_amount": 1.4}
                }
            }
        }),
        json!({
            "time": "2024-01-01T10:00:00Z",
            "data": {
                "instant": {"details": {"air_temperature": 1.2, "wind_speed": 4.4}}
            }
        }),
    ])
}

pub fn headers(last_modified: &str, expires: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Expires".to_string(), expires.to_string()),
        ("Last-Modified".to_string(), last_modified.to_string()),
    ])
}

pub fn sample_envelope() -> CacheEnvelope {
    CacheEnvelope::new(
        200,
        headers(LAST_MODIFIED_VALUE, EXPIRES_VALUE),
        Some(sample_payload()),
    )
}

pub fn envelope_with(timeseries: Vec<Value>) -> CacheEnvelope {
    CacheEnvelope::new(
        200,
        headers(LAST_MODIFIED_VALUE, EXPIRES_VALUE),
        Some(payload(timeseries)),
    )
}
