use crate::error::ErrorKind;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastDataError {
    // Storage
    #[error("Cache path '{0}' exists but is not a directory")]
    CacheDirNotADirectory(PathBuf),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata for '{0}'")]
    CacheMetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode cache envelope for '{0}'")]
    CacheEncode(PathBuf, #[source] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    // Transport
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    // Format
    #[error("Failed to decode cache envelope '{0}'")]
    CacheDecode(PathBuf, #[source] serde_json::Error),

    #[error("Response body from {url} is not valid JSON")]
    ResponseJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Envelope is missing the '{0}' header")]
    MissingHeader(&'static str),

    #[error("Header '{header}' is not a valid HTTP date: '{value}'")]
    InvalidHeaderDate { header: &'static str, value: String },

    #[error("Envelope with status {0} carries no forecast payload")]
    MissingPayload(u16),

    #[error("Forecast payload does not match the expected schema")]
    Payload(#[source] serde_json::Error),

    #[error("No unit declared for variable '{0}'")]
    MissingUnit(String),

    #[error("Timeseries entry at {current} follows later entry at {previous}")]
    UnorderedTimeseries {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

impl ForecastDataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastDataError::CacheDirNotADirectory(_)
            | ForecastDataError::CacheDirCreation(..)
            | ForecastDataError::CacheMetadataRead(..)
            | ForecastDataError::CacheRead(..)
            | ForecastDataError::CacheWrite(..)
            | ForecastDataError::CacheEncode(..)
            | ForecastDataError::TaskJoin(_) => ErrorKind::Storage,
            ForecastDataError::NetworkRequest(..) | ForecastDataError::HttpStatus { .. } => {
                ErrorKind::Transport
            }
            ForecastDataError::CacheDecode(..)
            | ForecastDataError::ResponseJson { .. }
            | ForecastDataError::MissingHeader(_)
            | ForecastDataError::InvalidHeaderDate { .. }
            | ForecastDataError::MissingPayload(_)
            | ForecastDataError::Payload(_)
            | ForecastDataError::MissingUnit(_)
            | ForecastDataError::UnorderedTimeseries { .. } => ErrorKind::Format,
        }
    }
}
