use crate::error::ErrorKind;
use crate::types::location::LocationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceListError {
    #[error("Failed to read place list '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse place list from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid place at index {index} in {origin}")]
    InvalidEntry {
        origin: String,
        index: usize,
        #[source]
        source: LocationError,
    },
}

impl PlaceListError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaceListError::Read(..) => ErrorKind::Storage,
            PlaceListError::Parse { .. } => ErrorKind::Format,
            PlaceListError::InvalidEntry { .. } => ErrorKind::Configuration,
        }
    }
}
