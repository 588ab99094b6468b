use crate::config::ConfigError;
use crate::forecast_data::error::ForecastDataError;
use crate::places::error::PlaceListError;
use crate::types::location::LocationError;
use crate::types::measurement::MeasurementError;
use thiserror::Error;

/// Broad category of a failure, for callers that only care how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input to a constructor: coordinates, user agent, endpoint.
    Configuration,
    /// The network request failed or the API answered with an unexpected status.
    Transport,
    /// A header, envelope or payload did not have the expected shape.
    Format,
    /// The cache directory or a cache file could not be used.
    Storage,
    /// Incompatible measurements were combined.
    InvalidOperation,
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    ForecastData(#[from] ForecastDataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error(transparent)]
    PlaceList(#[from] PlaceListError),
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::ForecastData(e) => e.kind(),
            ForecastError::Config(_) | ForecastError::Location(_) => ErrorKind::Configuration,
            ForecastError::Measurement(_) => ErrorKind::InvalidOperation,
            ForecastError::PlaceList(e) => e.kind(),
        }
    }
}
