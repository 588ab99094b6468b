mod config;
mod error;
mod forecast_cache;
mod forecast_data;
mod places;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::*;
pub use error::{ErrorKind, ForecastError};
pub use forecast_cache::*;

pub use forecast_data::envelope::CacheEnvelope;
pub use forecast_data::fetcher::{FetchOutcome, ForecastFetcher};
pub use forecast_data::parser::parse_envelope;
pub use forecast_data::store::EnvelopeStore;

pub use types::interval::*;
pub use types::location::*;
pub use types::measurement::*;
pub use types::series::*;

pub use places::error::PlaceListError;
pub use places::place_list::PlaceList;

pub use forecast_data::error::ForecastDataError;
