//! Keeps one location's forecast fresh with as little network traffic as possible.

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::forecast_data::envelope::CacheEnvelope;
use crate::forecast_data::error::ForecastDataError;
use crate::forecast_data::fetcher::{FetchOutcome, ForecastFetcher};
use crate::forecast_data::store::EnvelopeStore;
use crate::types::location::Location;
use crate::types::series::ForecastSeries;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::fmt;

/// Where the loaded envelope came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Disk,
    Network,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Disk => write!(f, "disk"),
            DataSource::Network => write!(f, "network"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheState {
    Uninitialized,
    Loaded {
        envelope: CacheEnvelope,
        series: ForecastSeries,
        source: DataSource,
    },
}

/// Result of a successful [`ForecastCache::refresh`].
///
/// `persisted: false` means the new data is live in memory but writing the
/// envelope file failed; the next process start will not see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// The loaded series had not expired; nothing was requested.
    Fresh,
    /// The API answered 304 and the existing payload was kept.
    NotModified { persisted: bool },
    /// A new payload was downloaded.
    Modified { persisted: bool },
}

/// Forecast cache for a single [`Location`].
///
/// # Examples
///
/// ```no_run
/// use locationforecast::{ForecastCache, ForecastConfig, ForecastError, Location};
///
/// # async fn run() -> Result<(), ForecastError> {
/// let config = ForecastConfig::builder()
///     .user_agent("my-weather-app/1.0 me@example.com")
///     .build()?;
/// let mut cache = ForecastCache::new(Location::new("Oslo", 59.9127, 10.7461)?, &config)?;
/// cache.refresh().await?;
/// if let Some(series) = cache.series() {
///     println!("{} intervals until {}", series.intervals().len(), series.expires());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ForecastCache {
    location: Location,
    fetcher: ForecastFetcher,
    store: EnvelopeStore,
    state: CacheState,
    disk_checked: bool,
}

impl ForecastCache {
    pub fn new(location: Location, config: &ForecastConfig) -> Result<Self, ForecastError> {
        let fetcher = ForecastFetcher::new(config)?;
        Ok(Self {
            location,
            fetcher,
            store: EnvelopeStore::new(config.cache_dir()),
            state: CacheState::Uninitialized,
            disk_checked: false,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn store(&self) -> &EnvelopeStore {
        &self.store
    }

    /// The loaded series, if any refresh or disk load has succeeded.
    pub fn series(&self) -> Option<&ForecastSeries> {
        match &self.state {
            CacheState::Loaded { series, .. } => Some(series),
            CacheState::Uninitialized => None,
        }
    }

    /// Makes sure a non-expired series is loaded, using the current time.
    ///
    /// # Errors
    ///
    /// Transport and format errors abort the refresh and leave any previously
    /// loaded series in place. A failed write is reported through [`RefreshStatus`].
    ///
    /// The cache file is read once, on the first refresh. If it cannot be read or
    /// parsed that refresh returns the storage or format error; the file is not
    /// consulted again, so the next refresh downloads and overwrites it.
    pub async fn refresh(&mut self) -> Result<RefreshStatus, ForecastError> {
        self.refresh_at(Utc::now()).await
    }

    /// [`ForecastCache::refresh`] with an explicit notion of "now".
    pub async fn refresh_at(&mut self, now: DateTime<Utc>) -> Result<RefreshStatus, ForecastError> {
        if !self.disk_checked && matches!(self.state, CacheState::Uninitialized) {
            self.disk_checked = true;
            self.load_from_disk().await?;
        }

        let previous = match &self.state {
            CacheState::Loaded {
                envelope,
                series,
                source,
            } => {
                if !series.is_expired(now) {
                    debug!(
                        "Forecast for {} from {} is fresh until {}",
                        self.location,
                        source,
                        series.expires()
                    );
                    return Ok(RefreshStatus::Fresh);
                }
                Some((envelope.clone(), series.last_modified()))
            }
            CacheState::Uninitialized => None,
        };

        let since = previous.as_ref().map(|(_, last_modified)| *last_modified);
        let outcome = self.fetcher.fetch(&self.location, since).await?;

        match (outcome, previous) {
            (FetchOutcome::NotModified { status_code, headers }, Some((old, _))) => {
                let envelope = CacheEnvelope::not_modified(&old, status_code, headers);
                let series = envelope.to_series()?;
                let persisted = self.persist(&envelope).await;
                info!(
                    "Forecast for {} unchanged, now valid until {}",
                    self.location,
                    series.expires()
                );
                self.state = CacheState::Loaded {
                    envelope,
                    series,
                    source: DataSource::Network,
                };
                Ok(RefreshStatus::NotModified { persisted })
            }
            (FetchOutcome::NotModified { status_code, .. }, None) => {
                // 304 without a conditional request leaves nothing to carry forward.
                Err(ForecastDataError::MissingPayload(status_code).into())
            }
            (FetchOutcome::Modified(envelope), _) => {
                let series = envelope.to_series()?;
                let persisted = self.persist(&envelope).await;
                info!(
                    "Loaded {} new intervals for {}",
                    series.intervals().len(),
                    self.location
                );
                self.state = CacheState::Loaded {
                    envelope,
                    series,
                    source: DataSource::Network,
                };
                Ok(RefreshStatus::Modified { persisted })
            }
        }
    }

    async fn load_from_disk(&mut self) -> Result<(), ForecastError> {
        let Some(envelope) = self.store.load(&self.location).await? else {
            return Ok(());
        };
        if !envelope.has_payload() {
            warn!(
                "Cached envelope for {} has no payload, fetching from scratch",
                self.location
            );
            return Ok(());
        }
        let series = envelope.to_series()?;
        info!(
            "Cache hit for {}, {} intervals valid until {}",
            self.location,
            series.intervals().len(),
            series.expires()
        );
        self.state = CacheState::Loaded {
            envelope,
            series,
            source: DataSource::Disk,
        };
        Ok(())
    }

    async fn persist(&self, envelope: &CacheEnvelope) -> bool {
        match self.store.save(&self.location, envelope).await {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    "Forecast for {} is fresh in memory but was not persisted: {}",
                    self.location, e
                );
                false
            }
        }
    }
}
