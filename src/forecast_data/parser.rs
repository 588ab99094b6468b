//! Converts a [`CacheEnvelope`] into a [`ForecastSeries`].

use crate::forecast_data::envelope::CacheEnvelope;
use crate::forecast_data::error::ForecastDataError;
use crate::types::interval::{ForecastInterval, LookAhead};
use crate::types::measurement::Measurement;
use crate::types::series::ForecastSeries;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

// --- Locationforecast 2.0 payload ---

#[derive(Debug, Deserialize)]
struct RawForecast {
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    meta: RawMeta,
    timeseries: Vec<RawTimeStep>,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    updated_at: DateTime<Utc>,
    units: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawTimeStep {
    time: DateTime<Utc>,
    data: RawTimeStepData,
}

#[derive(Debug, Deserialize)]
struct RawTimeStepData {
    instant: RawInstant,
    next_1_hours: Option<RawPeriod>,
    next_6_hours: Option<RawPeriod>,
    next_12_hours: Option<RawPeriod>,
}

#[derive(Debug, Deserialize)]
struct RawInstant {
    #[serde(default)]
    details: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    summary: RawSummary,
    #[serde(default)]
    details: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    symbol_code: String,
}

impl RawTimeStepData {
    /// First forward-looking block present, shortest window first.
    fn look_ahead(&self) -> (LookAhead, Option<&RawPeriod>) {
        [
            (LookAhead::OneHour, self.next_1_hours.as_ref()),
            (LookAhead::SixHours, self.next_6_hours.as_ref()),
            (LookAhead::TwelveHours, self.next_12_hours.as_ref()),
        ]
        .into_iter()
        .find(|(_, period)| period.is_some())
        .unwrap_or((LookAhead::None, None))
    }
}

/// Parses an envelope's headers and body into a series.
///
/// `Last-Modified` and `Expires` come from the headers; `updated_at`, the unit
/// table and the intervals come from the body. Each timeseries entry becomes
/// one interval whose variables are the instant details plus the details of
/// its shortest forward-looking block (block values win on name clashes).
pub fn parse_envelope(envelope: &CacheEnvelope) -> Result<ForecastSeries, ForecastDataError> {
    let last_modified = envelope.last_modified()?;
    let expires = envelope.expires()?;
    let data = envelope
        .data
        .as_ref()
        .ok_or(ForecastDataError::MissingPayload(envelope.status_code))?;
    let raw = RawForecast::deserialize(data).map_err(ForecastDataError::Payload)?;
    let RawProperties { meta, timeseries } = raw.properties;

    let mut intervals: Vec<ForecastInterval> = Vec::with_capacity(timeseries.len());
    for step in timeseries {
        if let Some(previous) = intervals.last() {
            if step.time < previous.start_time() {
                return Err(ForecastDataError::UnorderedTimeseries {
                    previous: previous.start_time(),
                    current: step.time,
                });
            }
        }
        intervals.push(parse_time_step(step, &meta.units)?);
    }

    Ok(ForecastSeries::new(
        last_modified,
        expires,
        meta.updated_at,
        meta.units,
        intervals,
    ))
}

fn parse_time_step(
    step: RawTimeStep,
    units: &BTreeMap<String, String>,
) -> Result<ForecastInterval, ForecastDataError> {
    let mut variables = BTreeMap::new();
    insert_details(&mut variables, &step.data.instant.details, units)?;

    let (look_ahead, period) = step.data.look_ahead();
    let symbol_code = match period {
        Some(period) => {
            insert_details(&mut variables, &period.details, units)?;
            Some(period.summary.symbol_code.clone())
        }
        None => None,
    };

    Ok(ForecastInterval::new(
        step.time,
        look_ahead,
        symbol_code,
        variables,
    ))
}

fn insert_details(
    variables: &mut BTreeMap<String, Measurement>,
    details: &BTreeMap<String, f64>,
    units: &BTreeMap<String, String>,
) -> Result<(), ForecastDataError> {
    for (name, value) in details {
        let unit = units
            .get(name)
            .ok_or_else(|| ForecastDataError::MissingUnit(name.clone()))?;
        variables.insert(name.clone(), Measurement::new(name.as_str(), *value, unit.as_str()));
    }
    Ok(())
}
