//! Defines [`ForecastSeries`], the parsed and queryable form of a forecast.

use crate::types::interval::ForecastInterval;
use crate::types::measurement::{Measurement, MeasurementError};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// An ordered set of forecast intervals plus the freshness metadata they came with.
///
/// Intervals are sorted ascending by start time. They are **not** guaranteed to
/// be disjoint: the upstream series mixes 1-, 6- and 12-hour windows, so a
/// 6-hour window starting at 00:00 overlaps the entry starting at 01:00.
///
/// A series is derived from a cache envelope and replaced wholesale on every
/// successful parse; it is never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    last_modified: DateTime<Utc>,
    expires: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    units: BTreeMap<String, String>,
    intervals: Vec<ForecastInterval>,
}

/// Mean of one variable over a fixed slice of a day.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketAverage {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Number of intervals that fell fully inside the bucket and carried the variable.
    pub samples: usize,
    pub mean: Option<Measurement>,
}

impl ForecastSeries {
    /// Builds a series. Callers must pass intervals in ascending start order;
    /// the parser checks this before calling.
    pub(crate) fn new(
        last_modified: DateTime<Utc>,
        expires: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        units: BTreeMap<String, String>,
        intervals: Vec<ForecastInterval>,
    ) -> Self {
        debug_assert!(intervals
            .windows(2)
            .all(|w| w[0].start_time() <= w[1].start_time()));
        Self {
            last_modified,
            expires,
            updated_at,
            units,
            intervals,
        }
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// When the upstream model generated this forecast.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn units(&self) -> &BTreeMap<String, String> {
        &self.units
    }

    pub fn intervals(&self) -> &[ForecastInterval] {
        &self.intervals
    }

    /// True once `expires` lies strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires < now
    }

    /// Intervals starting on the given UTC calendar day, in series order.
    pub fn intervals_for(&self, day: NaiveDate) -> impl Iterator<Item = &ForecastInterval> + '_ {
        self.intervals
            .iter()
            .filter(move |interval| interval.start_time().date_naive() == day)
    }

    /// Like [`ForecastSeries::intervals_for`], with the day taken in `tz`.
    ///
    /// ```
    /// # use locationforecast::ForecastSeries;
    /// # use chrono::{Local, NaiveDate};
    /// # fn show(series: &ForecastSeries, day: NaiveDate) {
    /// for interval in series.intervals_on(day, &Local) {
    ///     println!("{}", interval.start_time().with_timezone(&Local));
    /// }
    /// # }
    /// ```
    pub fn intervals_on<'a, Tz: TimeZone>(
        &'a self,
        day: NaiveDate,
        tz: &'a Tz,
    ) -> impl Iterator<Item = &'a ForecastInterval> + 'a {
        self.intervals
            .iter()
            .filter(move |interval| interval.start_time().with_timezone(tz).date_naive() == day)
    }

    /// Intervals with `start <= start_time < end`, in series order.
    pub fn intervals_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &ForecastInterval> + '_ {
        self.intervals.iter().filter(move |interval| {
            let t = interval.start_time();
            start <= t && t < end
        })
    }

    /// Splits a UTC day into consecutive `bucket`-long slices and averages `variable`
    /// over the intervals lying fully inside each slice.
    ///
    /// Overlapping intervals are each counted where they fit; a 6-hour window
    /// spanning two slices counts towards neither. A non-positive `bucket`
    /// yields no slices; a `bucket` of a day or more yields a single slice.
    ///
    /// # Errors
    ///
    /// Fails if the variable's measurements disagree on units.
    pub fn bucket_averages(
        &self,
        variable: &str,
        day: NaiveDate,
        bucket: Duration,
    ) -> Result<Vec<BucketAverage>, MeasurementError> {
        let mut buckets = Vec::new();
        if bucket <= Duration::zero() {
            return Ok(buckets);
        }
        let Some(day_start) = day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()) else {
            return Ok(buckets);
        };
        let day_end = day_start + Duration::days(1);

        let mut start = day_start;
        while start < day_end {
            let end = start
                .checked_add_signed(bucket)
                .map_or(day_end, |end| end.min(day_end));
            let samples: Vec<&Measurement> = self
                .intervals_between(start, end)
                .filter(|interval| interval.end_time() <= end)
                .filter_map(|interval| interval.variable(variable))
                .collect();
            buckets.push(BucketAverage {
                start,
                end,
                samples: samples.len(),
                mean: Measurement::mean(samples.iter().copied())?,
            });
            start = end;
        }
        Ok(buckets)
    }
}
