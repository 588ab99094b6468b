use crate::types::measurement::Measurement;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// The forward-looking window a timeseries entry summarises.
///
/// Short-range entries carry a 1-hour block, medium-range entries only 6- and
/// 12-hour blocks, and the tail of the series may carry none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookAhead {
    None,
    OneHour,
    SixHours,
    TwelveHours,
}

impl LookAhead {
    pub fn duration(self) -> Duration {
        match self {
            LookAhead::None => Duration::zero(),
            LookAhead::OneHour => Duration::hours(1),
            LookAhead::SixHours => Duration::hours(6),
            LookAhead::TwelveHours => Duration::hours(12),
        }
    }
}

/// One time-bounded forecast window and the variables predicted for it.
///
/// `end_time` is always `start_time + window`, so it never precedes `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInterval {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    look_ahead: LookAhead,
    symbol_code: Option<String>,
    variables: BTreeMap<String, Measurement>,
}

impl ForecastInterval {
    pub fn new(
        start_time: DateTime<Utc>,
        look_ahead: LookAhead,
        symbol_code: Option<String>,
        variables: BTreeMap<String, Measurement>,
    ) -> Self {
        Self {
            start_time,
            end_time: start_time + look_ahead.duration(),
            look_ahead,
            symbol_code,
            variables,
        }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn look_ahead(&self) -> LookAhead {
        self.look_ahead
    }

    pub fn symbol_code(&self) -> Option<&str> {
        self.symbol_code.as_deref()
    }

    pub fn variables(&self) -> &BTreeMap<String, Measurement> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Measurement> {
        self.variables.get(name)
    }
}
