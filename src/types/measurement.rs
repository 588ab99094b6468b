//! Defines [`Measurement`], a named physical quantity with a unit.
//!
//! Comparisons and arithmetic are exposed as named methods returning `Result`,
//! so mixing units (or, for arithmetic, quantities) is reported instead of
//! silently producing a number.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("Cannot combine '{left}' with '{right}': units differ")]
    UnitMismatch { left: String, right: String },

    #[error("Cannot combine measurement '{left}' with '{right}': quantities differ")]
    NameMismatch { left: String, right: String },

    #[error("Cannot order {left} and {right}")]
    Unordered { left: f64, right: f64 },
}

/// A single value of a forecast variable, e.g. `air_temperature = 4.2 celsius`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    name: String,
    value: f64,
    units: String,
}

impl Measurement {
    pub fn new(name: impl Into<String>, value: f64, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            units: units.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    /// Value equality between two measurements in the same unit.
    ///
    /// # Errors
    ///
    /// [`MeasurementError::UnitMismatch`] if the units differ.
    pub fn equals(&self, other: &Measurement) -> Result<bool, MeasurementError> {
        self.check_units(other)?;
        Ok(self.value == other.value)
    }

    /// Compares against a bare number; only the value is considered.
    pub fn equals_value(&self, value: f64) -> bool {
        self.value == value
    }

    /// # Errors
    ///
    /// [`MeasurementError::UnitMismatch`] if the units differ.
    pub fn less_than(&self, other: &Measurement) -> Result<bool, MeasurementError> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Orders two measurements in the same unit.
    ///
    /// # Errors
    ///
    /// [`MeasurementError::UnitMismatch`] if the units differ and
    /// [`MeasurementError::Unordered`] if either value is NaN.
    pub fn compare(&self, other: &Measurement) -> Result<Ordering, MeasurementError> {
        self.check_units(other)?;
        self.value
            .partial_cmp(&other.value)
            .ok_or(MeasurementError::Unordered {
                left: self.value,
                right: other.value,
            })
    }

    /// # Errors
    ///
    /// Fails unless both name and units match.
    pub fn add(&self, other: &Measurement) -> Result<Measurement, MeasurementError> {
        self.check_compatible(other)?;
        Ok(self.with_value(self.value + other.value))
    }

    /// # Errors
    ///
    /// Fails unless both name and units match.
    pub fn subtract(&self, other: &Measurement) -> Result<Measurement, MeasurementError> {
        self.check_compatible(other)?;
        Ok(self.with_value(self.value - other.value))
    }

    /// Arithmetic mean of a set of measurements of the same quantity.
    ///
    /// Returns `Ok(None)` for an empty input.
    ///
    /// # Errors
    ///
    /// Fails if the measurements do not all share name and units.
    pub fn mean<'a>(
        measurements: impl IntoIterator<Item = &'a Measurement>,
    ) -> Result<Option<Measurement>, MeasurementError> {
        let mut iter = measurements.into_iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        let mut sum = first.clone();
        let mut count = 1usize;
        for measurement in iter {
            sum = sum.add(measurement)?;
            count += 1;
        }
        Ok(Some(sum.with_value(sum.value / count as f64)))
    }

    fn with_value(&self, value: f64) -> Measurement {
        Measurement {
            name: self.name.clone(),
            value,
            units: self.units.clone(),
        }
    }

    fn check_units(&self, other: &Measurement) -> Result<(), MeasurementError> {
        if self.units != other.units {
            return Err(MeasurementError::UnitMismatch {
                left: self.units.clone(),
                right: other.units.clone(),
            });
        }
        Ok(())
    }

    fn check_compatible(&self, other: &Measurement) -> Result<(), MeasurementError> {
        if self.name != other.name {
            return Err(MeasurementError::NameMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }
        self.check_units(other)
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units)
    }
}
