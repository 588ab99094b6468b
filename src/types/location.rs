//! Defines [`Location`], the named geographic point a forecast is requested for.

use crate::utils::round_coordinate;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Longest escaped name kept verbatim in a [`Location::file_key`].
pub const MAX_ESCAPED_NAME_LEN: usize = 128;

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("Location name must not be empty")]
    EmptyName,

    #[error("Invalid {axis} '{value}' for location '{name}': not a number")]
    NonNumericCoordinate {
        name: String,
        axis: &'static str,
        value: String,
    },

    #[error("{axis} {value} for location '{name}' is outside [{min}, {max}]")]
    CoordinateOutOfRange {
        name: String,
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A named geographic point.
///
/// Latitude and longitude are rounded to 4 decimals on construction, which is
/// the precision the Locationforecast API accepts. A `Location` is immutable;
/// its identity for caching is `(latitude, longitude, name)`, see
/// [`Location::file_key`].
///
/// # Examples
///
/// ```
/// use locationforecast::Location;
///
/// let oslo = Location::new("Oslo", 59.91273, 10.74609).unwrap();
/// assert_eq!(oslo.latitude(), 59.9127);
/// assert_eq!(oslo.longitude(), 10.7461);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location from numeric coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::EmptyName`] for a blank name and
    /// [`LocationError::CoordinateOutOfRange`] for non-finite or out-of-range coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LocationError::EmptyName);
        }
        check_range(&name, "latitude", latitude, 90.0)?;
        check_range(&name, "longitude", longitude, 180.0)?;
        Ok(Self {
            name,
            latitude: round_coordinate(latitude),
            longitude: round_coordinate(longitude),
        })
    }

    /// Creates a location from textual coordinates, as found in city lists.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::NonNumericCoordinate`] if either coordinate does not parse,
    /// plus everything [`Location::new`] can return.
    pub fn parse(name: impl Into<String>, latitude: &str, longitude: &str) -> Result<Self, LocationError> {
        let name = name.into();
        let lat = parse_coordinate(&name, "latitude", latitude)?;
        let lon = parse_coordinate(&name, "longitude", longitude)?;
        Self::new(name, lat, lon)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Deterministic cache key for this location.
    ///
    /// The coordinates are written with exactly 4 decimals and the name is
    /// escaped so that the mapping stays injective: ASCII alphanumerics and `-`
    /// are kept, every other byte becomes `_XX` (upper-case hex).
    ///
    /// ```
    /// use locationforecast::Location;
    ///
    /// let place = Location::new("Ås", 59.66, 10.79).unwrap();
    /// assert_eq!(place.file_key(), "lat59.6600_lon10.7900_name__C3_85s");
    /// ```
    pub fn file_key(&self) -> String {
        format!(
            "lat{:.4}_lon{:.4}_name{}",
            self.latitude,
            self.longitude,
            escape_name(&self.name)
        )
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.name, self.latitude, self.longitude)
    }
}

fn parse_coordinate(name: &str, axis: &'static str, raw: &str) -> Result<f64, LocationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LocationError::NonNumericCoordinate {
            name: name.to_string(),
            axis,
            value: raw.to_string(),
        })
}

fn check_range(name: &str, axis: &'static str, value: f64, limit: f64) -> Result<(), LocationError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        return Ok(());
    }
    Err(LocationError::CoordinateOutOfRange {
        name: name.to_string(),
        axis,
        value,
        min: -limit,
        max: limit,
    })
}

fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 1);
    escaped.push('_');
    for byte in name.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("_{:02X}", byte));
        }
    }
    if escaped.len() > MAX_ESCAPED_NAME_LEN {
        // Escaped names always start with '_', so hashed ones cannot collide with them.
        return format!("h{}", hex::encode(Sha256::digest(name.as_bytes())));
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_coordinates() {
        let oslo = Location::new("Oslo", 59.91273, 10.74609).unwrap();
        assert_eq!(oslo.latitude(), 59.9127);
        assert_eq!(oslo.longitude(), 10.7461);
        assert_eq!(oslo.name(), "Oslo");
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = Location::parse("Bergen", "sixty", "5.32").unwrap_err();
        assert!(matches!(
            err,
            LocationError::NonNumericCoordinate { axis: "latitude", .. }
        ));
    }

    #[test]
    fn test_parse_accepts_padded_strings() {
        let bergen = Location::parse("Bergen", " 60.3913 ", "5.3221").unwrap();
        assert_eq!(bergen.latitude(), 60.3913);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Location::new("Nowhere", 91.0, 0.0),
            Err(LocationError::CoordinateOutOfRange { axis: "latitude", .. })
        ));
        assert!(matches!(
            Location::new("Nowhere", 0.0, f64::NAN),
            Err(LocationError::CoordinateOutOfRange { axis: "longitude", .. })
        ));
        assert_eq!(Location::new("  ", 0.0, 0.0), Err(LocationError::EmptyName));
    }

    #[test]
    fn test_file_key_is_stable() {
        let a = Location::new("Oslo", 59.91273, 10.74609).unwrap();
        let b = Location::parse("Oslo", "59.9127", "10.7461").unwrap();
        assert_eq!(a.file_key(), b.file_key());
        assert_eq!(a.file_key(), "lat59.9127_lon10.7461_name__4Fslo");
    }

    #[test]
    fn test_file_key_distinguishes_escaped_names() {
        let coords = (63.4305, 10.3951);
        let names = ["Trondheim", "Trond heim", "Trond_heim", "Trond_20heim", "trondheim"];
        let keys: std::collections::HashSet<String> = names
            .iter()
            .map(|n| Location::new(*n, coords.0, coords.1).unwrap().file_key())
            .collect();
        assert_eq!(keys.len(), names.len());
    }

    #[test]
    fn test_file_key_distinguishes_coordinates() {
        let a = Location::new("Oslo", 59.9127, 10.7461).unwrap();
        let b = Location::new("Oslo", 59.9128, 10.7461).unwrap();
        assert_ne!(a.file_key(), b.file_key());
    }

    #[test]
    fn test_file_key_differs_by_case() {
        let a = Location::new("Oslo", 59.9127, 10.7461).unwrap();
        let b = Location::new("OSLO", 59.9127, 10.7461).unwrap();
        assert_ne!(
            a.file_key().to_lowercase(),
            b.file_key().to_lowercase()
        );
    }

    #[test]
    fn test_long_names_are_hashed() {
        let long = "Ø".repeat(200);
        let other = format!("{}x", long);
        let a = Location::new(long.as_str(), 69.6828, 18.9428).unwrap();
        let b = Location::new(other.as_str(), 69.6828, 18.9428).unwrap();
        let key = a.file_key();
        assert!(key.len() < 200, "key was {} bytes", key.len());
        assert!(key.starts_with("lat69.6828_lon18.9428_nameh"));
        assert_eq!(key, a.file_key());
        assert_ne!(key, b.file_key());
    }
}
