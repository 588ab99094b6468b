//! A list of known places, loaded from a JSON city list.
//!
//! The expected shape is an array of `{"city": .., "lat": .., "lon": ..}`
//! objects, where coordinates may be JSON numbers or numeric strings.

use crate::places::error::PlaceListError;
use crate::types::location::Location;
use haversine::{distance, Location as HaversineLocation, Units};
use log::info;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CityRecord {
    city: String,
    lat: Coordinate,
    lon: Coordinate,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn as_text(&self) -> String {
        match self {
            Coordinate::Number(n) => n.to_string(),
            Coordinate::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlaceList {
    places: Vec<Location>,
}

impl PlaceList {
    pub fn new(places: Vec<Location>) -> Self {
        Self { places }
    }

    /// Reads and parses a city list file.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceListError::Read`] if the file cannot be read, [`PlaceListError::Parse`]
    /// if it is not a list of city records, and [`PlaceListError::InvalidEntry`] for the
    /// first record whose coordinates are not valid.
    pub async fn load(path: &Path) -> Result<Self, PlaceListError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PlaceListError::Read(path.to_path_buf(), e))?;
        let list = Self::parse(&bytes, &path.display().to_string())?;
        info!("Loaded {} places from {}", list.len(), path.display());
        Ok(list)
    }

    /// Parses a city list from an in-memory JSON document.
    pub fn from_json(json: &str) -> Result<Self, PlaceListError> {
        Self::parse(json.as_bytes(), "inline JSON")
    }

    fn parse(bytes: &[u8], origin: &str) -> Result<Self, PlaceListError> {
        let records: Vec<CityRecord> =
            serde_json::from_slice(bytes).map_err(|source| PlaceListError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        let places = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Location::parse(record.city, &record.lat.as_text(), &record.lon.as_text()).map_err(
                    |source| PlaceListError::InvalidEntry {
                        origin: origin.to_string(),
                        index,
                        source,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.places.iter()
    }

    /// First place whose name matches, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Location> {
        let wanted = name.trim().to_lowercase();
        self.places
            .iter()
            .find(|place| place.name().to_lowercase() == wanted)
    }

    /// Closest place to the given point and its great-circle distance in km.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<(&Location, f64)> {
        self.places
            .iter()
            .map(|place| {
                let dist_km = distance(
                    HaversineLocation {
                        latitude,
                        longitude,
                    },
                    HaversineLocation {
                        latitude: place.latitude(),
                        longitude: place.longitude(),
                    },
                    Units::Kilometers,
                );
                (place, dist_km)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::location::LocationError;

    const CITIES: &str = r#"[
        {"city": "Oslo", "lat": "59.9111", "lon": "10.7528", "country": "Norway"},
        {"city": "Bergen", "lat": "60.3894", "lon": "5.3300"},
        {"city": "Trondheim", "lat": 63.4297, "lon": 10.3933},
        {"city": "Ålesund", "lat": "62.4723", "lon": "6.1549"}
    ]"#;

    #[test]
    fn test_parse_mixed_coordinates() -> Result<(), PlaceListError> {
        let list = PlaceList::from_json(CITIES)?;
        assert_eq!(list.len(), 4);
        let trondheim = list.find("Trondheim").unwrap();
        assert_eq!(trondheim.latitude(), 63.4297);
        Ok(())
    }

    #[test]
    fn test_find_ignores_case() -> Result<(), PlaceListError> {
        let list = PlaceList::from_json(CITIES)?;
        assert_eq!(list.find("oslo").unwrap().name(), "Oslo");
        assert_eq!(list.find("ÅLESUND").unwrap().name(), "Ålesund");
        assert!(list.find("Tromsø").is_none());
        Ok(())
    }

    #[test]
    fn test_nearest() -> Result<(), PlaceListError> {
        let list = PlaceList::from_json(CITIES)?;
        // Drammen is closest to Oslo.
        let (place, dist_km) = list.nearest(59.7439, 10.2045).unwrap();
        assert_eq!(place.name(), "Oslo");
        assert!(dist_km > 30.0 && dist_km < 40.0, "distance was {}", dist_km);
        assert!(PlaceList::default().nearest(0.0, 0.0).is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = PlaceList::from_json(r#"[{"city": "Oslo", "lat": "n/a", "lon": "10.75"}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            PlaceListError::InvalidEntry {
                index: 0,
                source: LocationError::NonNumericCoordinate { .. },
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_malformed_document() {
        let err = PlaceList::from_json(r#"{"city": "Oslo"}"#).unwrap_err();
        assert!(matches!(err, PlaceListError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_from_file() -> Result<(), PlaceListError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nor.json");
        std::fs::write(&path, CITIES).unwrap();
        let list = PlaceList::load(&path).await?;
        assert_eq!(list.iter().count(), 4);

        let missing = PlaceList::load(&dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(PlaceListError::Read(..))));
        Ok(())
    }
}
