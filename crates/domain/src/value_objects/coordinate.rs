//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 coordinate with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !LATITUDE_RANGE.contains(&latitude) || !LONGITUDE_RANGE.contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate, clamping both axes into their valid range
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is NaN.
    pub fn clamped(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if latitude.is_nan() || longitude.is_nan() {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude: latitude.clamp(*LATITUDE_RANGE.start(), *LATITUDE_RANGE.end()),
            longitude: longitude.clamp(*LONGITUDE_RANGE.start(), *LONGITUDE_RANGE.end()),
        })
    }

    /// Build a coordinate from a GeoJSON-style `[longitude, latitude]` pair
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if the pair is out of range.
    pub fn from_lon_lat(pair: [f64; 2]) -> Result<Self, DomainError> {
        let [longitude, latitude] = pair;
        Self::new(latitude, longitude)
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The `(latitude, longitude)` pair consumed by map renderers
    #[must_use]
    pub const fn lat_lon(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// Unchecked wire form; deserialization goes through [`Coordinate::new`]
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DomainError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = DomainError;

    /// Parse `"lat,lon"` (whitespace around either part is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::ValidationError(format!("expected \"lat,lon\", got \"{s}\""));

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let coord = Coordinate::new(-23.5505, -46.6333).expect("valid coordinates");
        assert!((coord.latitude() + 23.5505).abs() < f64::EPSILON);
        assert!((coord.longitude() + 46.6333).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_clamped() {
        let coord = Coordinate::clamped(95.0, -200.0).expect("clamps");
        assert!((coord.latitude() - 90.0).abs() < f64::EPSILON);
        assert!((coord.longitude() + 180.0).abs() < f64::EPSILON);

        assert!(Coordinate::clamped(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_from_lon_lat_swaps_axes() {
        let coord = Coordinate::from_lon_lat([10.0, 20.0]).expect("valid");
        assert!((coord.latitude() - 20.0).abs() < f64::EPSILON);
        assert!((coord.longitude() - 10.0).abs() < f64::EPSILON);
        assert_eq!(coord.lat_lon(), [20.0, 10.0]);
    }

    #[test]
    fn test_parse_from_str() {
        let coord: Coordinate = "-23.5, -46.6".parse().expect("parses");
        assert!((coord.latitude() + 23.5).abs() < f64::EPSILON);
        assert!((coord.longitude() + 46.6).abs() < f64::EPSILON);

        assert!("-23.5".parse::<Coordinate>().is_err());
        assert!("abc,def".parse::<Coordinate>().is_err());
        assert!("100,0".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_display() {
        let coord = Coordinate::new(-23.5, -46.6).expect("valid");
        let display = format!("{coord}");
        assert!(display.contains("-23.5"));
        assert!(display.contains("-46.6"));
    }

    #[test]
    fn test_serialization() {
        let coord = Coordinate::new(-23.5, -46.6).expect("valid");
        let json = serde_json::to_string(&coord).expect("serialize");
        assert!(json.contains("latitude"));
        assert!(json.contains("-46.6"));

        let deserialized: Coordinate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(coord, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let result: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": 500.0, "longitude": 0.0}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid coordinates"));
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let result: Result<Coordinate, _> = serde_json::from_str(r#"{"latitude": 10.0}"#);
        assert!(result.is_err());
    }
}
