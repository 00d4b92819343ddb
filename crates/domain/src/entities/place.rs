//! Place candidate entity

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Coordinate, PlaceId};

/// A place offered to the user as a search or reverse-geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Upstream identifier
    pub id: PlaceId,
    /// Human readable label (full display name)
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl PlaceCandidate {
    /// Create a candidate located at `coordinate`
    #[must_use]
    pub fn new(id: PlaceId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }

    /// The candidate's position
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if the public fields were set out of range.
    pub fn coordinate(&self) -> Result<Coordinate, DomainError> {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// First component of the display name, e.g. the street or venue
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .split(',')
            .next()
            .map_or(self.name.as_str(), str::trim)
    }
}
