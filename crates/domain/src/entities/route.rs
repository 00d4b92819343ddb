//! Route result entity
//!
//! A driving route as returned by the routing service: the polyline to draw
//! plus the upstream distance and duration. Unit conversion for display lives
//! here as plain helpers; the stored values are always meters and seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// A driving route between two coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Polyline vertices, start to end, as (latitude, longitude)
    pub path: Vec<Coordinate>,
    /// Route length in meters
    pub distance_meters: f64,
    /// Expected travel time in seconds
    pub duration_seconds: f64,
}

impl RouteResult {
    /// Route length in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Travel time in whole minutes, rounded to nearest
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_seconds / 60.0).round().max(0.0) as u64
    }

    /// First vertex of the path
    #[must_use]
    pub fn start(&self) -> Option<&Coordinate> {
        self.path.first()
    }

    /// Last vertex of the path
    #[must_use]
    pub fn end(&self) -> Option<&Coordinate> {
        self.path.last()
    }

    /// Path as `[latitude, longitude]` pairs, ready for a map polyline
    #[must_use]
    pub fn lat_lon_pairs(&self) -> Vec<[f64; 2]> {
        self.path.iter().map(Coordinate::lat_lon).collect()
    }

    /// Compact summary, e.g. `"12.3 km, 26 min"`
    #[must_use]
    pub fn format_summary(&self) -> String {
        format!(
            "{:.1} km, {} min",
            self.distance_km(),
            self.duration_minutes()
        )
    }
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}
