//! Rectangular search bias region

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::errors::DomainError;

/// A latitude/longitude aligned box used to bias geocoding results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// Box spanning `margin_deg` degrees on every side of `center`
    ///
    /// Edges falling outside the valid coordinate range are clamped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBoundingBox` if the margin is negative or not finite.
    pub fn around(center: Coordinate, margin_deg: f64) -> Result<Self, DomainError> {
        if !margin_deg.is_finite() || margin_deg < 0.0 {
            return Err(DomainError::InvalidBoundingBox(format!(
                "margin must be a non-negative number of degrees, got {margin_deg}"
            )));
        }

        let clamp_lon = |v: f64| v.clamp(*LONGITUDE_RANGE.start(), *LONGITUDE_RANGE.end());
        let clamp_lat = |v: f64| v.clamp(*LATITUDE_RANGE.start(), *LATITUDE_RANGE.end());

        Ok(Self {
            min_lon: clamp_lon(center.longitude() - margin_deg),
            min_lat: clamp_lat(center.latitude() - margin_deg),
            max_lon: clamp_lon(center.longitude() + margin_deg),
            max_lat: clamp_lat(center.latitude() + margin_deg),
        })
    }

    /// Western edge
    #[must_use]
    pub const fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Southern edge
    #[must_use]
    pub const fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Eastern edge
    #[must_use]
    pub const fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Northern edge
    #[must_use]
    pub const fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Whether `coord` lies inside the box (edges inclusive)
    #[must_use]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude())
            && (self.min_lon..=self.max_lon).contains(&coord.longitude())
    }

    /// Render as a Nominatim `viewbox` value: `minLon,minLat,maxLon,maxLat`
    #[must_use]
    pub fn to_viewbox(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_viewbox())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> Coordinate {
        Coordinate::new(-23.5, -46.5).expect("valid")
    }

    #[test]
    fn test_around_spans_margin() {
        let bbox = BoundingBox::around(center(), 0.25).expect("valid");
        assert!((bbox.min_lon() + 46.75).abs() < 1e-9);
        assert!((bbox.min_lat() + 23.75).abs() < 1e-9);
        assert!((bbox.max_lon() + 46.25).abs() < 1e-9);
        assert!((bbox.max_lat() + 23.25).abs() < 1e-9);
    }

    #[test]
    fn test_viewbox_order_is_lon_lat() {
        let bbox = BoundingBox::around(center(), 0.25).expect("valid");
        assert_eq!(bbox.to_viewbox(), "-46.75,-23.75,-46.25,-23.25");
        assert_eq!(bbox.to_string(), bbox.to_viewbox());
    }

    #[test]
    fn test_contains_center() {
        let bbox = BoundingBox::around(center(), 0.1).expect("valid");
        assert!(bbox.contains(&center()));

        let far = Coordinate::new(-22.9, -43.2).expect("valid");
        assert!(!bbox.contains(&far));
    }

    #[test]
    fn test_edges_clamped_near_pole() {
        let north = Coordinate::new(89.95, 179.95).expect("valid");
        let bbox = BoundingBox::around(north, 0.1).expect("valid");
        assert!((bbox.max_lat() - 90.0).abs() < f64::EPSILON);
        assert!((bbox.max_lon() - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_margin() {
        assert!(BoundingBox::around(center(), -0.1).is_err());
        assert!(BoundingBox::around(center(), f64::NAN).is_err());
    }

    #[test]
    fn test_zero_margin_is_a_point() {
        let bbox = BoundingBox::around(center(), 0.0).expect("valid");
        assert!((bbox.min_lat() - bbox.max_lat()).abs() < f64::EPSILON);
    }
}
