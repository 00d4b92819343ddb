//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{BoundingBox, Coordinate, RouteResult};
use proptest::prelude::*;

// ============================================================================
// Coordinate Property Tests
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = Coordinate::new(lat, lon);
            prop_assert!(result.is_ok());

            let coord = result.unwrap();
            prop_assert!((coord.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((coord.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn clamped_always_lands_in_range(
            lat in -1000.0f64..1000.0f64,
            lon in -1000.0f64..1000.0f64
        ) {
            let coord = Coordinate::clamped(lat, lon).unwrap();
            prop_assert!((-90.0..=90.0).contains(&coord.latitude()));
            prop_assert!((-180.0..=180.0).contains(&coord.longitude()));
        }

        #[test]
        fn lon_lat_pair_is_swapped(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let coord = Coordinate::from_lon_lat([lon, lat]).unwrap();
            prop_assert_eq!(coord.lat_lon(), [lat, lon]);
        }
    }
}

// ============================================================================
// BoundingBox Property Tests
// ============================================================================

mod bounding_box_tests {
    use super::*;

    proptest! {
        #[test]
        fn box_contains_its_center(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64,
            margin in 0.0f64..5.0f64
        ) {
            let center = Coordinate::new(lat, lon).unwrap();
            let bbox = BoundingBox::around(center, margin).unwrap();
            prop_assert!(bbox.contains(&center));
        }

        #[test]
        fn box_edges_are_ordered(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64,
            margin in 0.0f64..5.0f64
        ) {
            let bbox = BoundingBox::around(Coordinate::new(lat, lon).unwrap(), margin).unwrap();
            prop_assert!(bbox.min_lat() <= bbox.max_lat());
            prop_assert!(bbox.min_lon() <= bbox.max_lon());
        }

        #[test]
        fn viewbox_has_four_parseable_parts(
            lat in -89.0f64..=89.0f64,
            lon in -179.0f64..=179.0f64
        ) {
            let bbox = BoundingBox::around(Coordinate::new(lat, lon).unwrap(), 0.1).unwrap();
            let parts: Vec<f64> = bbox
                .to_viewbox()
                .split(',')
                .map(|p| p.parse().unwrap())
                .collect();
            prop_assert_eq!(parts.len(), 4);
            prop_assert!((parts[0] - (lon - 0.1)).abs() < 1e-9);
            prop_assert!((parts[1] - (lat - 0.1)).abs() < 1e-9);
            prop_assert!((parts[2] - (lon + 0.1)).abs() < 1e-9);
            prop_assert!((parts[3] - (lat + 0.1)).abs() < 1e-9);
        }
    }
}

// ============================================================================
// RouteResult Property Tests
// ============================================================================

mod route_result_tests {
    use super::*;

    proptest! {
        #[test]
        fn duration_minutes_within_half_minute(seconds in 0.0f64..1_000_000.0f64) {
            let route = RouteResult {
                path: Vec::new(),
                distance_meters: 0.0,
                duration_seconds: seconds,
            };
            #[allow(clippy::cast_precision_loss)]
            let minutes = route.duration_minutes() as f64;
            prop_assert!((minutes * 60.0 - seconds).abs() <= 30.0);
        }
    }
}
