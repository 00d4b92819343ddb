//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod coordinate;
mod place_id;

pub use bounding_box::BoundingBox;
pub use coordinate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use place_id::PlaceId;
