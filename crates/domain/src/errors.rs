//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Latitude or longitude outside the WGS84 range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Bounding box could not be built
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
