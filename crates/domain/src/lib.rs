//! Domain layer for MobiAcess
//!
//! Coordinates, places and routes shared by the location services and their
//! front ends. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
