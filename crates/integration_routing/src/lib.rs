//! Geocoding and routing integration
//!
//! Place search and reverse geocoding against a Nominatim-compatible
//! geocoder (<https://nominatim.org>), driving routes from an OSRM route
//! service (<https://project-osrm.org>). Neither needs an API key.
//!
//! [`LocationRoutingService`] is the entry point; [`TripPlanner`] adds the
//! origin/destination state of a trip search screen on top of it.

pub mod client;
pub mod config;
pub mod error;
pub mod geocoding;
mod http;
mod models;
pub mod planner;
mod sequencer;
pub mod service;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::RoutingConfig;
pub use error::RoutingError;
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
pub use http::build_client;
pub use models::{ReverseGeocodeOutcome, SearchOutcome};
pub use planner::{MIN_QUERY_CHARS, PlannerSnapshot, SearchField, TripPlanner};
pub use sequencer::{SearchSequencer, SearchTicket};
pub use service::LocationRoutingService;
