//! Result types of the location routing service
//!
//! Besides the domain entities, callers get two small outcome enums: one that
//! keeps "no address" apart from "lookup failed", and one that marks search
//! results overtaken by a newer query.

use domain::PlaceCandidate;

use crate::error::RoutingError;

/// Result of a reverse-geocoding lookup
#[derive(Debug)]
pub enum ReverseGeocodeOutcome {
    /// The coordinate resolved to an address
    Found(PlaceCandidate),
    /// The geocoder answered but knows no address there
    NotFound,
    /// The lookup itself failed
    Failed(RoutingError),
}

impl ReverseGeocodeOutcome {
    /// Collapse to the legacy shape: any non-`Found` outcome is `None`
    #[must_use]
    pub fn into_option(self) -> Option<PlaceCandidate> {
        match self {
            Self::Found(place) => Some(place),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// Whether the lookup produced an address
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The failure, if the lookup failed
    #[must_use]
    pub const fn error(&self) -> Option<&RoutingError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of a sequenced search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    /// Produced by the most recent request of its stream
    Fresh(T),
    /// A newer request was issued; this result must not be shown
    Superseded,
}

impl<T> SearchOutcome<T> {
    /// The value, if still current
    pub fn fresh(self) -> Option<T> {
        match self {
            Self::Fresh(value) => Some(value),
            Self::Superseded => None,
        }
    }

    /// Whether a newer request overtook this one
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}
