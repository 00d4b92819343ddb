//! Origin/destination selection for a single trip
//!
//! [`TripPlanner`] holds what the search screen shows: the text typed into
//! the origin and destination boxes, the candidates listed under each, and
//! the selected places. Searches run through a per-box [`SearchSequencer`],
//! so a slow, older query can never replace the list of a newer one.
//!
//! Methods take `&self`; state sits behind a mutex that is never held across
//! an `.await`, so overlapping searches from several tasks are fine.

use std::sync::Arc;

use domain::{Coordinate, PlaceCandidate, RouteResult};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::error::RoutingError;
use crate::models::{ReverseGeocodeOutcome, SearchOutcome};
use crate::sequencer::{SearchSequencer, SearchTicket};
use crate::service::LocationRoutingService;

/// Queries must be longer than this (in characters) to hit the geocoder
pub const MIN_QUERY_CHARS: usize = 3;

/// State of one search box
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchField {
    /// Text currently in the box
    pub text: String,
    /// Candidates listed under the box
    pub results: Vec<PlaceCandidate>,
    /// Candidate the user picked
    pub selected: Option<PlaceCandidate>,
}

impl SearchField {
    fn select(&mut self, place: PlaceCandidate) {
        self.text.clone_from(&place.name);
        self.results.clear();
        self.selected = Some(place);
    }
}

/// Copy of the planner state for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerSnapshot {
    /// Origin search box
    pub origin: SearchField,
    /// Destination search box
    pub destination: SearchField,
    /// Device position, used as search bias
    pub device_location: Option<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Origin,
    Destination,
}

impl PlannerSnapshot {
    fn field_mut(&mut self, field: Field) -> &mut SearchField {
        match field {
            Field::Origin => &mut self.origin,
            Field::Destination => &mut self.destination,
        }
    }
}

/// Trip planning state on top of [`LocationRoutingService`]
#[derive(Debug)]
pub struct TripPlanner {
    service: Arc<LocationRoutingService>,
    state: Mutex<PlannerSnapshot>,
    origin_seq: SearchSequencer,
    destination_seq: SearchSequencer,
}

impl TripPlanner {
    /// Create an empty planner
    #[must_use]
    pub fn new(service: Arc<LocationRoutingService>) -> Self {
        Self {
            service,
            state: Mutex::new(PlannerSnapshot::default()),
            origin_seq: SearchSequencer::new(),
            destination_seq: SearchSequencer::new(),
        }
    }

    const fn sequencer(&self, field: Field) -> &SearchSequencer {
        match field {
            Field::Origin => &self.origin_seq,
            Field::Destination => &self.destination_seq,
        }
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        self.state.lock().clone()
    }

    /// Set (or forget) the device position used to bias searches
    pub fn set_device_location(&self, location: Option<Coordinate>) {
        self.state.lock().device_location = location;
    }

    /// Type into the origin box
    ///
    /// # Errors
    ///
    /// Propagates search failures of the current query.
    pub async fn search_origin(
        &self,
        text: &str,
    ) -> Result<SearchOutcome<Vec<PlaceCandidate>>, RoutingError> {
        self.search(Field::Origin, text).await
    }

    /// Type into the destination box
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if no origin has been selected yet; otherwise
    /// propagates search failures of the current query.
    pub async fn search_destination(
        &self,
        text: &str,
    ) -> Result<SearchOutcome<Vec<PlaceCandidate>>, RoutingError> {
        self.search(Field::Destination, text).await
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        field: Field,
        text: &str,
    ) -> Result<SearchOutcome<Vec<PlaceCandidate>>, RoutingError> {
        let seq = self.sequencer(field);

        // Text and ticket change under one lock
        let (ticket, bias) = {
            let mut state = self.state.lock();
            if field == Field::Destination && state.origin.selected.is_none() {
                return Err(RoutingError::InvalidArgument(
                    "Select an origin before searching for a destination".to_string(),
                ));
            }
            let bias = state.device_location;
            let entry = state.field_mut(field);
            entry.text = text.to_string();
            entry.selected = None;

            if text.trim().chars().count() <= MIN_QUERY_CHARS {
                seq.invalidate();
                entry.results.clear();
                (None, bias)
            } else {
                (Some(seq.issue()), bias)
            }
        };

        let Some(ticket) = ticket else {
            debug!("Query too short, results cleared");
            return Ok(SearchOutcome::Fresh(Vec::new()));
        };

        let outcome = self
            .service
            .search_places_with_ticket(seq, ticket, text, bias)
            .await?;

        match outcome {
            SearchOutcome::Fresh(results) => {
                if self.store_if_current(field, ticket, &results) {
                    Ok(SearchOutcome::Fresh(results))
                } else {
                    Ok(SearchOutcome::Superseded)
                }
            },
            SearchOutcome::Superseded => Ok(SearchOutcome::Superseded),
        }
    }

    /// Store `results` in the field unless `ticket` was superseded
    fn store_if_current(
        &self,
        field: Field,
        ticket: SearchTicket,
        results: &[PlaceCandidate],
    ) -> bool {
        let mut state = self.state.lock();
        if !self.sequencer(field).is_current(ticket) {
            debug!(sequence = ticket.sequence(), "Dropping stale results");
            return false;
        }
        state.field_mut(field).results = results.to_vec();
        true
    }

    /// Pick an origin candidate
    pub fn select_origin(&self, place: PlaceCandidate) {
        let mut state = self.state.lock();
        self.origin_seq.invalidate();
        state.origin.select(place);
    }

    /// Pick a destination candidate
    pub fn select_destination(&self, place: PlaceCandidate) {
        let mut state = self.state.lock();
        self.destination_seq.invalidate();
        state.destination.select(place);
    }

    /// Reset both boxes; a destination is meaningless without its origin
    pub fn clear_origin(&self) {
        let mut state = self.state.lock();
        self.origin_seq.invalidate();
        self.destination_seq.invalidate();
        state.origin = SearchField::default();
        state.destination = SearchField::default();
    }

    /// Reset the destination box only
    pub fn clear_destination(&self) {
        let mut state = self.state.lock();
        self.destination_seq.invalidate();
        state.destination = SearchField::default();
    }

    /// Use the device position as origin, labelled by reverse geocoding
    ///
    /// Returns the selected origin, or `None` when no address could be
    /// found for the position (the origin is then left as it was).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if no device location is known.
    #[instrument(skip(self))]
    pub async fn use_current_location(&self) -> Result<Option<PlaceCandidate>, RoutingError> {
        let location = self.state.lock().device_location.ok_or_else(|| {
            RoutingError::InvalidArgument("Device location is not available".to_string())
        })?;

        match self.service.reverse_geocode_outcome(location).await {
            ReverseGeocodeOutcome::Found(place) => {
                self.select_origin(place.clone());
                Ok(Some(place))
            },
            ReverseGeocodeOutcome::NotFound | ReverseGeocodeOutcome::Failed(_) => Ok(None),
        }
    }

    /// Fetch the route between the selected origin and destination
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either side is not selected; otherwise whatever
    /// [`LocationRoutingService::fetch_route`] reports.
    pub async fn plan_route(&self) -> Result<RouteResult, RoutingError> {
        let (origin, destination) = {
            let state = self.state.lock();
            (
                state.origin.selected.as_ref().map(PlaceCandidate::coordinate),
                state.destination.selected.as_ref().map(PlaceCandidate::coordinate),
            )
        };

        let origin = origin
            .transpose()
            .map_err(|e| RoutingError::InvalidArgument(e.to_string()))?;
        let destination = destination
            .transpose()
            .map_err(|e| RoutingError::InvalidArgument(e.to_string()))?;

        self.service.fetch_route(origin, destination).await
    }
}
