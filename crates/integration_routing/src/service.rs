//! Location search, reverse geocoding and route fetching
//!
//! [`LocationRoutingService`] is the single entry point the app's screens call.
//! It owns no state between calls: each operation is one independent
//! request/response cycle against the geocoder or the router.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{BoundingBox, Coordinate, PlaceCandidate, RouteResult};
use tracing::{debug, instrument, warn};

use crate::client::{OsrmRoutingClient, RoutingClient};
use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::geocoding::{GeocodingClient, NominatimGeocodingClient};
use crate::http::build_client;
use crate::models::{ReverseGeocodeOutcome, SearchOutcome};
use crate::sequencer::{SearchSequencer, SearchTicket};

/// Geocoding and routing facade used by the UI layer
pub struct LocationRoutingService {
    geocoder: Arc<dyn GeocodingClient>,
    router: Arc<dyn RoutingClient>,
    config: RoutingConfig,
}

impl fmt::Debug for LocationRoutingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationRoutingService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LocationRoutingService {
    /// Create the service with Nominatim and OSRM adapters sharing one HTTP client
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::Configuration` if the configuration is invalid
    /// or the HTTP client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::Configuration)?;

        let client = build_client(config)?;
        let geocoder = NominatimGeocodingClient::with_client(client.clone(), config);
        let router = OsrmRoutingClient::with_client(client, config);

        Ok(Self::with_clients(
            Arc::new(geocoder),
            Arc::new(router),
            config,
        ))
    }

    /// Create the service on top of arbitrary adapters (test doubles, other providers)
    #[must_use]
    pub fn with_clients(
        geocoder: Arc<dyn GeocodingClient>,
        router: Arc<dyn RoutingClient>,
        config: &RoutingConfig,
    ) -> Self {
        Self {
            geocoder,
            router,
            config: config.clone(),
        }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Fixed wait before each geocoding request
    async fn pre_request_delay(&self) {
        if self.config.delay_enabled() {
            tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }
    }

    fn bias_box(&self, bias: Option<Coordinate>) -> Result<Option<BoundingBox>, RoutingError> {
        bias.map(|center| BoundingBox::around(center, self.config.viewbox_margin_deg))
            .transpose()
            .map_err(|e| RoutingError::InvalidArgument(e.to_string()))
    }

    fn validate_query(query: &str) -> Result<&str, RoutingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RoutingError::InvalidArgument(
                "Search query must not be empty".to_string(),
            ));
        }
        Ok(query)
    }

    /// Search for places matching `query`, biased towards `bias` when given
    ///
    /// Waits the configured delay before the request. Concurrent calls are not
    /// coordinated; use [`Self::search_places_latest`] when results of an
    /// older query must never overwrite a newer one.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty query, `Upstream` for a non-success
    /// status, `MalformedResponse` for unparseable records, `Timeout` or
    /// `ConnectionFailed` for transport failures.
    #[instrument(skip(self))]
    pub async fn search_places(
        &self,
        query: &str,
        bias: Option<Coordinate>,
    ) -> Result<Vec<PlaceCandidate>, RoutingError> {
        let query = Self::validate_query(query)?;
        let bbox = self.bias_box(bias)?;

        self.pre_request_delay().await;
        self.geocoder.search(query, bbox).await
    }

    /// Debounced search on a stream where only the newest query counts
    ///
    /// Takes a ticket from `sequencer`, waits the debounce window and skips
    /// the request entirely if a newer ticket was issued meanwhile. A result
    /// (or error) that arrives after being superseded is reported as
    /// [`SearchOutcome::Superseded`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_places`], for the current request only.
    pub async fn search_places_latest(
        &self,
        sequencer: &SearchSequencer,
        query: &str,
        bias: Option<Coordinate>,
    ) -> Result<SearchOutcome<Vec<PlaceCandidate>>, RoutingError> {
        let ticket = sequencer.issue();
        self.search_places_with_ticket(sequencer, ticket, query, bias)
            .await
    }

    /// [`Self::search_places_latest`] with a ticket the caller already took
    ///
    /// Lets callers keep the ticket to re-check freshness when they store the
    /// results.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_places`], for the current request only.
    #[instrument(skip(self, sequencer, ticket), fields(sequence = ticket.sequence()))]
    pub async fn search_places_with_ticket(
        &self,
        sequencer: &SearchSequencer,
        ticket: SearchTicket,
        query: &str,
        bias: Option<Coordinate>,
    ) -> Result<SearchOutcome<Vec<PlaceCandidate>>, RoutingError> {
        let query = Self::validate_query(query)?;
        let bbox = self.bias_box(bias)?;

        self.pre_request_delay().await;
        if !sequencer.is_current(ticket) {
            debug!("Search superseded before request");
            return Ok(SearchOutcome::Superseded);
        }

        let result = self.geocoder.search(query, bbox).await;
        if !sequencer.is_current(ticket) {
            debug!("Search superseded in flight");
            return Ok(SearchOutcome::Superseded);
        }

        result.map(SearchOutcome::Fresh)
    }

    /// Resolve a coordinate to an address, keeping "no address" and "failed" apart
    #[instrument(skip(self, coord), fields(coord = %coord))]
    pub async fn reverse_geocode_outcome(&self, coord: Coordinate) -> ReverseGeocodeOutcome {
        self.pre_request_delay().await;

        match self.geocoder.reverse(coord).await {
            Ok(Some(place)) => ReverseGeocodeOutcome::Found(place),
            Ok(None) => ReverseGeocodeOutcome::NotFound,
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                ReverseGeocodeOutcome::Failed(e)
            },
        }
    }

    /// Resolve a coordinate to an address
    ///
    /// Never fails: any error is logged and reported as `None`, the same as
    /// a coordinate without an address. Use [`Self::reverse_geocode_outcome`]
    /// to tell the two apart.
    pub async fn reverse_geocode(&self, coord: Coordinate) -> Option<PlaceCandidate> {
        self.reverse_geocode_outcome(coord).await.into_option()
    }

    /// Fetch a driving route between two points
    ///
    /// The returned path is in (latitude, longitude) order, start to end;
    /// distance and duration are the router's meters and seconds.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either endpoint is missing (no request is sent),
    /// `NoRouteFound` for an error status or an empty route list,
    /// `MalformedResponse`, `Timeout` or `ConnectionFailed` otherwise.
    #[instrument(skip(self))]
    pub async fn fetch_route(
        &self,
        origin: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> Result<RouteResult, RoutingError> {
        let (Some(origin), Some(destination)) = (origin, destination) else {
            return Err(RoutingError::InvalidArgument(
                "Origin and destination are both required".to_string(),
            ));
        };

        self.router.route(origin, destination).await
    }
}
