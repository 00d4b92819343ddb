//! Nominatim geocoding client
//!
//! Resolves free-text queries to place candidates and coordinates to
//! addresses using the [Nominatim](https://nominatim.openstreetmap.org) API
//! (OpenStreetMap).

use async_trait::async_trait;
use domain::{BoundingBox, Coordinate, PlaceCandidate, PlaceId};
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::http::build_client;

const SEARCH_ENDPOINT: &str = "search";
const REVERSE_ENDPOINT: &str = "reverse";

/// Trait for geocoding clients
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Find place candidates matching a free-text query, preferring results inside `bias`
    async fn search(
        &self,
        query: &str,
        bias: Option<BoundingBox>,
    ) -> Result<Vec<PlaceCandidate>, RoutingError>;

    /// Resolve a coordinate to an address; `Ok(None)` when the geocoder knows none
    async fn reverse(&self, coord: Coordinate) -> Result<Option<PlaceCandidate>, RoutingError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: RoutingConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    /// Create a client on top of an already configured HTTP client
    #[must_use]
    pub fn with_client(client: Client, config: &RoutingConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Query parameters for a forward search
    fn search_params(&self, query: &str, bias: Option<&BoundingBox>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", self.config.result_limit.to_string()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        if let Some(bbox) = bias {
            params.push(("viewbox", bbox.to_viewbox()));
            params.push(("bounded", "1".to_string()));
        }

        params
    }

    /// GET `{base}/{endpoint}` and return the body of a successful response
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String, RoutingError> {
        let url = format!("{}/{endpoint}", self.config.geocoder_base_url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| RoutingError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Upstream {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| RoutingError::from_transport(&e, self.config.timeout_secs))
    }

    /// Parse a search response body into candidates
    fn parse_search_response(body: &str) -> Result<Vec<PlaceCandidate>, RoutingError> {
        let raw: Vec<RawPlace> = serde_json::from_str(body)
            .map_err(|e| RoutingError::malformed(SEARCH_ENDPOINT, e))?;

        raw.into_iter().map(Self::convert_place).collect()
    }

    /// Convert a raw search record, rejecting unparseable or out-of-range coordinates
    fn convert_place(raw: RawPlace) -> Result<PlaceCandidate, RoutingError> {
        let latitude = raw
            .lat
            .to_f64()
            .ok_or_else(|| RoutingError::malformed(SEARCH_ENDPOINT, "invalid latitude"))?;
        let longitude = raw
            .lon
            .to_f64()
            .ok_or_else(|| RoutingError::malformed(SEARCH_ENDPOINT, "invalid longitude"))?;

        let coordinate = Coordinate::new(latitude, longitude)
            .map_err(|e| RoutingError::malformed(SEARCH_ENDPOINT, e))?;

        Ok(PlaceCandidate::new(
            raw.place_id.into(),
            raw.display_name,
            coordinate,
        ))
    }

    /// Parse a reverse response body; the candidate sits at the queried coordinate
    fn parse_reverse_response(
        body: &str,
        coord: Coordinate,
    ) -> Result<Option<PlaceCandidate>, RoutingError> {
        let raw: RawReverse = serde_json::from_str(body)
            .map_err(|e| RoutingError::malformed(REVERSE_ENDPOINT, e))?;

        if let Some(reason) = raw.error {
            debug!(%reason, "Geocoder has no address for coordinate");
            return Ok(None);
        }

        let Some(name) = raw.display_name else {
            return Ok(None);
        };

        let id = raw
            .place_id
            .ok_or_else(|| RoutingError::malformed(REVERSE_ENDPOINT, "missing place_id"))?;

        Ok(Some(PlaceCandidate::new(id.into(), name, coord)))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        bias: Option<BoundingBox>,
    ) -> Result<Vec<PlaceCandidate>, RoutingError> {
        let params = self.search_params(query, bias.as_ref());

        debug!(%query, viewbox = ?bias.map(|b| b.to_viewbox()), "Searching places");

        let body = self.fetch(SEARCH_ENDPOINT, &params).await?;
        let places = Self::parse_search_response(&body)?;

        debug!(count = places.len(), "Places found");
        Ok(places)
    }

    #[instrument(skip(self, coord), fields(coord = %coord))]
    async fn reverse(&self, coord: Coordinate) -> Result<Option<PlaceCandidate>, RoutingError> {
        let params = [
            ("lat", coord.latitude().to_string()),
            ("lon", coord.longitude().to_string()),
            ("format", "json".to_string()),
        ];

        debug!("Reverse geocoding");

        let body = self.fetch(REVERSE_ENDPOINT, &params).await?;
        Self::parse_reverse_response(&body, coord)
    }
}

// --- Raw API response types for deserialization ---

/// Nominatim sends `place_id` as a number; older deployments used strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for PlaceId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self::from(n),
            RawId::Text(s) => Self::new(s),
        }
    }
}

/// Coordinates arrive as strings (`"lat": "-23.5"`), occasionally as numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: RawId,
    display_name: String,
    lat: RawNumber,
    lon: RawNumber,
}

#[derive(Debug, Deserialize)]
struct RawReverse {
    place_id: Option<RawId>,
    display_name: Option<String>,
    error: Option<String>,
}
