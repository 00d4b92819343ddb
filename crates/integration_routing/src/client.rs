//! OSRM routing client
//!
//! Fetches driving routes with full GeoJSON geometry from an
//! [OSRM](https://project-osrm.org) route service.

use async_trait::async_trait;
use domain::{Coordinate, RouteResult};
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::http::build_client;

const ROUTE_ENDPOINT: &str = "route";
const ROUTE_PROFILE: &str = "driving";

/// Trait for route service clients
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch the best driving route from `origin` to `destination`
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteResult, RoutingError>;
}

/// OSRM-based routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: RoutingConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client with its own HTTP client
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

    /// `{base}/driving/{oLon},{oLat};{dLon},{dLat}`; OSRM wants longitude first
    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/{ROUTE_PROFILE}/{},{};{},{}",
            self.config.router_base_url,
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude()
        )
    }

    /// Parse the raw OSRM JSON route response into a route result
    fn parse_route_response(body: &str) -> Result<RouteResult, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::malformed(ROUTE_ENDPOINT, e))?;

        if let Some(code) = raw.code.as_deref().filter(|c| *c != "Ok") {
            debug!(%code, message = ?raw.message, "Router reported no route");
            return Err(RoutingError::NoRouteFound { status: None });
        }

        let route = raw
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRouteFound { status: None })?;

        Self::convert_route(route)
    }

    /// Convert a raw route, reprojecting `[lon, lat]` vertices to coordinates
    fn convert_route(raw: RawRoute) -> Result<RouteResult, RoutingError> {
        let path = raw
            .geometry
            .coordinates
            .into_iter()
            .map(|pair| {
                Coordinate::from_lon_lat(pair).map_err(|e| RoutingError::malformed(ROUTE_ENDPOINT, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteResult {
            path,
            distance_meters: raw.distance,
            duration_seconds: raw.duration,
        })
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self, origin, destination), fields(from = %origin, to = %destination))]
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteResult, RoutingError> {
        let url = self.route_url(origin, destination);
        let params = [("overview", "full"), ("geometries", "geojson")];

        debug!(?url, "Fetching route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RoutingError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Router returned error status");
            return Err(RoutingError::NoRouteFound {
                status: Some(status.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::from_transport(&e, self.config.timeout_secs))?;

        let route = Self::parse_route_response(&body)?;

        debug!(
            vertices = route.path.len(),
            distance_meters = route.distance_meters,
            duration_seconds = route.duration_seconds,
            "Route found"
        );
        Ok(route)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    geometry: RawGeometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_response_swaps_axes() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": { "type": "LineString", "coordinates": [[10, 20], [11, 21]] },
                "distance": 5000,
                "duration": 600
            }]
        }"#;

        let route = OsrmRoutingClient::parse_route_response(json).unwrap();
        assert_eq!(route.lat_lon_pairs(), vec![[20.0, 10.0], [21.0, 11.0]]);
        assert!((route.distance_meters - 5000.0).abs() < f64::EPSILON);
        assert!((route.duration_seconds - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_route_without_code_field() {
        let json = r#"{"routes":[{"geometry":{"coordinates":[[-46.6,-23.5]]},"distance":1,"duration":2}]}"#;
        let route = OsrmRoutingClient::parse_route_response(json).unwrap();
        assert_eq!(route.path.len(), 1);
        assert!((route.path[0].latitude() + 23.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_routes() {
        let err = OsrmRoutingClient::parse_route_response(r#"{"code":"Ok","routes":[]}"#).unwrap_err();
        assert!(matches!(err, RoutingError::NoRouteFound { status: None }));
    }

    #[test]
    fn test_parse_missing_routes() {
        let err = OsrmRoutingClient::parse_route_response(r#"{"code":"Ok"}"#).unwrap_err();
        assert!(matches!(err, RoutingError::NoRouteFound { .. }));
    }

    #[test]
    fn test_parse_no_route_code() {
        let json = r#"{"code":"NoRoute","message":"Impossible route between points","routes":[]}"#;
        let err = OsrmRoutingClient::parse_route_response(json).unwrap_err();
        assert!(matches!(err, RoutingError::NoRouteFound { .. }));
    }

    #[test]
    fn test_parse_malformed_geometry() {
        let json = r#"{"routes":[{"geometry":{"coordinates":[[10]]},"distance":1,"duration":1}]}"#;
        let err = OsrmRoutingClient::parse_route_response(json).unwrap_err();
        assert!(matches!(err, RoutingError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_out_of_range_vertex() {
        let json = r#"{"routes":[{"geometry":{"coordinates":[[10, 95]]},"distance":1,"duration":1}]}"#;
        let err = OsrmRoutingClient::parse_route_response(json).unwrap_err();
        assert!(matches!(err, RoutingError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(OsrmRoutingClient::parse_route_response("not json").is_err());
    }

    #[test]
    fn test_route_url_is_lon_lat() {
        let config = RoutingConfig::for_testing().with_base_url("http://osrm.local/route/v1");
        let client = OsrmRoutingClient::new(&config).unwrap();
        let origin = Coordinate::new(-23.5, -46.6).unwrap();
        let destination = Coordinate::new(-22.9, -43.2).unwrap();
        assert_eq!(
            client.route_url(origin, destination),
            "http://osrm.local/route/v1/driving/-46.6,-23.5;-43.2,-22.9"
        );
    }
}
