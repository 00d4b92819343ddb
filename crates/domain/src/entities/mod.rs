//! Domain entities - Places and routes produced by the location services

mod place;
mod route;

pub use place::PlaceCandidate;
pub use route::RouteResult;
