//! Upstream place identifier value object
//!
//! # Examples
//!
//! ```
//! use domain::PlaceId;
//!
//! let id = PlaceId::from(298_394_u64);
//! assert_eq!(id.as_str(), "298394");
//!
//! let id = PlaceId::new("node/123");
//! assert_eq!(id.to_string(), "node/123");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque identifier assigned by the geocoding service
///
/// Not guaranteed to be stable across calls; only useful for telling the
/// candidates of a single response apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for PlaceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_render_as_decimal() {
        assert_eq!(PlaceId::from(1_u64).as_str(), "1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&PlaceId::new("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(PlaceId::from("7"), PlaceId::from(7_u64));
    }
}
