//! Location routing error types

use thiserror::Error;

/// Errors that can occur during geocoding and routing operations
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A required input was missing or unusable; no request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Upstream answered with a non-success HTTP status
    #[error("Upstream {endpoint} returned HTTP {status}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Endpoint that produced the status (e.g. "search")
        endpoint: String,
    },

    /// Upstream body did not have the expected shape
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// Endpoint that produced the body
        endpoint: String,
        /// What was wrong with it
        reason: String,
    },

    /// The router produced no usable route
    #[error("No route found{}", status_suffix(*.status))]
    NoRouteFound {
        /// HTTP status when the router answered with an error status
        status: Option<u16>,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Connection to the upstream failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn status_suffix(status: Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl RoutingError {
    pub(crate) fn malformed(endpoint: &str, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }

    /// Returns true if the caller supplied bad input (as opposed to an upstream failure)
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Configuration(_))
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::NoRouteFound { status } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(RoutingError::InvalidArgument("origin".to_string()).is_client_error());
        assert!(RoutingError::Configuration("bad".to_string()).is_client_error());
    }

    #[test]
    fn test_upstream_errors_are_not_client_errors() {
        assert!(
            !RoutingError::Upstream {
                status: 500,
                endpoint: "search".to_string(),
            }
            .is_client_error()
        );
        assert!(!RoutingError::Timeout { timeout_secs: 10 }.is_client_error());
        assert!(!RoutingError::NoRouteFound { status: None }.is_client_error());
        assert!(!RoutingError::malformed("route", "missing geometry").is_client_error());
    }

    #[test]
    fn test_status() {
        let err = RoutingError::Upstream {
            status: 503,
            endpoint: "reverse".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(RoutingError::NoRouteFound { status: Some(400) }.status(), Some(400));
        assert_eq!(RoutingError::NoRouteFound { status: None }.status(), None);
        assert_eq!(RoutingError::Timeout { timeout_secs: 1 }.status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = RoutingError::Upstream {
            status: 500,
            endpoint: "search".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream search returned HTTP 500");

        let err = RoutingError::NoRouteFound { status: Some(400) };
        assert_eq!(err.to_string(), "No route found (HTTP 400)");

        let err = RoutingError::NoRouteFound { status: None };
        assert_eq!(err.to_string(), "No route found");

        let err = RoutingError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));

        let err = RoutingError::malformed("search", "invalid latitude");
        assert!(err.to_string().contains("invalid latitude"));
    }
}
