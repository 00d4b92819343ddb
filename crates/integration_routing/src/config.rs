//! Location routing service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the geocoding and routing upstreams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL for the Nominatim geocoding API
    #[serde(default = "default_geocoder_base_url")]
    pub geocoder_base_url: String,

    /// Base URL for the OSRM route service (up to, not including, the profile)
    #[serde(default = "default_router_base_url")]
    pub router_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay before each geocoding request, in milliseconds (also the debounce window)
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Maximum number of search candidates to request
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Country code filter (e.g., "br" for Brazil, empty to disable)
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Half-width of the search bias box around the caller's position, in degrees
    #[serde(default = "default_viewbox_margin_deg")]
    pub viewbox_margin_deg: f64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language sent with every request
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_geocoder_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_router_base_url() -> String {
    "https://router.project-osrm.org/route/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_request_delay_ms() -> u64 {
    300
}

const fn default_result_limit() -> u8 {
    5
}

fn default_country_filter() -> String {
    "br".to_string()
}

const fn default_viewbox_margin_deg() -> f64 {
    0.1
}

fn default_user_agent() -> String {
    "MobiAcess/1.0".to_string()
}

fn default_accept_language() -> String {
    "pt-BR,pt;q=0.9".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            geocoder_base_url: default_geocoder_base_url(),
            router_base_url: default_router_base_url(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            result_limit: default_result_limit(),
            country_filter: default_country_filter(),
            viewbox_margin_deg: default_viewbox_margin_deg(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl RoutingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            request_delay_ms: 0,
            ..Default::default()
        }
    }

    /// Point both upstreams at the same base URL (mock servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.geocoder_base_url = base.to_string();
        self.router_base_url = base.to_string();
        self
    }

    /// Check if a pre-request delay is configured
    #[must_use]
    pub const fn delay_enabled(&self) -> bool {
        self.request_delay_ms > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.geocoder_base_url.is_empty() {
            return Err("geocoder_base_url must not be empty".to_string());
        }

        if self.router_base_url.is_empty() {
            return Err("router_base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.result_limit == 0 {
            return Err("result_limit must be greater than 0".to_string());
        }

        if self.result_limit > 50 {
            return Err("result_limit must be 50 or less".to_string());
        }

        if !self.viewbox_margin_deg.is_finite() || self.viewbox_margin_deg < 0.0 {
            return Err("viewbox_margin_deg must be a non-negative number".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert_eq!(config.geocoder_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(
            config.router_base_url,
            "https://router.project-osrm.org/route/v1"
        );
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.request_delay_ms, 300);
        assert_eq!(config.result_limit, 5);
        assert_eq!(config.country_filter, "br");
        assert!((config.viewbox_margin_deg - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.user_agent, "MobiAcess/1.0");
        assert_eq!(config.accept_language, "pt-BR,pt;q=0.9");
    }

    #[test]
    fn test_testing_config() {
        let config = RoutingConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.delay_enabled());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = RoutingConfig::for_testing().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.geocoder_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.router_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_validation_success() {
        assert!(RoutingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = RoutingConfig {
            router_base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = RoutingConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_result_limit_bounds() {
        let zero = RoutingConfig {
            result_limit: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let too_many = RoutingConfig {
            result_limit: 51,
            ..Default::default()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_validation_negative_margin() {
        let config = RoutingConfig {
            viewbox_margin_deg: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: RoutingConfig =
            serde_json::from_str(r#"{ "country_filter": "pt", "timeout_secs": 3 }"#).unwrap();
        assert_eq!(config.country_filter, "pt");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.result_limit, 5);
    }
}
