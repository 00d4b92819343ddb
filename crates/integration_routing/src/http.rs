//! Shared HTTP client construction
//!
//! Both upstream adapters use one `reqwest::Client` carrying the default
//! headers and the per-request timeout, so the header set lives in one place.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::config::RoutingConfig;
use crate::error::RoutingError;

/// Build the HTTP client shared by the geocoding and routing adapters
///
/// # Errors
///
/// Returns `RoutingError::Configuration` if a header value is invalid or the
/// client cannot be initialized.
pub fn build_client(config: &RoutingConfig) -> Result<Client, RoutingError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .default_headers(default_headers(config)?)
        .build()
        .map_err(|e| RoutingError::Configuration(e.to_string()))
}

fn default_headers(config: &RoutingConfig) -> Result<HeaderMap, RoutingError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| RoutingError::Configuration(format!("accept_language: {e}")))?;
    headers.insert(ACCEPT_LANGUAGE, language);

    Ok(headers)
}
