//! CLI configuration loading

use std::path::Path;

use integration_routing::RoutingConfig;
use serde::Deserialize;

/// Default configuration file name (without extension), looked up in the working directory
const DEFAULT_CONFIG_NAME: &str = "mobiacess";

/// Environment variable prefix, e.g. `MOBIACESS_ROUTING__TIMEOUT_SECS=5`
const ENV_PREFIX: &str = "MOBIACESS";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Geocoding and routing upstreams
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// Without `path`, `mobiacess.toml` in the working directory is read if it
    /// exists. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// [`Self::load`] with an explicit environment instead of the process one
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config
            .routing
            .validate()
            .map_err(config::ConfigError::Message)?;

        Ok(config)
    }
}
