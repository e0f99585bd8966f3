//! Sampler configuration loaded from JSON.
//!
//! Every field has a default, so an empty object `{}` is a valid config.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routing::{RouteProviderKind, RouteSettings};
use crate::service::SamplingOptions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    pub provider: RouteProviderKind,
    /// Target spacing between points, km.
    pub frequency_km: f64,
    /// Half-width of the acceptance window around the spacing, km.
    pub tolerance_km: f64,
    pub request_timeout_secs: u64,
    pub cache_capacity: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        let sampling = SamplingOptions::default();
        let settings = RouteSettings::default();
        Self {
            provider: RouteProviderKind::default(),
            frequency_km: sampling.frequency_km,
            tolerance_km: sampling.tolerance_km,
            request_timeout_secs: settings.request_timeout.as_secs(),
            cache_capacity: settings.cache_capacity,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl SamplerConfig {
    /// Read and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SamplerConfig = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sampling_options()
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions::new(self.frequency_km, self.tolerance_km)
    }

    pub fn route_settings(&self) -> RouteSettings {
        RouteSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            cache_capacity: self.cache_capacity,
        }
    }
}
