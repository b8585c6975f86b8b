//! Configuration file
//!
//! JSON, every field optional. Missing fields take the defaults below and the
//! whole file is validated after load. CLI flags override individual values.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alerting::{
    AlertFormatter, NotificationSink, SinkKind, DEFAULT_APP_NAME,
    DEFAULT_NOTIFICATION_TIMEOUT_SECS,
};
use crate::dataset::{DatasetLoader, MissingValuePolicy};
use crate::http_server::HttpServerConfig;
use crate::location::{
    Coordinates, FixedLocation, IpGeolocation, LocationProvider, NoLocation, DEFAULT_IP_ENDPOINT,
};
use crate::map::DEFAULT_CIRCLE_RADIUS_M;
use crate::observability::Severity;
use crate::pipeline::Analyzer;
use crate::proximity::{ProximityEngine, DEFAULT_THRESHOLD_KM};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the user location comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// IP geolocation lookup
    #[default]
    Ip,
    /// `latitude`/`longitude` from this file
    Fixed,
    /// Always unresolved
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Required when provider is "fixed"
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Required when provider is "fixed"
    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Lookup timeout; the HTTP client default applies when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_IP_ENDPOINT.to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            latitude: None,
            longitude: None,
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub sink: SinkKind,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_notification_timeout")]
    pub timeout_secs: u32,
}

fn default_true() -> bool {
    true
}
fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}
fn default_notification_timeout() -> u32 {
    DEFAULT_NOTIFICATION_TIMEOUT_SECS
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink: SinkKind::default(),
            app_name: default_app_name(),
            timeout_secs: default_notification_timeout(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Alert radius in km (default 500)
    #[serde(default = "default_threshold_km")]
    pub threshold_km: f64,

    /// Blank cell handling (default "fill_zero")
    #[serde(default)]
    pub missing_values: MissingValuePolicy,

    /// Circle radius per reactor on the map layer (default 10 km)
    #[serde(default = "default_circle_radius_m")]
    pub circle_radius_m: f64,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_threshold_km() -> f64 {
    DEFAULT_THRESHOLD_KM
}
fn default_circle_radius_m() -> f64 {
    DEFAULT_CIRCLE_RADIUS_M
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_km: default_threshold_km(),
            missing_values: MissingValuePolicy::default(),
            circle_radius_m: default_circle_radius_m(),
            log_level: default_log_level(),
            location: LocationConfig::default(),
            notifications: NotificationConfig::default(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load from file when a path is given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.threshold_km.is_finite() || self.threshold_km < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "threshold_km must be a finite value >= 0, got {}",
                self.threshold_km
            )));
        }

        if !self.circle_radius_m.is_finite() || self.circle_radius_m <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "circle_radius_m must be > 0, got {}",
                self.circle_radius_m
            )));
        }

        self.severity()?;

        if self.location.provider == ProviderKind::Fixed {
            self.fixed_coordinates()?;
        }

        if self.location.provider == ProviderKind::Ip && self.location.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "location.endpoint must not be empty".to_string(),
            ));
        }

        if self.location.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "location.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.notifications.app_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notifications.app_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse::<Severity>().map_err(ConfigError::Invalid)
    }

    fn fixed_coordinates(&self) -> ConfigResult<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                let coordinates = Coordinates::new(lat, lon);
                if coordinates.is_valid() {
                    Ok(coordinates)
                } else {
                    Err(ConfigError::Invalid(format!(
                        "location ({}, {}) is out of range",
                        lat, lon
                    )))
                }
            }
            _ => Err(ConfigError::Invalid(
                "location.latitude and location.longitude are required for the fixed provider"
                    .to_string(),
            )),
        }
    }

    pub fn dataset_loader(&self) -> DatasetLoader {
        DatasetLoader::new(self.missing_values)
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(
            ProximityEngine::new(self.threshold_km),
            AlertFormatter::new(
                self.notifications.app_name.clone(),
                self.notifications.timeout_secs,
            ),
        )
    }

    pub fn location_provider(&self) -> ConfigResult<Box<dyn LocationProvider>> {
        Ok(match self.location.provider {
            ProviderKind::Ip => Box::new(IpGeolocation::new(
                self.location.endpoint.clone(),
                self.location.timeout_secs.map(Duration::from_secs),
            )),
            ProviderKind::Fixed => {
                let c = self.fixed_coordinates()?;
                Box::new(FixedLocation::new(c.latitude, c.longitude))
            }
            ProviderKind::None => Box::new(NoLocation),
        })
    }

    pub fn notification_sink(&self) -> Box<dyn NotificationSink> {
        if self.notifications.enabled {
            self.notifications.sink.build()
        } else {
            SinkKind::None.build()
        }
    }
}
