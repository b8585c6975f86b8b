//! Location providers and the degrading resolver

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::types::{Coordinates, UserLocation};
use crate::observability::{log_event_with_fields, Event};

/// Default IP geolocation endpoint (ipinfo-style response)
pub const DEFAULT_IP_ENDPOINT: &str = "https://ipinfo.io/json";

/// Result type for location lookups
pub type LocationResult<T> = Result<T, LocationError>;

/// Location lookup errors. Never escape `resolve`.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location lookup failed: {0}")]
    Lookup(String),

    #[error("Invalid geolocation response: {0}")]
    InvalidResponse(String),

    #[error("Coordinates out of range: ({latitude}, {longitude})")]
    OutOfRange { latitude: f64, longitude: f64 },

    #[error("No location provider configured")]
    Unavailable,
}

impl From<reqwest::Error> for LocationError {
    fn from(e: reqwest::Error) -> Self {
        LocationError::Lookup(e.to_string())
    }
}

/// Capability that yields the caller's coordinates.
pub trait LocationProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Looks up the current coordinates. A single attempt, no retries.
    fn locate(&self) -> LocationResult<Coordinates>;
}

/// Resolves the user location, degrading any failure to `Unresolved`.
pub fn resolve(provider: &dyn LocationProvider) -> UserLocation {
    let outcome = provider.locate().and_then(|c| {
        if c.is_valid() {
            Ok(c)
        } else {
            Err(LocationError::OutOfRange {
                latitude: c.latitude,
                longitude: c.longitude,
            })
        }
    });

    match outcome {
        Ok(coordinates) => {
            let lat = coordinates.latitude.to_string();
            let lon = coordinates.longitude.to_string();
            log_event_with_fields(
                Event::LocationResolved,
                &[
                    ("provider", provider.name()),
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                ],
            );
            UserLocation::Resolved(coordinates)
        }
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(
                Event::LocationUnresolved,
                &[("provider", provider.name()), ("reason", reason.as_str())],
            );
            UserLocation::Unresolved
        }
    }
}

/// Coordinates supplied up front (config file or CLI flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Coordinates::new(latitude, longitude),
        }
    }
}

impl LocationProvider for FixedLocation {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn locate(&self) -> LocationResult<Coordinates> {
        Ok(self.coordinates)
    }
}

/// Offline mode: every lookup fails, so the run proceeds unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn name(&self) -> &'static str {
        "none"
    }

    fn locate(&self) -> LocationResult<Coordinates> {
        Err(LocationError::Unavailable)
    }
}

/// IP-based geolocation over a single blocking HTTP GET.
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    endpoint: String,
    timeout: Option<Duration>,
}

impl IpGeolocation {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl Default for IpGeolocation {
    fn default() -> Self {
        Self::new(DEFAULT_IP_ENDPOINT, None)
    }
}

impl LocationProvider for IpGeolocation {
    fn name(&self) -> &'static str {
        "ip"
    }

    fn locate(&self) -> LocationResult<Coordinates> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let body = client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?
            .error_for_status()?
            .text()?;

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
        parse_lookup(&value)
    }
}

/// Extracts coordinates from a geolocation response body.
///
/// Accepts ipinfo's `{"loc": "lat,lng"}`, `{"latitude": .., "longitude": ..}`
/// and `{"lat": .., "lon": ..}`.
pub fn parse_lookup(body: &Value) -> LocationResult<Coordinates> {
    if let Some(loc) = body.get("loc").and_then(Value::as_str) {
        let (lat, lon) = loc
            .split_once(',')
            .ok_or_else(|| LocationError::InvalidResponse(format!("bad loc '{}'", loc)))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| LocationError::InvalidResponse(format!("bad loc '{}'", loc)))
        };
        return Ok(Coordinates::new(parse(lat)?, parse(lon)?));
    }

    for (lat_key, lon_key) in [("latitude", "longitude"), ("lat", "lon")] {
        if let (Some(lat), Some(lon)) = (
            body.get(lat_key).and_then(Value::as_f64),
            body.get(lon_key).and_then(Value::as_f64),
        ) {
            return Ok(Coordinates::new(lat, lon));
        }
    }

    Err(LocationError::InvalidResponse(
        "no coordinates in response".to_string(),
    ))
}
