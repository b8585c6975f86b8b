//! Observable events for a reactorwatch run.
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded (or defaults applied)
    ConfigLoaded,

    // Dataset
    /// Dataset parsed into reactor records
    DatasetLoaded,
    /// Dataset rejected at load time
    DatasetRejected,

    // Location
    /// User location resolved by the provider
    LocationResolved,
    /// Provider failed, continuing with an unresolved location
    LocationUnresolved,

    // Engine
    /// Proximity computed for every reactor
    ProximityComputed,
    /// At least one reactor within threshold
    AlertRaised,
    /// No reactor within threshold
    SafeZone,

    // Notifications
    /// Notification handed to the sink
    NotificationSent,
    /// Notification sink failed (non-fatal)
    NotificationFailed,

    // Output
    /// Map layer written to disk
    MapWritten,

    // Server
    /// HTTP server ready for requests
    Serving,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::DatasetRejected => "DATASET_REJECTED",
            Event::LocationResolved => "LOCATION_RESOLVED",
            Event::LocationUnresolved => "LOCATION_UNRESOLVED",
            Event::ProximityComputed => "PROXIMITY_COMPUTED",
            Event::AlertRaised => "PROXIMITY_ALERT",
            Event::SafeZone => "SAFE_ZONE",
            Event::NotificationSent => "NOTIFICATION_SENT",
            Event::NotificationFailed => "NOTIFICATION_FAILED",
            Event::MapWritten => "MAP_WRITTEN",
            Event::Serving => "REACTORWATCH_SERVING",
        }
    }

    /// Returns true if this event is logged at WARN: a degraded lookup or
    /// delivery, or a raised proximity alert
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Event::LocationUnresolved | Event::NotificationFailed | Event::AlertRaised
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
