//! User location types

use serde::{Deserialize, Serialize};

use crate::dataset::{LATITUDE_RANGE, LONGITUDE_RANGE};

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Render origin used in place of an unresolved location
    pub const ORIGIN: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&self.latitude)
            && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&self.longitude)
    }
}

/// The caller's location for one run. Resolved once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UserLocation {
    Resolved(Coordinates),
    Unresolved,
}

impl UserLocation {
    pub fn resolved(latitude: f64, longitude: f64) -> Self {
        UserLocation::Resolved(Coordinates::new(latitude, longitude))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, UserLocation::Resolved(_))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            UserLocation::Resolved(c) => Some(*c),
            UserLocation::Unresolved => None,
        }
    }

    /// Where the user marker is drawn: the resolved point, or (0, 0).
    pub fn render_point(&self) -> Coordinates {
        self.coordinates().unwrap_or(Coordinates::ORIGIN)
    }
}
