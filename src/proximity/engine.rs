//! Geodesic proximity between the user and every reactor

use geo::{GeodesicDistance, Point};
use serde::Serialize;

use crate::dataset::ReactorRecord;
use crate::location::{Coordinates, UserLocation};

/// Alert radius used when nothing else is configured
pub const DEFAULT_THRESHOLD_KM: f64 = 500.0;

/// Distance outcome for one reactor within one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult {
    pub reactor: ReactorRecord,
    pub distance_km: f64,
    pub within_threshold: bool,
}

/// WGS-84 ellipsoidal distance in kilometres (Karney's geodesic).
///
/// Identical points are exactly 0.
pub fn geodesic_distance_km(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }
    let a = Point::new(from.longitude, from.latitude);
    let b = Point::new(to.longitude, to.latitude);
    a.geodesic_distance(&b) / 1000.0
}

/// Computes one result per reactor, in input order.
///
/// Every reactor is evaluated regardless of its tier. Against an unresolved
/// location distances are measured from the (0, 0) render origin and nothing
/// is within threshold.
pub fn compute_proximity(
    user: &UserLocation,
    reactors: &[ReactorRecord],
    threshold_km: f64,
) -> Vec<ProximityResult> {
    let origin = user.render_point();
    let resolved = user.is_resolved();

    reactors
        .iter()
        .map(|reactor| {
            let distance_km = geodesic_distance_km(
                origin,
                Coordinates::new(reactor.latitude, reactor.longitude),
            );
            ProximityResult {
                reactor: reactor.clone(),
                distance_km,
                within_threshold: resolved && distance_km <= threshold_km,
            }
        })
        .collect()
}

/// Proximity engine bound to a threshold.
#[derive(Debug, Clone, Copy)]
pub struct ProximityEngine {
    threshold_km: f64,
}

impl ProximityEngine {
    pub fn new(threshold_km: f64) -> Self {
        Self { threshold_km }
    }

    pub fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    pub fn compute(&self, user: &UserLocation, reactors: &[ReactorRecord]) -> Vec<ProximityResult> {
        compute_proximity(user, reactors, self.threshold_km)
    }
}

impl Default for ProximityEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_KM)
    }
}
