//! Proximity engine
//!
//! Pure function of (user location, reactors, threshold). No short-circuiting:
//! every reactor gets a result because every reactor is also rendered.

mod engine;

pub use engine::{
    compute_proximity, geodesic_distance_km, ProximityEngine, ProximityResult,
    DEFAULT_THRESHOLD_KM,
};
