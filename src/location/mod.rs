//! User location resolution
//!
//! The lookup is an injected capability (`LocationProvider`). `resolve` never
//! fails: any provider error becomes `UserLocation::Unresolved`, which is a
//! terminal value for the rest of the run and renders at (0, 0).

mod provider;
mod types;

pub use provider::{
    parse_lookup, resolve, FixedLocation, IpGeolocation, LocationError, LocationProvider,
    LocationResult, NoLocation, DEFAULT_IP_ENDPOINT,
};
pub use types::{Coordinates, UserLocation};
