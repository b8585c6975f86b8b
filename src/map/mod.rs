//! Map rendering primitives
//!
//! The engine does not draw maps. It emits a GeoJSON layer of circles and a
//! user marker, colored by safety tier, for whatever map widget sits on top.

mod layer;

pub use layer::{Feature, FeatureProperties, MapLayer, PointGeometry, DEFAULT_CIRCLE_RADIUS_M};
