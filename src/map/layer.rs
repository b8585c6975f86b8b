//! GeoJSON map layer: one circle per reactor plus the user marker

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::location::UserLocation;
use crate::pipeline::Analysis;
use crate::safety::Color;

/// Circle radius drawn around each reactor
pub const DEFAULT_CIRCLE_RADIUS_M: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    /// GeoJSON order: [longitude, latitude]
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: "Point",
            coordinates: [longitude, latitude],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureProperties {
    Reactor {
        tooltip: String,
        color: Color,
        fill: bool,
        fill_color: Color,
        fill_opacity: f64,
        radius_m: f64,
    },
    User {
        resolved: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: FeatureProperties,
}

impl Feature {
    fn new(geometry: PointGeometry, properties: FeatureProperties) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

/// GeoJSON `FeatureCollection` consumed by the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

impl MapLayer {
    /// Reactor circles in analysis order, then the user marker.
    pub fn from_analysis(analysis: &Analysis, circle_radius_m: f64) -> Self {
        let mut features: Vec<Feature> = analysis
            .reactors
            .iter()
            .map(|r| {
                Feature::new(
                    PointGeometry::new(r.latitude, r.longitude),
                    FeatureProperties::Reactor {
                        tooltip: r.name.clone(),
                        color: r.color,
                        fill: true,
                        fill_color: r.color,
                        fill_opacity: 1.0,
                        radius_m: circle_radius_m,
                    },
                )
            })
            .collect();

        features.push(user_marker(&analysis.location));

        Self {
            kind: "FeatureCollection",
            features,
        }
    }

    /// The map is centred on the user (or the origin when unresolved).
    pub fn center(&self) -> Option<[f64; 2]> {
        self.features
            .iter()
            .find(|f| matches!(f.properties, FeatureProperties::User { .. }))
            .map(|f| f.geometry.coordinates)
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)
    }
}

fn user_marker(location: &UserLocation) -> Feature {
    let point = location.render_point();
    Feature::new(
        PointGeometry::new(point.latitude, point.longitude),
        FeatureProperties::User {
            resolved: location.is_resolved(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ReactorRecord;
    use crate::pipeline::Analyzer;

    fn analysis(user: UserLocation) -> Analysis {
        Analyzer::default().analyze(
            &user,
            &[
                ReactorRecord::new("Tarapur", 19.83, 72.66, Some(54.0)),
                ReactorRecord::new("Unknown age", 21.0, 73.0, None),
            ],
        )
    }

    #[test]
    fn test_one_feature_per_reactor_plus_user() {
        let layer = MapLayer::from_analysis(&analysis(UserLocation::resolved(19.0, 72.0)), 10_000.0);
        assert_eq!(layer.features.len(), 3);
        assert_eq!(layer.center(), Some([72.0, 19.0]));
    }

    #[test]
    fn test_unresolved_user_at_origin() {
        let layer = MapLayer::from_analysis(&analysis(UserLocation::Unresolved), 10_000.0);
        assert_eq!(layer.center(), Some([0.0, 0.0]));
    }

    #[test]
    fn test_geojson_shape() {
        let layer = MapLayer::from_analysis(&analysis(UserLocation::Unresolved), 2_500.0);
        let json = serde_json::to_value(&layer).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        let first = &json["features"][0];
        assert_eq!(first["type"], "Feature");
        assert_eq!(first["geometry"]["type"], "Point");
        assert_eq!(first["geometry"]["coordinates"][0], 72.66);
        assert_eq!(first["properties"]["kind"], "reactor");
        assert_eq!(first["properties"]["tooltip"], "Tarapur");
        assert_eq!(first["properties"]["color"], "purple");
        assert_eq!(first["properties"]["radius_m"], 2500.0);

        // missing age is Unknown, drawn in the fallback color
        assert_eq!(json["features"][1]["properties"]["color"], "blue");
        assert_eq!(json["features"][2]["properties"]["kind"], "user");
        assert_eq!(json["features"][2]["properties"]["resolved"], false);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.geojson");
        MapLayer::from_analysis(&analysis(UserLocation::Unresolved), 10_000.0)
            .write_to(&path)
            .unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["features"].as_array().unwrap().len(), 3);
    }
}
