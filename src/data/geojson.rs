use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// A GeoJSON position: `[lng, lat]` with an optional elevation/depth.
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl FromStr for GeoJson {
    type Err = MapError;

    fn from_str(geojson_str: &str) -> Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| MapError::Parse(format!("Invalid GeoJSON: {}", e)))
    }
}

impl GeoJson {
    /// Parses GeoJSON from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| MapError::Parse(format!("Invalid GeoJSON: {}", e)))
    }

    pub fn features(&self) -> &[GeoJsonFeature] {
        match self {
            GeoJson::Feature(feature) => std::slice::from_ref(feature),
            GeoJson::FeatureCollection { features } => features,
        }
    }

    pub fn len(&self) -> usize {
        self.features().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features().is_empty()
    }
}

impl GeoJsonFeature {
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref()?.get(key)
    }

    /// Human-readable handle for log and error messages.
    fn describe(&self) -> String {
        match &self.id {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => "<no id>".to_string(),
        }
    }

    fn required_f64(&self, key: &str) -> Result<f64> {
        self.property(key)
            .and_then(serde_json::Value::as_f64)
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.missing(key, "a number"))
    }

    fn required_i64(&self, key: &str) -> Result<i64> {
        let value = self.property(key);
        value
            .and_then(serde_json::Value::as_i64)
            .or_else(|| {
                value
                    .and_then(serde_json::Value::as_f64)
                    .filter(|v| v.is_finite())
                    .map(|v| v as i64)
            })
            .ok_or_else(|| self.missing(key, "an integer"))
    }

    fn required_str(&self, key: &str) -> Result<String> {
        self.property(key)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.missing(key, "a string"))
    }

    fn missing(&self, key: &str, expected: &str) -> MapError {
        MapError::Render(format!(
            "feature {}: property `{}` is missing or not {}",
            self.describe(),
            key,
            expected
        ))
    }
}

/// One earthquake from the USGS summary feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFeature {
    pub magnitude: f64,
    pub place: String,
    /// Origin time, milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    pub coordinates: LatLng,
    /// Third ordinate of the point, when present.
    pub depth_km: Option<f64>,
}

impl TryFrom<&GeoJsonFeature> for EarthquakeFeature {
    type Error = MapError;

    fn try_from(feature: &GeoJsonFeature) -> Result<Self> {
        let position = match &feature.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => coordinates,
            _ => {
                return Err(MapError::Render(format!(
                    "feature {}: earthquake geometry must be a Point",
                    feature.describe()
                )))
            }
        };

        let coordinates = LatLng::from_position(position).ok_or_else(|| {
            MapError::Render(format!(
                "feature {}: point has fewer than two ordinates",
                feature.describe()
            ))
        })?;

        Ok(Self {
            magnitude: feature.required_f64("mag")?,
            place: feature.required_str("place")?,
            timestamp_millis: feature.required_i64("time")?,
            coordinates,
            depth_km: position.get(2).copied(),
        })
    }
}

/// One plate from the PB2002 plate model.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateFeature {
    pub plate_name: String,
    pub boundary: GeoJsonGeometry,
}

impl TryFrom<&GeoJsonFeature> for PlateFeature {
    type Error = MapError;

    fn try_from(feature: &GeoJsonFeature) -> Result<Self> {
        let boundary = feature.geometry.clone().ok_or_else(|| {
            MapError::Render(format!("feature {}: plate has no geometry", feature.describe()))
        })?;

        Ok(Self {
            plate_name: feature.required_str("PlateName")?,
            boundary,
        })
    }
}

impl GeoJsonGeometry {
    /// Every line to stroke for this geometry: line strings as-is and
    /// polygon rings (exterior and holes). Points contribute nothing.
    pub fn paths(&self) -> Vec<Vec<LatLng>> {
        fn line(positions: &[Position]) -> Vec<LatLng> {
            positions
                .iter()
                .filter_map(|p| LatLng::from_position(p))
                .collect()
        }

        match self {
            GeoJsonGeometry::Point { .. } | GeoJsonGeometry::MultiPoint { .. } => Vec::new(),
            GeoJsonGeometry::LineString { coordinates } => vec![line(coordinates)],
            GeoJsonGeometry::Polygon { coordinates }
            | GeoJsonGeometry::MultiLineString { coordinates } => {
                coordinates.iter().map(|ring| line(ring)).collect()
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter().map(|ring| line(ring)))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(GeoJsonGeometry::paths).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> GeoJsonFeature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_usgs_collection_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "metadata": {"generated": 1700000000000, "title": "USGS All Earthquakes, Past Week"},
            "features": [
                {
                    "type": "Feature",
                    "properties": {"mag": 1.2, "place": "5km SW of Nowhere", "time": 1700000000000},
                    "geometry": {"type": "Point", "coordinates": [-117.5, 35.7, 8.2]},
                    "id": "ci123"
                }
            ],
            "bbox": [-180, -90, 0, 180, 90, 700]
        }
        "#;

        let geojson: GeoJson = geojson_str.parse().unwrap();
        assert_eq!(geojson.len(), 1);

        let quake = EarthquakeFeature::try_from(&geojson.features()[0]).unwrap();
        assert_eq!(quake.magnitude, 1.2);
        assert_eq!(quake.coordinates, LatLng::new(35.7, -117.5));
        assert_eq!(quake.depth_km, Some(8.2));
        assert_eq!(quake.timestamp_millis, 1_700_000_000_000);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = "{\"type\": \"FeatureCollection\", \"features\": [".parse::<GeoJson>();
        assert!(matches!(err, Err(MapError::Parse(_))));

        let err = GeoJson::from_slice(br#"{"type": "Topology"}"#);
        assert!(matches!(err, Err(MapError::Parse(_))));
    }

    #[test]
    fn test_null_magnitude_is_render_error() {
        let f = feature(json!({
            "type": "Feature",
            "id": "ak0001",
            "properties": {"mag": null, "place": "Alaska", "time": 1},
            "geometry": {"type": "Point", "coordinates": [-150.0, 61.0]}
        }));
        match EarthquakeFeature::try_from(&f) {
            Err(MapError::Render(msg)) => {
                assert!(msg.contains("mag"));
                assert!(msg.contains("ak0001"));
            }
            other => panic!("expected render error, got {:?}", other),
        }
    }

    #[test]
    fn test_earthquake_requires_point() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"mag": 2.0, "place": "x", "time": 1},
            "geometry": null
        }));
        assert!(matches!(EarthquakeFeature::try_from(&f), Err(MapError::Render(_))));
    }

    #[test]
    fn test_plate_feature() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"LAYER": "plate", "Code": "PA", "PlateName": "Pacific"},
            "geometry": {"type": "Polygon", "coordinates": [[[-180.0, -65.0], [-170.0, -60.0], [-175.0, -50.0], [-180.0, -65.0]]]}
        }));
        let plate = PlateFeature::try_from(&f).unwrap();
        assert_eq!(plate.plate_name, "Pacific");
        assert_eq!(plate.boundary.paths().len(), 1);
        assert_eq!(plate.boundary.paths()[0].len(), 4);

        let nameless = feature(json!({
            "type": "Feature",
            "properties": {"Code": "PA"},
            "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
        }));
        assert!(matches!(PlateFeature::try_from(&nameless), Err(MapError::Render(_))));
    }

    #[test]
    fn test_paths_per_geometry() {
        let multi = GeoJsonGeometry::MultiPolygon {
            coordinates: vec![
                vec![vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 0.0]]],
                vec![
                    vec![vec![5.0, 5.0], vec![6.0, 5.0], vec![5.0, 5.0]],
                    vec![vec![5.2, 5.1], vec![5.3, 5.1], vec![5.2, 5.1]],
                ],
            ],
        };
        assert_eq!(multi.paths().len(), 3);

        let point = GeoJsonGeometry::Point {
            coordinates: vec![10.0, 20.0],
        };
        assert!(point.paths().is_empty());
    }
}
