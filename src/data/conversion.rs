//! Conversion of feed features into drawable map entities.
//!
//! Every function here is pure: the same input always yields the same
//! markers and overlays.

use crate::{
    data::geojson::{EarthquakeFeature, GeoJson, PlateFeature},
    layers::{
        base::PopupContent,
        marker::{CircleMarker, CircleStyle},
        vector::BoundaryOverlay,
    },
    symbology::{color_for_magnitude, marker_size},
    MapError, Result,
};
use chrono::{TimeZone, Utc};

/// Layout of the popup date line, e.g. `Tue Nov 14 2023 22:13:20 UTC`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

/// Formats epoch milliseconds as a UTC date string.
pub fn format_timestamp(millis: i64) -> Result<String> {
    let time = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| MapError::Render(format!("timestamp {} is out of range", millis)))?;
    Ok(time.format(TIMESTAMP_FORMAT).to_string())
}

/// Encodes one earthquake as a circle marker: radius and fill follow the
/// magnitude, the popup shows place and time.
pub fn earthquake_marker(quake: &EarthquakeFeature) -> Result<CircleMarker> {
    let popup = PopupContent::new(quake.place.clone())
        .with_body(format_timestamp(quake.timestamp_millis)?);

    Ok(CircleMarker::new(
        quake.coordinates,
        marker_size(quake.magnitude),
        CircleStyle::filled(color_for_magnitude(quake.magnitude)),
    )
    .with_popup(popup))
}

/// Encodes one plate as a stroked outline labelled with the plate name.
pub fn plate_overlay(plate: &PlateFeature) -> BoundaryOverlay {
    BoundaryOverlay::new(plate.boundary.paths())
        .with_popup(PopupContent::new(plate.plate_name.clone()))
}

/// Result of encoding a whole collection. Features that could not be
/// encoded are reported in `skipped`, in feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded<T> {
    pub items: Vec<T>,
    pub skipped: Vec<MapError>,
}

impl<T> Encoded<T> {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl<T> Default for Encoded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// One marker per earthquake feature, in feed order.
pub fn encode_earthquakes(collection: &GeoJson) -> Encoded<CircleMarker> {
    let mut encoded = Encoded::default();
    for feature in collection.features() {
        match EarthquakeFeature::try_from(feature).and_then(|quake| earthquake_marker(&quake)) {
            Ok(marker) => encoded.items.push(marker),
            Err(err) => {
                log::warn!("skipping earthquake: {}", err);
                encoded.skipped.push(err);
            }
        }
    }
    encoded
}

/// One boundary overlay per plate feature, in feed order.
pub fn encode_plates(collection: &GeoJson) -> Encoded<BoundaryOverlay> {
    let mut encoded = Encoded::default();
    for feature in collection.features() {
        match PlateFeature::try_from(feature) {
            Ok(plate) => encoded.items.push(plate_overlay(&plate)),
            Err(err) => {
                log::warn!("skipping plate: {}", err);
                encoded.skipped.push(err);
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, symbology::Color};

    fn quake(magnitude: f64) -> EarthquakeFeature {
        EarthquakeFeature {
            magnitude,
            place: "10km N of Testville".to_string(),
            timestamp_millis: 1_700_000_000_000,
            coordinates: LatLng::new(35.0, -118.0),
            depth_km: Some(8.0),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(1_700_000_000_000).unwrap(),
            "Tue Nov 14 2023 22:13:20 UTC"
        );
        assert_eq!(format_timestamp(0).unwrap(), "Thu Jan 01 1970 00:00:00 UTC");
        assert!(matches!(format_timestamp(i64::MAX), Err(MapError::Render(_))));
    }

    #[test]
    fn test_earthquake_marker() {
        let marker = earthquake_marker(&quake(4.5)).unwrap();
        assert_eq!(marker.position, LatLng::new(35.0, -118.0));
        assert_eq!(marker.radius, 13.5);
        assert_eq!(marker.style.fill_color, "#fc432a".parse::<Color>().unwrap());
        assert_eq!(marker.style.stroke_color, Color::BLACK);
        assert_eq!(marker.style.fill_opacity, 0.8);
        assert!(marker.popup.text().contains("Testville"));
        assert!(marker.popup.text().contains("2023"));
    }

    #[test]
    fn test_non_positive_magnitude_keeps_raw_radius() {
        let marker = earthquake_marker(&quake(-0.4)).unwrap();
        assert!((marker.radius + 1.2).abs() < 1e-9);
        assert_eq!(marker.style.fill_color.to_hex(), "#238443");
    }
}
