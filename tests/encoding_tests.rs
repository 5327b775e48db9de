//! End-to-end checks of feed encoding: magnitude scale, legend, markers and
//! plate outlines built from GeoJSON text.

use quakemap::{
    build_legend, color_for_magnitude, encode_earthquakes, encode_plates, marker_size, GeoJson,
    LatLng, MapError,
};

const QUAKES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "id": "us7000abcd",
     "properties": {"mag": 4.5, "place": "10km N of Testville", "time": 1700000000000},
     "geometry": {"type": "Point", "coordinates": [-120.5, 36.25, 8.0]}},
    {"type": "Feature", "id": "ak0001",
     "properties": {"mag": 0.0, "place": "Quiet Bay", "time": 0},
     "geometry": {"type": "Point", "coordinates": [-150.0, 61.0]}},
    {"type": "Feature", "id": "broken",
     "properties": {"place": "No magnitude", "time": 1700000000000},
     "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}
]}"#;

const PLATES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "properties": {"PlateName": "Pacific"},
     "geometry": {"type": "Polygon", "coordinates": [[[-170.0, -10.0], [-120.0, -10.0], [-120.0, 40.0], [-170.0, -10.0]]]}},
    {"type": "Feature", "properties": {"PlateName": "Nazca"},
     "geometry": {"type": "MultiLineString", "coordinates": [[[-90.0, 0.0], [-80.0, -10.0]], [[-85.0, -20.0], [-75.0, -30.0]]]}}
]}"#;

#[test]
fn test_scale_boundaries() {
    let cases = [
        (7.2, "#b10026"),
        (6.0, "#e31a1c"),
        (5.5, "#e31a1c"),
        (4.0, "#fd8d3c"),
        (3.1, "#fd8d3c"),
        (2.5, "#feb24c"),
        (1.5, "#f7fcb9"),
        (1.0, "#78c679"),
        (0.0, "#78c679"),
        (-0.5, "#238443"),
    ];
    for (magnitude, expected) in cases {
        assert_eq!(
            color_for_magnitude(magnitude).to_hex(),
            expected,
            "magnitude {}",
            magnitude
        );
    }
    assert_eq!(color_for_magnitude(f64::NAN).to_hex(), "#238443");
}

#[test]
fn test_each_breakpoint_is_exclusive_above_zero() {
    for breakpoint in 1..=6 {
        let b = breakpoint as f64;
        assert_eq!(color_for_magnitude(b), color_for_magnitude(b - 0.5));
        assert_ne!(color_for_magnitude(b), color_for_magnitude(b + 1e-9));
    }
    assert_eq!(color_for_magnitude(0.0), color_for_magnitude(1e-9));
    assert_ne!(color_for_magnitude(0.0), color_for_magnitude(-1e-9));
}

#[test]
fn test_marker_size_is_linear() {
    for magnitude in [-1.0, 0.0, 2.5, 4.5, 9.1] {
        assert_eq!(marker_size(magnitude), magnitude * 3.0);
    }
}

#[test]
fn test_legend_matches_scale() {
    let legend = build_legend();
    assert_eq!(legend.len(), 7);
    assert_eq!(legend[0].label, "0\u{2013}1");
    assert_eq!(legend[6].label, "6+");
    for entry in &legend {
        assert_eq!(entry.swatch_color, color_for_magnitude(entry.range_low + 1.0));
    }
}

#[test]
fn test_earthquake_markers() {
    let quakes: GeoJson = QUAKES.parse().unwrap();
    let encoded = encode_earthquakes(&quakes);

    assert_eq!(encoded.items.len(), 2);
    assert_eq!(encoded.skipped.len(), 1);
    assert!(matches!(encoded.skipped[0], MapError::Render(_)));

    let strong = &encoded.items[0];
    assert_eq!(strong.position, LatLng::new(36.25, -120.5));
    assert_eq!(strong.radius, marker_size(4.5));
    assert_eq!(strong.style.fill_color.to_hex(), "#fc432a");
    let popup = &strong.popup;
    assert_eq!(popup.title, "10km N of Testville");
    assert_eq!(popup.body.as_deref(), Some("Tue Nov 14 2023 22:13:20 UTC"));

    let quiet = &encoded.items[1];
    assert_eq!(quiet.radius, 0.0);
    assert!(quiet.display_radius() > 0.0);
    assert_eq!(
        quiet.popup.body.as_deref(),
        Some("Thu Jan 01 1970 00:00:00 UTC")
    );
}

#[test]
fn test_plate_overlays() {
    let plates: GeoJson = PLATES.parse().unwrap();
    let encoded = encode_plates(&plates);

    assert!(encoded.is_complete());
    assert_eq!(encoded.items.len(), 2);
    assert_eq!(encoded.items[0].popup.title, "Pacific");
    assert_eq!(encoded.items[0].paths.len(), 1);
    assert_eq!(encoded.items[0].paths[0].len(), 4);
    assert_eq!(encoded.items[1].popup.title, "Nazca");
    assert_eq!(encoded.items[1].paths.len(), 2);
}

#[test]
fn test_encoding_is_repeatable() {
    let quakes: GeoJson = QUAKES.parse().unwrap();
    let plates: GeoJson = PLATES.parse().unwrap();
    assert_eq!(encode_earthquakes(&quakes), encode_earthquakes(&quakes));
    assert_eq!(encode_plates(&plates), encode_plates(&plates));
}

#[test]
fn test_empty_collection() {
    let empty: GeoJson = r#"{"type": "FeatureCollection", "features": []}"#.parse().unwrap();
    let encoded = encode_earthquakes(&empty);
    assert!(encoded.items.is_empty());
    assert!(encoded.is_complete());
}
