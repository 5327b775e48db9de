pub mod conversion;
pub mod geojson;

pub use conversion::{
    earthquake_marker, encode_earthquakes, encode_plates, format_timestamp, plate_overlay,
    Encoded,
};
pub use geojson::{EarthquakeFeature, GeoJson, GeoJsonFeature, GeoJsonGeometry, PlateFeature};
