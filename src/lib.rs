//! # quakemap
//!
//! Earthquake and tectonic plate map viewer.
//!
//! The crate fetches an earthquake GeoJSON feed and a plate-boundary GeoJSON
//! feed, encodes every earthquake as a circle marker sized and colored by
//! magnitude, and assembles an interactive map with switchable base tile
//! layers, toggleable overlays and a magnitude legend.

pub mod core;
pub mod data;
pub mod feeds;
pub mod layers;
pub mod prelude;
pub mod symbology;
pub mod tiles;

#[cfg(feature = "egui")]
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::QuakeMapConfig,
    geo::{LatLng, Point, TileCoord},
    map::{QuakeMap, StatusLevel, StatusMessage},
    viewport::Viewport,
};

pub use crate::data::{
    conversion::{earthquake_marker, encode_earthquakes, encode_plates, plate_overlay},
    geojson::{EarthquakeFeature, GeoJson, GeoJsonFeature, GeoJsonGeometry, PlateFeature},
};

pub use crate::feeds::{source::FeedSource, FeedBundle};

#[cfg(feature = "tokio-runtime")]
pub use crate::feeds::loader::FeedLoader;

pub use crate::layers::{
    manager::LayerManager,
    marker::{CircleMarker, MarkerLayer},
    tile::TileLayer,
    vector::{BoundaryLayer, BoundaryOverlay},
};

pub use crate::tiles::{MapboxSource, MapboxStyle, TileCache};

pub use crate::symbology::{
    build_legend, color_for_magnitude, marker_size, Color, LegendEntry, MAGNITUDE_SCALE,
};

#[cfg(feature = "egui")]
pub use crate::ui::widget::QuakeMapWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors surfaced while loading feeds and building the map.
///
/// Every variant carries a human-readable message so it can be shown on the
/// map as well as logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Network failure, HTTP error status, timeout or unreadable local file.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Malformed GeoJSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A feature is missing a property or geometry it needs to be drawn.
    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Tile error: {0}")]
    Tile(String),
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MapError::Fetch(format!("request timed out: {}", err))
        } else {
            MapError::Fetch(err.to_string())
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        MapError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Parse(err.to_string())
    }
}

/// Error type alias for convenience
pub type Error = MapError;
