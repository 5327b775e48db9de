//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    config::QuakeMapConfig,
    geo::{LatLng, Point, TileCoord},
    map::{ControlPosition, QuakeMap, StatusLevel, StatusMessage},
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerTrait, PopupContent},
    manager::LayerManager,
    marker::{CircleMarker, MarkerLayer},
    tile::TileLayer,
    vector::{BoundaryLayer, BoundaryOverlay},
};

pub use crate::data::{
    conversion::{encode_earthquakes, encode_plates},
    geojson::{EarthquakeFeature, GeoJson, GeoJsonFeature, PlateFeature},
};

pub use crate::feeds::{FeedBundle, FeedSource};

#[cfg(feature = "tokio-runtime")]
pub use crate::feeds::FeedLoader;

pub use crate::symbology::{build_legend, color_for_magnitude, marker_size, Color, LegendEntry};

pub use crate::tiles::{MapboxSource, MapboxStyle, TileCache, TileSource};

#[cfg(feature = "egui")]
pub use crate::ui::{style::MapStyle, widget::QuakeMapWidget, UiQuakeMapExt};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
