pub mod base;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod tile;
pub mod vector;

pub use base::{LayerProperties, LayerTrait, LayerType, PopupContent};
pub use manager::LayerManager;
pub use marker::{CircleMarker, CircleStyle, MarkerLayer};
pub use tile::{TileLayer, TileLayerOptions, VisibleTile};
pub use vector::{BoundaryLayer, BoundaryOverlay, LineStyle};
