//! Engine-wide defaults, most of them mirroring Leaflet's.

use crate::symbology::Color;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom range supported by the tile provider.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Initial view: the continental United States at zoom 3.
pub const DEFAULT_CENTER: (f64, f64) = (37.09, -95.71);
pub const DEFAULT_ZOOM: f64 = 3.0;

/// Weekly USGS summary of all earthquakes.
pub const USGS_ALL_WEEK_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Bird (2003) plate boundary model shipped alongside the app.
pub const DEFAULT_PLATES_PATH: &str = "static/js/PB2002_plates.json";

/// Earthquake circle marker stroke and opacities.
pub const MARKER_STROKE_COLOR: Color = Color::BLACK;
pub const MARKER_STROKE_WEIGHT: f32 = 1.0;
pub const MARKER_OPACITY: f32 = 1.0;
pub const MARKER_FILL_OPACITY: f32 = 0.8;

/// Smallest radius a circle marker is drawn with. Zero and negative
/// magnitudes are floored to this.
pub const MIN_VISIBLE_RADIUS: f32 = 1.0;

/// Leaflet's default path style, used for plate boundaries.
pub const BOUNDARY_COLOR: Color = Color::rgb(0x33, 0x88, 0xff);
pub const BOUNDARY_WEIGHT: f32 = 3.0;

/// How close (in pixels) a click must be to a boundary line to hit it.
pub const BOUNDARY_HIT_TOLERANCE: f64 = 4.0;

/// Default timeout for each feed request, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default number of tiles kept in memory.
pub const DEFAULT_TILE_CACHE_SIZE: usize = 512;
