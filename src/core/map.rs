use crate::{
    core::{
        config::QuakeMapConfig,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    data::conversion::{encode_earthquakes, encode_plates},
    feeds::FeedBundle,
    layers::{
        base::PopupContent,
        manager::LayerManager,
        marker::MarkerLayer,
        tile::TileLayer,
        vector::BoundaryLayer,
    },
    symbology::{build_legend, LegendEntry},
    tiles::{
        cache::TileCache,
        source::{MapboxSource, MapboxStyle},
    },
    MapError, Result,
};

pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";
pub const PLATES_OVERLAY: &str = "Plates";

/// Corner of the map a control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible message shown over the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// The assembled earthquake map: view state, base layers, overlays,
/// controls and status messages.
pub struct QuakeMap {
    pub viewport: Viewport,
    layers: LayerManager,
    legend: Vec<LegendEntry>,
    /// Corner of the layer control. The control is always expanded.
    pub layer_control_position: ControlPosition,
    pub legend_position: ControlPosition,
    status: Vec<StatusMessage>,
}

impl QuakeMap {
    /// A map with its four base layers and no overlays yet.
    pub fn new(config: &QuakeMapConfig) -> Self {
        let cache = TileCache::new(config.tile_cache_size);
        let mut layers = LayerManager::new();
        for style in MapboxStyle::ALL {
            let source = MapboxSource::new(style, config.access_token.clone())
                .with_url_template(config.tile_url_template.clone());
            layers.add_base_layer(TileLayer::new(source, cache.clone()));
        }
        if let Err(err) = layers.select_base_layer(config.default_base_layer.display_name()) {
            log::warn!("{}", err);
        }

        Self {
            viewport: Viewport::new(config.center, config.zoom, Point::new(800.0, 600.0)),
            layers,
            legend: build_legend(),
            layer_control_position: ControlPosition::TopRight,
            legend_position: ControlPosition::BottomRight,
            status: Vec::new(),
        }
    }

    /// Builds the complete map from both loaded feeds.
    pub fn assemble(config: &QuakeMapConfig, feeds: &FeedBundle) -> Result<Self> {
        let mut map = Self::new(config);
        map.attach_feeds(feeds)?;
        Ok(map)
    }

    /// A map without overlays that shows why the feeds could not be loaded.
    pub fn with_load_error(config: &QuakeMapConfig, err: &MapError) -> Self {
        let mut map = Self::new(config);
        map.push_status(StatusMessage::error(err.to_string()));
        map
    }

    /// Encodes both feeds and adds the "Earthquakes" and "Plates" overlays,
    /// both visible and listed in that order. Plates are drawn first so
    /// markers stay on top. Features that cannot be encoded are skipped and
    /// counted in a warning.
    pub fn attach_feeds(&mut self, feeds: &FeedBundle) -> Result<()> {
        let quakes = encode_earthquakes(&feeds.earthquakes);
        let plates = encode_plates(&feeds.plates);
        log::info!(
            "encoded {} earthquakes and {} plates",
            quakes.items.len(),
            plates.items.len()
        );

        if !quakes.is_complete() {
            self.push_status(StatusMessage::warning(format!(
                "Skipped {} of {} earthquakes with missing data",
                quakes.skipped.len(),
                feeds.earthquakes.len()
            )));
        }
        if !plates.is_complete() {
            self.push_status(StatusMessage::warning(format!(
                "Skipped {} of {} plates with missing data",
                plates.skipped.len(),
                feeds.plates.len()
            )));
        }

        self.layers.add_overlay(Box::new(
            MarkerLayer::new("earthquakes", EARTHQUAKES_OVERLAY, quakes.items).with_z_index(1),
        ))?;
        self.layers.add_overlay(Box::new(
            BoundaryLayer::new("plates", PLATES_OVERLAY, plates.items).with_z_index(0),
        ))?;

        self.status.retain(|m| m.level != StatusLevel::Info);
        Ok(())
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn select_base_layer(&mut self, name: &str) -> Result<()> {
        self.layers.select_base_layer(name)
    }

    pub fn set_overlay_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        self.layers.set_overlay_visible(name, visible)
    }

    pub fn earthquakes(&self) -> Option<&MarkerLayer> {
        self.layers.overlay_as::<MarkerLayer>(EARTHQUAKES_OVERLAY)
    }

    pub fn plates(&self) -> Option<&BoundaryLayer> {
        self.layers.overlay_as::<BoundaryLayer>(PLATES_OVERLAY)
    }

    pub fn set_viewport_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    /// Moves the content by `delta` pixels.
    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan_by(delta);
    }

    /// Zooms about the viewport center. The result is clamped to [0, 18].
    pub fn zoom_by(&mut self, delta: f64) {
        let center = Point::new(self.viewport.size.x / 2.0, self.viewport.size.y / 2.0);
        self.viewport.zoom_around(delta, center);
    }

    /// Zooms keeping the point under `anchor` fixed.
    pub fn zoom_around(&mut self, delta: f64, anchor: Point) {
        self.viewport.zoom_around(delta, anchor);
    }

    /// Popup for a click at `pixel`: markers are tested before plate
    /// boundaries, hidden overlays are ignored.
    pub fn popup_at(&self, pixel: &Point) -> Option<(LatLng, PopupContent)> {
        self.layers.popup_at(&self.viewport, pixel)
    }

    /// Requests tiles for the current view. Returns the number of downloads
    /// started.
    pub fn update_tiles(&mut self) -> usize {
        let viewport = self.viewport.clone();
        self.layers.update_tiles(&viewport)
    }

    pub fn attribution(&self) -> &str {
        self.layers
            .active_base_layer()
            .map(|layer| layer.attribution())
            .unwrap_or("")
    }

    pub fn push_status(&mut self, message: StatusMessage) {
        match message.level {
            StatusLevel::Error => log::error!("{}", message.text),
            StatusLevel::Warning => log::warn!("{}", message.text),
            StatusLevel::Info => log::info!("{}", message.text),
        }
        self.status.push(message);
    }

    pub fn status(&self) -> &[StatusMessage] {
        &self.status
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }
}
