use crate::{
    core::{
        constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
        geo::{Point, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    prelude::{HashMap, HashSet},
    tiles::{
        cache::TileCache,
        loader::{TileLoader, TileResponse},
        source::{MapboxSource, TileSource},
    },
    MapError,
};
use crossbeam_channel::{Receiver, TryRecvError};
use std::sync::Arc;

/// Load at most this many new tiles per update so a big pan does not spawn
/// a burst of threads.
const MAX_LOAD_PER_CALL: usize = 8;

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileLayerOptions {
    /// Tile size in pixels
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Tiles kept around the visible area on every side.
    pub margin: u32,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: MIN_ZOOM as u8,
            max_zoom: MAX_ZOOM as u8,
            margin: 1,
        }
    }
}

/// A tile placed on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub coord: TileCoord,
    /// Top-left corner in container pixels.
    pub origin: Point,
    /// Edge length in pixels at the current (possibly fractional) zoom.
    pub size: f64,
}

/// One switchable base map backed by a Mapbox style.
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
    source: MapboxSource,
    cache: TileCache,
    loader: TileLoader,
    rx: Receiver<TileResponse>,
    loading: HashSet<TileCoord>,
    errors: HashMap<TileCoord, MapError>,
}

impl TileLayer {
    pub fn new(source: MapboxSource, cache: TileCache) -> Self {
        let style = source.style();
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            properties: LayerProperties::new(style.id(), style.display_name(), LayerType::Tile),
            options: TileLayerOptions {
                max_zoom: source.max_zoom(),
                ..TileLayerOptions::default()
            },
            source,
            cache,
            loader: TileLoader::new(tx),
            rx,
            loading: HashSet::default(),
            errors: HashMap::default(),
        }
    }

    pub fn source(&self) -> &MapboxSource {
        &self.source
    }

    pub fn attribution(&self) -> &str {
        self.source.attribution()
    }

    /// Integer zoom tiles are fetched at for the viewport's zoom.
    pub fn tile_zoom(&self, viewport: &Viewport) -> u8 {
        (viewport.zoom.round().max(0.0) as u8).clamp(self.options.min_zoom, self.options.max_zoom)
    }

    /// Tiles covering the viewport plus the configured margin, with their
    /// screen placement.
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<VisibleTile> {
        let zoom = self.tile_zoom(viewport);
        let tiles_per_axis = TileCoord::tiles_per_axis(zoom) as i64;
        let scale = 2_f64.powf(viewport.zoom - zoom as f64);
        let tile_px = self.options.tile_size as f64 * scale;
        let origin = viewport.pixel_origin();
        let margin = self.options.margin as i64;

        let min_x = ((origin.x / tile_px).floor() as i64 - margin).max(0);
        let max_x = (((origin.x + viewport.size.x) / tile_px).floor() as i64 + margin)
            .min(tiles_per_axis - 1);
        let min_y = ((origin.y / tile_px).floor() as i64 - margin).max(0);
        let max_y = (((origin.y + viewport.size.y) / tile_px).floor() as i64 + margin)
            .min(tiles_per_axis - 1);

        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                tiles.push(VisibleTile {
                    coord: TileCoord::new(x as u32, y as u32, zoom),
                    origin: Point::new(x as f64 * tile_px - origin.x, y as f64 * tile_px - origin.y),
                    size: tile_px,
                });
            }
        }
        tiles
    }

    /// Record a finished download.
    pub fn receive(&mut self, response: TileResponse) {
        if response.style != self.id() {
            return;
        }
        self.loading.remove(&response.coord);
        match response.data {
            Ok(data) => {
                self.errors.remove(&response.coord);
                self.cache.insert(self.source.style().id(), response.coord, data);
            }
            Err(err) => {
                log::debug!("tile {:?} marked as failed: {}", response.coord, err);
                self.errors.insert(response.coord, err);
            }
        }
    }

    /// Drains finished downloads and requests missing tiles for the
    /// viewport. Returns how many downloads were started.
    pub fn update_tiles(&mut self, viewport: &Viewport) -> usize {
        loop {
            match self.rx.try_recv() {
                Ok(response) => self.receive(response),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if !self.is_visible() {
            return 0;
        }

        let style = self.source.style().id();
        let mut started = 0;
        for tile in self.visible_tiles(viewport) {
            if started >= MAX_LOAD_PER_CALL {
                break;
            }
            let coord = tile.coord;
            if self.loading.contains(&coord)
                || self.errors.contains_key(&coord)
                || self.cache.contains(style, &coord)
            {
                continue;
            }
            self.loading.insert(coord);
            self.loader.start_download(style, &self.source, coord);
            started += 1;
        }
        started
    }

    /// Bytes of `coord`, or of the nearest cached ancestor. The returned
    /// coordinate tells which tile the bytes belong to.
    pub fn tile(&self, coord: TileCoord) -> Option<(TileCoord, Arc<Vec<u8>>)> {
        let style = self.source.style().id();
        let mut current = coord;
        loop {
            if let Some(data) = self.cache.get(style, &current) {
                return Some((current, data));
            }
            if current.z == 0 {
                return None;
            }
            current = TileCoord::new(current.x / 2, current.y / 2, current.z - 1);
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.loading.is_empty()
    }

    pub fn failed_tiles(&self) -> usize {
        self.errors.len()
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::tiles::source::MapboxStyle;

    fn layer() -> TileLayer {
        TileLayer::new(MapboxSource::new(MapboxStyle::Streets, "pk.test"), TileCache::new(16))
    }

    #[test]
    fn test_tile_layer_creation() {
        let layer = layer();
        assert_eq!(layer.id(), "mapbox.streets");
        assert_eq!(layer.name(), "Street Map");
        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert!(layer.attribution().contains("Mapbox"));
    }

    #[test]
    fn test_visible_tiles_world_view() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 0.0, Point::new(256.0, 256.0));
        let tiles = layer().visible_tiles(&viewport);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].coord, TileCoord::new(0, 0, 0));
        assert_eq!(tiles[0].origin, Point::new(0.0, 0.0));
        assert_eq!(tiles[0].size, 256.0);
    }

    #[test]
    fn test_visible_tiles_with_margin() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(400.0, 400.0));
        let tiles = layer().visible_tiles(&viewport);
        // Pixel origin is (824, 824): columns 3..=4 plus one on each side.
        assert_eq!(tiles.len(), 16);
        assert!(tiles.iter().all(|t| t.coord.z == 3));
        assert!(tiles.iter().all(|t| (2..=5).contains(&t.coord.x)));
        let first = tiles[0];
        assert_eq!(first.coord, TileCoord::new(2, 2, 3));
        assert_eq!(first.origin, Point::new(512.0 - 824.0, 512.0 - 824.0));
    }

    #[test]
    fn test_receive_and_parent_fallback() {
        let mut layer = layer();
        let parent = TileCoord::new(1, 1, 2);
        layer.receive(TileResponse {
            style: "mapbox.streets".to_string(),
            coord: parent,
            data: Ok(vec![7]),
        });
        layer.receive(TileResponse {
            style: "mapbox.dark".to_string(),
            coord: TileCoord::new(2, 2, 3),
            data: Ok(vec![9]),
        });

        let (found, data) = layer.tile(TileCoord::new(2, 3, 3)).unwrap();
        assert_eq!(found, parent);
        assert_eq!(*data, vec![7]);
        assert!(layer.tile(TileCoord::new(0, 0, 3)).is_none());
    }

    #[test]
    fn test_failed_tiles_are_not_retried() {
        let mut layer = layer();
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 0.0, Point::new(256.0, 256.0));
        layer.receive(TileResponse {
            style: "mapbox.streets".to_string(),
            coord: TileCoord::new(0, 0, 0),
            data: Err(MapError::Tile("HTTP 401".to_string())),
        });
        assert_eq!(layer.failed_tiles(), 1);
        assert_eq!(layer.update_tiles(&viewport), 0);
        assert!(!layer.is_loading());
    }

    #[test]
    fn test_hidden_layer_requests_nothing() {
        let mut layer = layer();
        layer.set_visible(false);
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 2.0, Point::new(256.0, 256.0));
        assert_eq!(layer.update_tiles(&viewport), 0);
    }
}
