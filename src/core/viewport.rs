use crate::core::{
    constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The current view of the map: center, zoom, and screen dimensions.
///
/// All pixel coordinates produced here are relative to the top-left corner of
/// the viewport (container coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center: LatLng::new(LatLng::clamp_lat(center.lat), center.lng),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), LatLng::wrap_lng(center.lng));
    }

    /// Sets the zoom level, clamping to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Width of the whole world in pixels at the current zoom.
    pub fn world_size(&self) -> f64 {
        TILE_SIZE as f64 * 2_f64.powf(self.zoom)
    }

    /// Web Mercator (EPSG:3857) projection to world pixel coordinates.
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let scale = self.world_size();
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * scale;
        Point::new(x, y)
    }

    /// Inverse of [`Viewport::project`].
    pub fn unproject(&self, pixel: &Point) -> LatLng {
        let scale = self.world_size();
        let lng = pixel.x / scale * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * pixel.y / scale);
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// World pixel coordinate of the viewport's top-left corner.
    pub fn pixel_origin(&self) -> Point {
        let center = self.project(&self.center);
        Point::new(center.x - self.size.x / 2.0, center.y - self.size.y / 2.0)
    }

    /// Converts a geographical coordinate to container pixel coordinates.
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng).subtract(&self.pixel_origin())
    }

    /// Converts container pixel coordinates back to a geographical coordinate.
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        self.unproject(&pixel.add(&self.pixel_origin()))
    }

    /// Moves the view so the content follows a drag of `delta` pixels.
    pub fn pan_by(&mut self, delta: Point) {
        let center = self.project(&self.center).subtract(&delta);
        let world = self.world_size();
        let clamped = Point::new(center.x, center.y.clamp(0.0, world));
        self.set_center(self.unproject(&clamped));
    }

    /// Changes zoom by `delta`, keeping the geographic point under `anchor`
    /// (container pixels) fixed on screen.
    pub fn zoom_around(&mut self, delta: f64, anchor: Point) {
        let anchored = self.pixel_to_lat_lng(&anchor);
        self.set_zoom(self.zoom + delta);

        let projected = self.project(&anchored);
        let offset = Point::new(anchor.x - self.size.x / 2.0, anchor.y - self.size.y / 2.0);
        self.set_center(self.unproject(&projected.subtract(&offset)));
    }
}
