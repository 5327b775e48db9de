use crate::{
    core::{
        constants::{BOUNDARY_COLOR, BOUNDARY_HIT_TOLERANCE, BOUNDARY_WEIGHT},
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType, PopupContent},
    symbology::Color,
};

use serde::{Deserialize, Serialize};

/// Style for stroked line features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub weight: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: BOUNDARY_COLOR,
            weight: BOUNDARY_WEIGHT,
            opacity: 1.0,
        }
    }
}

/// One plate outline: every ring or line of its geometry, stroked with the
/// same style and sharing one popup.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryOverlay {
    pub paths: Vec<Vec<LatLng>>,
    pub style: LineStyle,
    pub popup: PopupContent,
}

impl BoundaryOverlay {
    pub fn new(paths: Vec<Vec<LatLng>>) -> Self {
        Self {
            paths,
            style: LineStyle::default(),
            popup: PopupContent::default(),
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_popup(mut self, popup: PopupContent) -> Self {
        self.popup = popup;
        self
    }

    /// Paths projected to container pixels.
    pub fn screen_paths(&self, viewport: &Viewport) -> Vec<Vec<Point>> {
        self.paths
            .iter()
            .map(|path| path.iter().map(|p| viewport.lat_lng_to_pixel(p)).collect())
            .collect()
    }

    /// Whether `pixel` is within the hit tolerance of any stroked segment.
    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> bool {
        let tolerance = BOUNDARY_HIT_TOLERANCE.max(self.style.weight as f64 / 2.0);
        self.screen_paths(viewport).iter().any(|path| {
            path.windows(2)
                .any(|seg| pixel.distance_to_segment(&seg[0], &seg[1]) <= tolerance)
        })
    }
}

/// Overlay holding the plate boundary outlines. Stroke only, never filled.
pub struct BoundaryLayer {
    properties: LayerProperties,
    boundaries: Vec<BoundaryOverlay>,
}

impl BoundaryLayer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        boundaries: Vec<BoundaryOverlay>,
    ) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Boundaries),
            boundaries,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.properties.z_index = z_index;
        self
    }

    pub fn boundaries(&self) -> &[BoundaryOverlay] {
        &self.boundaries
    }
}

impl LayerTrait for BoundaryLayer {
    crate::impl_layer_trait!(properties);

    fn popup_at(&self, viewport: &Viewport, pixel: &Point) -> Option<(LatLng, PopupContent)> {
        let hit = self
            .boundaries
            .iter()
            .rev()
            .find(|b| b.hit_test(viewport, pixel))?;
        Some((viewport.pixel_to_lat_lng(pixel), hit.popup.clone()))
    }

    fn feature_count(&self) -> usize {
        self.boundaries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(400.0, 400.0))
    }

    fn equator_line() -> BoundaryOverlay {
        BoundaryOverlay::new(vec![vec![LatLng::new(0.0, -10.0), LatLng::new(0.0, 10.0)]])
            .with_popup(PopupContent::new("Pacific Plate"))
    }

    #[test]
    fn test_default_line_style() {
        let style = LineStyle::default();
        assert_eq!(style.color.to_hex(), "#3388ff");
        assert_eq!(style.weight, 3.0);
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn test_boundary_hit_test() {
        let vp = viewport();
        let line = equator_line();
        assert!(line.hit_test(&vp, &Point::new(200.0, 200.0)));
        assert!(line.hit_test(&vp, &Point::new(200.0, 203.0)));
        assert!(!line.hit_test(&vp, &Point::new(200.0, 220.0)));
    }

    #[test]
    fn test_layer_popup() {
        let vp = viewport();
        let layer = BoundaryLayer::new("plates", "Plates", vec![equator_line()]);

        let (_, popup) = layer.popup_at(&vp, &Point::new(210.0, 201.0)).unwrap();
        assert_eq!(popup.title, "Pacific Plate");
        assert!(layer.popup_at(&vp, &Point::new(10.0, 10.0)).is_none());

        assert_eq!(layer.feature_count(), 1);
        assert_eq!(layer.layer_type(), LayerType::Boundaries);
    }
}
