use crate::{
    core::{
        constants::{
            MARKER_FILL_OPACITY, MARKER_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT,
            MIN_VISIBLE_RADIUS,
        },
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType, PopupContent},
    symbology::Color,
};

/// Paint for a circle marker. Defaults are the earthquake marker style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    /// Stroke width in pixels
    pub weight: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
}

impl CircleStyle {
    pub fn filled(fill_color: Color) -> Self {
        Self {
            fill_color,
            ..Self::default()
        }
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            stroke_color: MARKER_STROKE_COLOR,
            weight: MARKER_STROKE_WEIGHT,
            opacity: MARKER_OPACITY,
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }
}

/// A fixed-pixel-radius circle at a geographic position.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub position: LatLng,
    /// Radius in pixels as computed from the data; may be zero or negative.
    pub radius: f64,
    pub style: CircleStyle,
    pub popup: PopupContent,
}

impl CircleMarker {
    pub fn new(position: LatLng, radius: f64, style: CircleStyle) -> Self {
        Self {
            position,
            radius,
            style,
            popup: PopupContent::default(),
        }
    }

    pub fn with_popup(mut self, popup: PopupContent) -> Self {
        self.popup = popup;
        self
    }

    /// Radius actually drawn: degenerate radii are floored so every
    /// earthquake stays visible and clickable.
    pub fn display_radius(&self) -> f32 {
        let radius = self.radius as f32;
        if radius.is_finite() {
            radius.max(MIN_VISIBLE_RADIUS)
        } else {
            MIN_VISIBLE_RADIUS
        }
    }

    /// Whether `pixel` lies on the drawn circle, stroke included.
    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> bool {
        let center = viewport.lat_lng_to_pixel(&self.position);
        let reach = (self.display_radius() + self.style.weight / 2.0) as f64;
        center.distance_to(pixel) <= reach
    }
}

/// Overlay holding one circle marker per earthquake.
pub struct MarkerLayer {
    properties: LayerProperties,
    markers: Vec<CircleMarker>,
}

impl MarkerLayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, markers: Vec<CircleMarker>) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::CircleMarkers),
            markers,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.properties.z_index = z_index;
        self
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }
}

impl LayerTrait for MarkerLayer {
    crate::impl_layer_trait!(properties);

    fn popup_at(&self, viewport: &Viewport, pixel: &Point) -> Option<(LatLng, PopupContent)> {
        // Later markers are drawn on top, so search from the end.
        self.markers
            .iter()
            .rev()
            .find(|m| m.hit_test(viewport, pixel))
            .map(|m| (m.position, m.popup.clone()))
    }

    fn feature_count(&self) -> usize {
        self.markers.len()
    }
}
