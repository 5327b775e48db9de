use crate::core::{
    geo::{LatLng, Point},
    viewport::Viewport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    CircleMarkers,
    Boundaries,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::CircleMarkers => write!(f, "circle-markers"),
            LayerType::Boundaries => write!(f, "boundaries"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    /// Name shown in the layer control.
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: impl Into<String>, name: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layer_type,
            z_index: 0,
            visible: true,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// Text bound to a feature, shown when it is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupContent {
    pub title: String,
    pub body: Option<String>,
}

impl PopupContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Title and body joined by a newline.
    pub fn text(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n{}", self.title, body),
            None => self.title.clone(),
        }
    }
}

/// Operations shared by every map layer.
pub trait LayerTrait: Send + Sync {
    fn properties(&self) -> &LayerProperties;
    fn properties_mut(&mut self) -> &mut LayerProperties;

    fn id(&self) -> &str {
        &self.properties().id
    }

    fn name(&self) -> &str {
        &self.properties().name
    }

    fn layer_type(&self) -> LayerType {
        self.properties().layer_type
    }

    fn z_index(&self) -> i32 {
        self.properties().z_index
    }

    fn is_visible(&self) -> bool {
        self.properties().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.properties_mut().visible = visible;
    }

    /// Popup of the topmost feature under `pixel` (container coordinates).
    fn popup_at(&self, _viewport: &Viewport, _pixel: &Point) -> Option<(LatLng, PopupContent)> {
        None
    }

    /// Number of drawable features in the layer.
    fn feature_count(&self) -> usize {
        0
    }

    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
