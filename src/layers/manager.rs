use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::{
        base::{LayerTrait, PopupContent},
        tile::TileLayer,
    },
    MapError, Result,
};

/// Owns the base maps and overlays and enforces their selection rules:
/// exactly one base layer is active, overlays toggle independently.
pub struct LayerManager {
    base_layers: Vec<TileLayer>,
    active_base: usize,
    /// Overlays sorted by z-index (render order)
    overlays: Vec<Box<dyn LayerTrait>>,
    /// Overlay names in the order they were added (control order).
    overlay_names: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            base_layers: Vec::new(),
            active_base: 0,
            overlays: Vec::new(),
            overlay_names: Vec::new(),
        }
    }

    /// Adds a base layer. The first one added becomes active.
    pub fn add_base_layer(&mut self, mut layer: TileLayer) {
        layer.set_visible(self.base_layers.is_empty());
        self.base_layers.push(layer);
    }

    /// Adds an overlay, keeping overlays sorted by z-index. Ties keep
    /// insertion order.
    pub fn add_overlay(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        if self.overlays.iter().any(|l| l.name() == layer.name()) {
            return Err(MapError::Layer(format!(
                "overlay '{}' already exists",
                layer.name()
            )));
        }

        self.overlay_names.push(layer.name().to_string());
        let z_index = layer.z_index();
        let insert_pos = self
            .overlays
            .iter()
            .position(|l| l.z_index() > z_index)
            .unwrap_or(self.overlays.len());
        self.overlays.insert(insert_pos, layer);
        Ok(())
    }

    /// Makes the base layer named `name` the only visible one.
    pub fn select_base_layer(&mut self, name: &str) -> Result<()> {
        let index = self
            .base_layers
            .iter()
            .position(|l| l.name() == name)
            .ok_or_else(|| MapError::Layer(format!("unknown base layer '{}'", name)))?;

        for (i, layer) in self.base_layers.iter_mut().enumerate() {
            layer.set_visible(i == index);
        }
        self.active_base = index;
        log::debug!("base layer switched to {}", name);
        Ok(())
    }

    pub fn set_overlay_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        let layer = self
            .overlays
            .iter_mut()
            .find(|l| l.name() == name)
            .ok_or_else(|| MapError::Layer(format!("unknown overlay '{}'", name)))?;
        layer.set_visible(visible);
        Ok(())
    }

    pub fn active_base_layer(&self) -> Option<&TileLayer> {
        self.base_layers.get(self.active_base)
    }

    pub fn active_base_layer_mut(&mut self) -> Option<&mut TileLayer> {
        self.base_layers.get_mut(self.active_base)
    }

    pub fn base_layers(&self) -> &[TileLayer] {
        &self.base_layers
    }

    pub fn base_layer_names(&self) -> Vec<String> {
        self.base_layers.iter().map(|l| l.name().to_string()).collect()
    }

    /// Overlays in render order.
    pub fn overlays(&self) -> impl Iterator<Item = &dyn LayerTrait> {
        self.overlays.iter().map(|l| l.as_ref())
    }

    /// Overlay names with their visibility, in the order they were added.
    pub fn overlay_states(&self) -> Vec<(String, bool)> {
        self.overlay_names
            .iter()
            .filter_map(|name| {
                self.get_overlay(name)
                    .map(|l| (name.clone(), l.is_visible()))
            })
            .collect()
    }

    pub fn get_overlay(&self, name: &str) -> Option<&dyn LayerTrait> {
        self.overlays
            .iter()
            .find(|l| l.name() == name)
            .map(|l| l.as_ref())
    }

    /// Downcasts the overlay named `name` to its concrete type.
    pub fn overlay_as<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get_overlay(name)?.as_any().downcast_ref::<T>()
    }

    /// Popup of the topmost visible feature under `pixel`. Overlays drawn
    /// last are tested first.
    pub fn popup_at(&self, viewport: &Viewport, pixel: &Point) -> Option<(LatLng, PopupContent)> {
        self.overlays
            .iter()
            .rev()
            .filter(|l| l.is_visible())
            .find_map(|l| l.popup_at(viewport, pixel))
    }

    /// Drives tile downloads for the active base layer.
    pub fn update_tiles(&mut self, viewport: &Viewport) -> usize {
        self.active_base_layer_mut()
            .map(|layer| layer.update_tiles(viewport))
            .unwrap_or(0)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
