use crate::{
    core::map::QuakeMap,
    layers::base::LayerTrait,
    ui::{elements::Position, style::ControlStyle},
};
use egui::{Frame, Rect, Rounding, Ui, Vec2};

const CONTROL_WIDTH: f32 = 150.0;
const SEPARATOR_HEIGHT: f32 = 12.0;

/// What the user changed in the layer control this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerControlEvent {
    BaseLayerSelected(String),
    OverlayToggled { name: String, visible: bool },
}

/// Always-expanded layer switcher: radio buttons for base maps, checkboxes
/// for overlays.
pub struct LayerControl {
    pub position: Position,
}

impl LayerControl {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn size(map: &QuakeMap, style: &ControlStyle) -> Vec2 {
        let layers = map.layers();
        let rows = layers.base_layers().len() + layers.overlay_count();
        let separator = if layers.overlay_count() > 0 {
            SEPARATOR_HEIGHT
        } else {
            0.0
        };
        Vec2::new(
            CONTROL_WIDTH,
            style.padding * 2.0 + style.row_height * rows as f32 + separator,
        )
    }

    /// Draws the control and applies any selection to `map`. Returns the
    /// rect the control covers and the change made, if any.
    pub fn show(
        &self,
        ui: &mut Ui,
        container: Rect,
        map: &mut QuakeMap,
        style: &ControlStyle,
    ) -> (Rect, Option<LayerControlEvent>) {
        let rect = self
            .position
            .calculate_rect(container, Self::size(map, style), style.margin);

        let active = map
            .layers()
            .active_base_layer()
            .map(|layer| layer.name().to_string());
        let base_names = map.layers().base_layer_names();
        let overlays = map.layers().overlay_states();

        let mut event = None;
        ui.allocate_ui_at_rect(rect, |ui| {
            Frame::none()
                .fill(style.background_color)
                .stroke(style.border_stroke)
                .rounding(Rounding::same(style.rounding))
                .inner_margin(style.padding)
                .show(ui, |ui| {
                    ui.set_width(CONTROL_WIDTH - style.padding * 2.0);
                    ui.spacing_mut().item_spacing.y = 2.0;

                    for name in &base_names {
                        let selected = active.as_deref() == Some(name.as_str());
                        if ui.radio(selected, name.as_str()).clicked() && !selected {
                            event = Some(LayerControlEvent::BaseLayerSelected(name.clone()));
                        }
                    }

                    if !overlays.is_empty() {
                        ui.separator();
                    }

                    for (name, visible) in &overlays {
                        let mut checked = *visible;
                        if ui.checkbox(&mut checked, name.as_str()).changed() {
                            event = Some(LayerControlEvent::OverlayToggled {
                                name: name.clone(),
                                visible: checked,
                            });
                        }
                    }
                });
        });

        if let Some(change) = &event {
            let result = match change {
                LayerControlEvent::BaseLayerSelected(name) => map.select_base_layer(name),
                LayerControlEvent::OverlayToggled { name, visible } => {
                    map.set_overlay_visible(name, *visible)
                }
            };
            if let Err(err) = result {
                log::warn!("layer control: {}", err);
            }
        }

        (rect, event)
    }
}

impl Default for LayerControl {
    fn default() -> Self {
        Self::new(Position::TopRight)
    }
}
