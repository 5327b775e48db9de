pub mod controls;
pub mod elements;
pub mod legend;
pub mod popup;
pub mod style;
pub mod widget;

pub use controls::{LayerControl, LayerControlEvent};
pub use elements::{Attribution, Position};
pub use legend::LegendControl;
pub use popup::Popup;
pub use style::{AttributionStyle, ControlStyle, MapStyle, PopupStyle, StatusStyle};
pub use widget::QuakeMapWidget;

pub trait UiQuakeMapExt {
    fn quake_map(&mut self, widget: &mut QuakeMapWidget) -> egui::Response;
}

impl UiQuakeMapExt for egui::Ui {
    fn quake_map(&mut self, widget: &mut QuakeMapWidget) -> egui::Response {
        widget.show(self)
    }
}
