use crate::{core::map::ControlPosition, ui::style::AttributionStyle};
use egui::{Align2, Painter, Rect, Vec2};

/// Anchor of an on-map element inside the widget rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    TopLeft,
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl Position {
    pub fn calculate_rect(&self, container: Rect, size: Vec2, margin: f32) -> Rect {
        let x_left = container.min.x + margin;
        let x_right = container.max.x - margin - size.x;
        let x_center = container.center().x - size.x / 2.0;
        let y_top = container.min.y + margin;
        let y_bottom = container.max.y - margin - size.y;

        let min = match self {
            Position::TopLeft => egui::pos2(x_left, y_top),
            Position::TopRight => egui::pos2(x_right, y_top),
            Position::TopCenter => egui::pos2(x_center, y_top),
            Position::BottomLeft => egui::pos2(x_left, y_bottom),
            Position::BottomRight => egui::pos2(x_right, y_bottom),
            Position::BottomCenter => egui::pos2(x_center, y_bottom),
        };
        Rect::from_min_size(min, size)
    }
}

impl From<ControlPosition> for Position {
    fn from(position: ControlPosition) -> Self {
        match position {
            ControlPosition::TopLeft => Position::TopLeft,
            ControlPosition::TopRight => Position::TopRight,
            ControlPosition::BottomLeft => Position::BottomLeft,
            ControlPosition::BottomRight => Position::BottomRight,
        }
    }
}

/// Tile provider credit, drawn in the bottom-left corner.
pub struct Attribution;

impl Attribution {
    pub fn render(painter: &Painter, container: Rect, text: &str, style: &AttributionStyle) {
        if text.is_empty() {
            return;
        }

        let galley = painter.layout_no_wrap(text.to_string(), style.font_id.clone(), style.text_color);
        let size = galley.size() + Vec2::splat(style.padding * 2.0);
        let rect = Position::BottomLeft.calculate_rect(container, size, 0.0);

        painter.rect_filled(rect, 0.0, style.background_color);
        painter.text(
            rect.min + Vec2::splat(style.padding),
            Align2::LEFT_TOP,
            text,
            style.font_id.clone(),
            style.text_color,
        );
    }
}
