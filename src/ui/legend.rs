use crate::{
    symbology::LegendEntry,
    ui::{elements::Position, style::ControlStyle},
};
use egui::{Align2, Painter, Rect, Stroke, Vec2};

const SWATCH_GAP: f32 = 6.0;

/// Color key for the magnitude buckets: one swatch and range label per row.
pub struct LegendControl {
    pub position: Position,
}

impl LegendControl {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Size of the legend box for `entries`.
    pub fn size(painter: &Painter, entries: &[LegendEntry], style: &ControlStyle) -> Vec2 {
        let label_width = entries
            .iter()
            .map(|entry| {
                painter
                    .layout_no_wrap(entry.label.clone(), style.font_id.clone(), style.text_color)
                    .size()
                    .x
            })
            .fold(0.0_f32, f32::max);

        Vec2::new(
            style.padding * 2.0 + style.swatch_size + SWATCH_GAP + label_width,
            style.padding * 2.0 + style.row_height * entries.len() as f32,
        )
    }

    /// Paints the legend inside `container`. Returns the rect it covers.
    pub fn render(
        &self,
        painter: &Painter,
        container: Rect,
        entries: &[LegendEntry],
        style: &ControlStyle,
    ) -> Rect {
        let size = Self::size(painter, entries, style);
        let rect = self.position.calculate_rect(container, size, style.margin);

        painter.rect_filled(rect, style.rounding, style.background_color);
        painter.rect_stroke(rect, style.rounding, style.border_stroke);

        for (i, entry) in entries.iter().enumerate() {
            let row_top = rect.min.y + style.padding + style.row_height * i as f32;
            let swatch = Rect::from_min_size(
                egui::pos2(
                    rect.min.x + style.padding,
                    row_top + (style.row_height - style.swatch_size) / 2.0,
                ),
                Vec2::splat(style.swatch_size),
            );
            painter.rect_filled(swatch, 0.0, entry.swatch_color);
            painter.rect_stroke(swatch, 0.0, Stroke::new(0.5, style.border_stroke.color));

            painter.text(
                egui::pos2(swatch.max.x + SWATCH_GAP, row_top + style.row_height / 2.0),
                Align2::LEFT_CENTER,
                &entry.label,
                style.font_id.clone(),
                style.text_color,
            );
        }

        rect
    }
}

impl Default for LegendControl {
    fn default() -> Self {
        Self::new(Position::BottomRight)
    }
}
