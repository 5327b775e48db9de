use crate::{
    core::{geo::LatLng, viewport::Viewport},
    layers::base::PopupContent,
    ui::style::PopupStyle,
};
use egui::{Align2, Painter, Pos2, Rect, Shape, Vec2};

/// The popup of the last clicked feature, anchored to a map position.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: LatLng,
    pub content: PopupContent,
}

impl Popup {
    pub fn new(position: LatLng, content: PopupContent) -> Self {
        Self { position, content }
    }

    /// Screen rect of the popup box when its anchor sits at `anchor`.
    fn layout(&self, painter: &Painter, anchor: Pos2, style: &PopupStyle) -> (Rect, f32) {
        let title = painter
            .layout_no_wrap(self.content.title.clone(), style.title_font_id.clone(), style.text_color)
            .size();
        let body = self
            .content
            .body
            .as_ref()
            .map(|body| {
                painter
                    .layout_no_wrap(body.clone(), style.font_id.clone(), style.text_color)
                    .size()
            })
            .unwrap_or(Vec2::ZERO);

        let size = Vec2::new(
            title.x.max(body.x) + style.padding * 2.0,
            title.y + body.y + style.padding * 2.0,
        );
        let min = Pos2::new(anchor.x - size.x / 2.0, anchor.y - style.offset - size.y);
        (Rect::from_min_size(min, size), title.y)
    }

    /// Paints the popup above its anchor. Returns the box rect, or `None`
    /// when the anchor is off screen.
    pub fn render(
        &self,
        painter: &Painter,
        container: Rect,
        viewport: &Viewport,
        style: &PopupStyle,
    ) -> Option<Rect> {
        let pixel = viewport.lat_lng_to_pixel(&self.position);
        let anchor = container.min + Vec2::new(pixel.x as f32, pixel.y as f32);
        if !container.contains(anchor) {
            return None;
        }

        let (rect, title_height) = self.layout(painter, anchor, style);

        let tip = vec![
            Pos2::new(anchor.x - style.offset * 0.7, rect.max.y),
            Pos2::new(anchor.x + style.offset * 0.7, rect.max.y),
            anchor,
        ];
        painter.add(Shape::convex_polygon(
            tip,
            style.background_color,
            style.border_stroke,
        ));
        painter.rect_filled(rect, style.rounding, style.background_color);
        painter.rect_stroke(rect, style.rounding, style.border_stroke);

        let text_min = rect.min + Vec2::splat(style.padding);
        painter.text(
            text_min,
            Align2::LEFT_TOP,
            &self.content.title,
            style.title_font_id.clone(),
            style.text_color,
        );
        if let Some(body) = &self.content.body {
            painter.text(
                text_min + Vec2::new(0.0, title_height),
                Align2::LEFT_TOP,
                body,
                style.font_id.clone(),
                style.text_color,
            );
        }

        Some(rect)
    }
}
