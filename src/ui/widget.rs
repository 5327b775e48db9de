use crate::{
    core::{
        geo::{Point, TileCoord},
        map::QuakeMap,
    },
    layers::{base::LayerTrait, marker::MarkerLayer, tile::VisibleTile, vector::BoundaryLayer},
    prelude::{HashMap, HashSet},
    ui::{
        controls::LayerControl,
        elements::{Attribution, Position},
        legend::LegendControl,
        popup::Popup,
        style::MapStyle,
    },
};
use egui::{
    Align2, Color32, ColorImage, Pos2, Rect, Response, Sense, Shape, Stroke, TextureHandle,
    TextureOptions, Ui, Vec2,
};
use std::time::Duration;

/// Zoom levels per scroll pixel.
const SCROLL_ZOOM_SPEED: f64 = 0.005;

/// Textures kept beyond the ones drawn in the current frame.
const MAX_TEXTURES: usize = 256;

/// Interactive egui view of a [`QuakeMap`]: tiles, plate boundaries,
/// earthquake markers, legend, layer control, popups and status messages.
pub struct QuakeMapWidget {
    map: QuakeMap,
    style: MapStyle,
    legend: LegendControl,
    layer_control: LayerControl,
    textures: HashMap<(String, TileCoord), TextureHandle>,
    popup: Option<Popup>,
    /// Screen areas of the controls in the last frame; clicks there are not
    /// map clicks.
    control_rects: Vec<Rect>,
}

impl QuakeMapWidget {
    pub fn new(map: QuakeMap) -> Self {
        let (legend, layer_control) = Self::controls_for(&map);
        Self {
            map,
            style: MapStyle::default(),
            legend,
            layer_control,
            textures: HashMap::default(),
            popup: None,
            control_rects: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn map(&self) -> &QuakeMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut QuakeMap {
        &mut self.map
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    fn controls_for(map: &QuakeMap) -> (LegendControl, LayerControl) {
        (
            LegendControl::new(Position::from(map.legend_position)),
            LayerControl::new(Position::from(map.layer_control_position)),
        )
    }

    /// Replaces the map, keeping the current view. Controls are placed
    /// where the new map asks for them.
    pub fn set_map(&mut self, mut map: QuakeMap) {
        map.viewport = self.map.viewport.clone();
        (self.legend, self.layer_control) = Self::controls_for(&map);
        self.map = map;
        self.popup = None;
        self.control_rects.clear();
    }

    /// Draws the map into all available space and handles input.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.map
            .set_viewport_size(Point::new(rect.width() as f64, rect.height() as f64));

        self.handle_input(ui, rect, &response);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);

        let started = self.map.update_tiles();
        let loading = self
            .map
            .layers()
            .active_base_layer()
            .is_some_and(|layer| layer.is_loading());
        if started > 0 || loading {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }
        self.paint_tiles(ui, &painter, rect);
        self.paint_overlays(&painter, rect);

        if let Some(popup) = &self.popup {
            popup.render(&painter, rect, &self.map.viewport, &self.style.popup);
        }

        let legend_rect = self
            .legend
            .render(&painter, rect, self.map.legend(), &self.style.controls);
        let (control_rect, change) =
            self.layer_control
                .show(ui, rect, &mut self.map, &self.style.controls);
        if change.is_some() {
            self.popup = None;
        }
        self.control_rects = vec![legend_rect, control_rect];

        Attribution::render(&painter, rect, self.map.attribution(), &self.style.attribution);
        self.paint_status(&painter, rect);

        response
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.map.pan_by(Point::new(delta.x as f64, delta.y as f64));
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let anchor = response
                    .hover_pos()
                    .map(|pos| pos - rect.min)
                    .unwrap_or(rect.size() / 2.0);
                self.map.zoom_around(
                    scroll as f64 * SCROLL_ZOOM_SPEED,
                    Point::new(anchor.x as f64, anchor.y as f64),
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if self.control_rects.iter().any(|r| r.contains(pos)) {
                    return;
                }
                let local = pos - rect.min;
                self.popup = self
                    .map
                    .popup_at(&Point::new(local.x as f64, local.y as f64))
                    .map(|(position, content)| Popup::new(position, content));
            }
        }
    }

    fn paint_tiles(&mut self, ui: &Ui, painter: &egui::Painter, rect: Rect) {
        let Some(layer) = self.map.layers().active_base_layer() else {
            return;
        };
        let style = layer.id().to_string();
        let mut used = HashSet::default();

        for tile in layer.visible_tiles(&self.map.viewport) {
            let Some((found, bytes)) = layer.tile(tile.coord) else {
                continue;
            };
            let key = (style.clone(), found);
            if !self.textures.contains_key(&key) {
                match decode_tile(&bytes) {
                    Some(image) => {
                        let name = format!("{}/{}/{}/{}", style, found.z, found.x, found.y);
                        let texture = ui.ctx().load_texture(name, image, TextureOptions::LINEAR);
                        self.textures.insert(key.clone(), texture);
                    }
                    None => {
                        log::debug!("tile {:?} could not be decoded", found);
                        continue;
                    }
                }
            }

            if let Some(texture) = self.textures.get(&key) {
                painter.image(
                    texture.id(),
                    tile_rect(rect, &tile),
                    tile_uv(tile.coord, found),
                    Color32::WHITE,
                );
                used.insert(key);
            }
        }

        if self.textures.len() > MAX_TEXTURES {
            self.textures.retain(|key, _| used.contains(key));
        }
    }

    fn paint_overlays(&self, painter: &egui::Painter, rect: Rect) {
        let viewport = &self.map.viewport;
        let to_screen = |p: Point| rect.min + Vec2::new(p.x as f32, p.y as f32);

        for overlay in self.map.layers().overlays() {
            if !overlay.is_visible() {
                continue;
            }

            if let Some(plates) = overlay.as_any().downcast_ref::<BoundaryLayer>() {
                for boundary in plates.boundaries() {
                    let color = boundary.style.color.with_opacity(boundary.style.opacity);
                    let stroke = Stroke::new(boundary.style.weight, Color32::from(color));
                    for path in boundary.screen_paths(viewport) {
                        let points: Vec<Pos2> = path.into_iter().map(to_screen).collect();
                        if points.len() >= 2 {
                            painter.add(Shape::line(points, stroke));
                        }
                    }
                }
            } else if let Some(quakes) = overlay.as_any().downcast_ref::<MarkerLayer>() {
                for marker in quakes.markers() {
                    let center = to_screen(viewport.lat_lng_to_pixel(&marker.position));
                    let radius = marker.display_radius();
                    if !rect.expand(radius).contains(center) {
                        continue;
                    }
                    let style = &marker.style;
                    let fill = style.fill_color.with_opacity(style.fill_opacity);
                    let stroke_color = style.stroke_color.with_opacity(style.opacity);
                    painter.circle(
                        center,
                        radius,
                        Color32::from(fill),
                        Stroke::new(style.weight, Color32::from(stroke_color)),
                    );
                }
            }
        }
    }

    fn paint_status(&self, painter: &egui::Painter, rect: Rect) {
        let style = &self.style.status;
        let mut top = rect.min.y + self.style.controls.margin;

        for message in self.map.status() {
            let galley =
                painter.layout_no_wrap(message.text.clone(), style.font_id.clone(), style.text_color);
            let size = galley.size() + Vec2::new(20.0, 10.0);
            let banner = Rect::from_min_size(Pos2::new(rect.center().x - size.x / 2.0, top), size);

            painter.rect_filled(banner, 4.0, style.color_for(message.level));
            painter.text(
                banner.center(),
                Align2::CENTER_CENTER,
                &message.text,
                style.font_id.clone(),
                style.text_color,
            );
            top = banner.max.y + 4.0;
        }
    }
}

fn decode_tile(bytes: &[u8]) -> Option<ColorImage> {
    let img = image::load_from_memory(bytes).ok()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn tile_rect(container: Rect, tile: &VisibleTile) -> Rect {
    Rect::from_min_size(
        container.min + Vec2::new(tile.origin.x as f32, tile.origin.y as f32),
        Vec2::splat(tile.size as f32),
    )
}

/// Part of the `found` texture that covers `wanted`. Equal coordinates use
/// the whole texture; an ancestor contributes the matching sub-square.
fn tile_uv(wanted: TileCoord, found: TileCoord) -> Rect {
    if wanted == found || wanted.z <= found.z {
        return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    }
    let scale = TileCoord::tiles_per_axis(wanted.z - found.z) as f32;
    let u = (wanted.x as f32 - found.x as f32 * scale) / scale;
    let v = (wanted.y as f32 - found.y as f32 * scale) / scale;
    Rect::from_min_size(Pos2::new(u, v), Vec2::splat(1.0 / scale))
}
