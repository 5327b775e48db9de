use crate::core::map::StatusLevel;
use egui::{Color32, FontId, Stroke};

/// Style configuration for the map widget and its controls
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Background color where no tile has loaded yet
    pub background_color: Color32,
    pub controls: ControlStyle,
    pub attribution: AttributionStyle,
    pub popup: PopupStyle,
    pub status: StatusStyle,
}

/// Shared look of the layer control and the legend
#[derive(Debug, Clone)]
pub struct ControlStyle {
    pub background_color: Color32,
    pub border_stroke: Stroke,
    pub text_color: Color32,
    pub font_id: FontId,
    /// Corner rounding
    pub rounding: f32,
    pub padding: f32,
    /// Distance from the map edge
    pub margin: f32,
    /// Edge of a legend color swatch
    pub swatch_size: f32,
    pub row_height: f32,
}

/// Style for attribution text
#[derive(Debug, Clone)]
pub struct AttributionStyle {
    pub text_color: Color32,
    pub background_color: Color32,
    pub font_id: FontId,
    pub padding: f32,
}

#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_stroke: Stroke,
    pub rounding: f32,
    pub padding: f32,
    pub font_id: FontId,
    pub title_font_id: FontId,
    pub text_color: Color32,
    /// Gap between the anchor point and the popup box
    pub offset: f32,
}

/// Colors of the status banner, one per severity
#[derive(Debug, Clone)]
pub struct StatusStyle {
    pub info_color: Color32,
    pub warning_color: Color32,
    pub error_color: Color32,
    pub text_color: Color32,
    pub font_id: FontId,
}

impl StatusStyle {
    pub fn color_for(&self, level: StatusLevel) -> Color32 {
        match level {
            StatusLevel::Info => self.info_color,
            StatusLevel::Warning => self.warning_color,
            StatusLevel::Error => self.error_color,
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(221, 221, 221),
            controls: ControlStyle::default(),
            attribution: AttributionStyle::default(),
            popup: PopupStyle::default(),
            status: StatusStyle::default(),
        }
    }
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
            border_stroke: Stroke::new(1.0, Color32::from_gray(170)),
            text_color: Color32::from_gray(30),
            font_id: FontId::proportional(13.0),
            rounding: 5.0,
            padding: 8.0,
            margin: 10.0,
            swatch_size: 18.0,
            row_height: 20.0,
        }
    }
}

impl Default for AttributionStyle {
    fn default() -> Self {
        Self {
            text_color: Color32::from_gray(60),
            background_color: Color32::from_rgba_unmultiplied(255, 255, 255, 180),
            font_id: FontId::proportional(10.0),
            padding: 3.0,
        }
    }
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_stroke: Stroke::new(1.0, Color32::from_gray(150)),
            rounding: 6.0,
            padding: 8.0,
            font_id: FontId::proportional(12.0),
            title_font_id: FontId::proportional(14.0),
            text_color: Color32::from_gray(20),
            offset: 10.0,
        }
    }
}

impl Default for StatusStyle {
    fn default() -> Self {
        Self {
            info_color: Color32::from_rgba_unmultiplied(40, 90, 160, 220),
            warning_color: Color32::from_rgba_unmultiplied(200, 130, 20, 230),
            error_color: Color32::from_rgba_unmultiplied(180, 30, 30, 235),
            text_color: Color32::WHITE,
            font_id: FontId::proportional(13.0),
        }
    }
}
