use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serializable RGBA color used by the symbology tables and marker styles.
///
/// Stored unmultiplied; opacity from a style is applied at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Formats as `#rrggbb`, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns the same color with alpha scaled by `opacity` (0.0 to 1.0).
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self::new(self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = crate::Error;

    /// Parses `#rgb` or `#rrggbb` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || crate::Error::Parse(format!("invalid hex color: {:?}", s));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel =
                    |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Color::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(feature = "egui")]
impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color: Color = "#b10026".parse().unwrap();
        assert_eq!(color, Color::rgb(0xb1, 0x00, 0x26));
        assert_eq!(color.to_hex(), "#b10026");
    }

    #[test]
    fn test_short_hex() {
        let color: Color = "#000".parse().unwrap();
        assert_eq!(color, Color::BLACK);
        let color: Color = "fff".parse().unwrap();
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn test_invalid_hex() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_with_opacity() {
        let color = Color::rgb(10, 20, 30).with_opacity(0.8);
        assert_eq!(color.a, 204);
        assert_eq!(Color::BLACK.with_opacity(2.0).a, 255);
    }
}
