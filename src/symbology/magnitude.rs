//! Magnitude to visual encoding.
//!
//! A single ordered table of thresholds drives both the marker fill color and
//! the legend, so the two can never drift apart.

use super::color::Color;

/// Multiplier applied to a magnitude to get a marker radius in pixels.
pub const MARKER_SIZE_FACTOR: f64 = 3.0;

/// One step of the magnitude color scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeBand {
    /// Lower bound of the band.
    pub threshold: f64,
    /// Whether a magnitude equal to `threshold` belongs to this band.
    pub inclusive: bool,
    pub color: Color,
}

impl MagnitudeBand {
    const fn above(threshold: f64, color: Color) -> Self {
        Self {
            threshold,
            inclusive: false,
            color,
        }
    }

    const fn at_least(threshold: f64, color: Color) -> Self {
        Self {
            threshold,
            inclusive: true,
            color,
        }
    }

    /// Returns true when `magnitude` falls in this band or any band above it.
    pub fn admits(&self, magnitude: f64) -> bool {
        if self.inclusive {
            magnitude >= self.threshold
        } else {
            magnitude > self.threshold
        }
    }
}

/// Color scale ordered highest threshold first. Only the zero band is
/// inclusive of its threshold.
pub const MAGNITUDE_SCALE: [MagnitudeBand; 7] = [
    MagnitudeBand::above(6.0, Color::rgb(0xb1, 0x00, 0x26)),
    MagnitudeBand::above(5.0, Color::rgb(0xe3, 0x1a, 0x1c)),
    MagnitudeBand::above(4.0, Color::rgb(0xfc, 0x43, 0x2a)),
    MagnitudeBand::above(3.0, Color::rgb(0xfd, 0x8d, 0x3c)),
    MagnitudeBand::above(2.0, Color::rgb(0xfe, 0xb2, 0x4c)),
    MagnitudeBand::above(1.0, Color::rgb(0xf7, 0xfc, 0xb9)),
    MagnitudeBand::at_least(0.0, Color::rgb(0x78, 0xc6, 0x79)),
];

/// Fill for anything below every band (negative magnitudes, NaN).
pub const BELOW_SCALE_COLOR: Color = Color::rgb(0x23, 0x84, 0x43);

/// Marker radius for a magnitude. Not clamped: zero and negative magnitudes
/// give a degenerate radius, which the renderer floors.
pub fn marker_size(magnitude: f64) -> f64 {
    magnitude * MARKER_SIZE_FACTOR
}

/// Fill color for a magnitude. Total over `f64`.
pub fn color_for_magnitude(magnitude: f64) -> Color {
    MAGNITUDE_SCALE
        .iter()
        .find(|band| band.admits(magnitude))
        .map(|band| band.color)
        .unwrap_or(BELOW_SCALE_COLOR)
}

/// Band thresholds in ascending order, `[0, 1, 2, 3, 4, 5, 6]`.
pub fn breakpoints() -> Vec<f64> {
    MAGNITUDE_SCALE
        .iter()
        .rev()
        .map(|band| band.threshold)
        .collect()
}
