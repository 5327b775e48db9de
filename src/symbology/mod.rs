//! Color scale, marker sizing and legend for earthquake magnitudes.

pub mod color;
pub mod legend;
pub mod magnitude;

pub use color::Color;
pub use legend::{build_legend, LegendEntry};
pub use magnitude::{
    breakpoints, color_for_magnitude, marker_size, MagnitudeBand, BELOW_SCALE_COLOR,
    MAGNITUDE_SCALE, MARKER_SIZE_FACTOR,
};
