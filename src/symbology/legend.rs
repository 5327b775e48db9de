use super::{
    color::Color,
    magnitude::{breakpoints, color_for_magnitude},
};
use serde::{Deserialize, Serialize};

/// One row of the magnitude legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub range_low: f64,
    /// `None` for the open-ended top row.
    pub range_high: Option<f64>,
    pub swatch_color: Color,
    pub label: String,
}

/// Builds the legend rows from the shared magnitude scale.
///
/// The swatch for a row starting at `b` is the color of `b + 1`, i.e. the
/// band just above the row's floor. Rows are labelled `"b–next"`, and the
/// last one `"b+"`.
pub fn build_legend() -> Vec<LegendEntry> {
    let grades = breakpoints();

    grades
        .iter()
        .enumerate()
        .map(|(i, &low)| {
            let high = grades.get(i + 1).copied();
            let label = match high {
                Some(high) => format!("{}\u{2013}{}", low, high),
                None => format!("{}+", low),
            };
            LegendEntry {
                range_low: low,
                range_high: high,
                swatch_color: color_for_magnitude(low + 1.0),
                label,
            }
        })
        .collect()
}
