use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// d3 `category10`, assigned to series in the order they are added.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Style contract for rendered frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Series colors, cycled when there are more series than entries.
    pub palette: Vec<Color>,
    pub background_color: Color,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub axis_line_width: f64,
    pub series_line_width: f64,
    /// Opacity of the area under a filled series.
    pub fill_alpha: f64,
    pub dot_radius_px: f64,
    pub legend_box_color: Color,
    pub legend_border_color: Color,
    pub legend_text_color: Color,
    pub info_box_color: Color,
    pub info_border_color: Color,
    pub info_text_color: Color,
    pub indicator_radius_px: f64,
    pub indicator_fill_color: Color,
    pub indicator_stroke_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            background_color: Color::TRANSPARENT,
            axis_line_color: Color::rgb(0.20, 0.20, 0.20),
            axis_label_color: Color::rgb(0.10, 0.12, 0.16),
            axis_line_width: 1.0,
            series_line_width: 1.5,
            fill_alpha: 0.25,
            dot_radius_px: 1.5,
            legend_box_color: Color::rgba(1.0, 1.0, 1.0, 0.9),
            legend_border_color: Color::rgb(0.80, 0.80, 0.80),
            legend_text_color: Color::rgb(0.10, 0.12, 0.16),
            info_box_color: Color::rgba(1.0, 1.0, 1.0, 0.9),
            info_border_color: Color::rgb(0.80, 0.80, 0.80),
            info_text_color: Color::rgb(0.10, 0.12, 0.16),
            indicator_radius_px: 4.5,
            indicator_fill_color: Color::rgb(1.0, 1.0, 1.0),
            indicator_stroke_width: 1.5,
        }
    }
}

impl ChartStyle {
    /// Color of the `ordinal`-th added series.
    #[must_use]
    pub fn series_color(&self, ordinal: usize) -> Color {
        if self.palette.is_empty() {
            return self.axis_line_color;
        }
        self.palette[ordinal % self.palette.len()]
    }
}

fn default_palette() -> Vec<Color> {
    CATEGORY10
        .iter()
        .filter_map(|hex| Color::from_hex(hex).ok())
        .collect()
}

pub(super) fn validate_chart_style(style: &ChartStyle) -> ChartResult<()> {
    if style.palette.is_empty() {
        return Err(ChartError::InvalidConfig(
            "style palette must contain at least one color".to_owned(),
        ));
    }
    for color in &style.palette {
        color.validate()?;
    }
    for color in [
        style.background_color,
        style.axis_line_color,
        style.axis_label_color,
        style.legend_box_color,
        style.legend_border_color,
        style.legend_text_color,
        style.info_box_color,
        style.info_border_color,
        style.info_text_color,
        style.indicator_fill_color,
    ] {
        color.validate()?;
    }
    for (name, value) in [
        ("axis_line_width", style.axis_line_width),
        ("series_line_width", style.series_line_width),
        ("dot_radius_px", style.dot_radius_px),
        ("indicator_radius_px", style.indicator_radius_px),
        ("indicator_stroke_width", style.indicator_stroke_width),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "style `{name}` must be finite and > 0"
            )));
        }
    }
    if !style.fill_alpha.is_finite() || !(0.0..=1.0).contains(&style.fill_alpha) {
        return Err(ChartError::InvalidConfig(
            "style `fill_alpha` must be in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}
