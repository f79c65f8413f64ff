use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, SeriesMean, Viewport};
use crate::interaction::{FocusState, HoverState};
use crate::render::Color;

/// Summary of one series inside a [`ChartSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub id: String,
    pub records_len: usize,
    pub mean: SeriesMean,
    pub color: Color,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<SeriesSnapshot>,
    pub render_order: Vec<String>,
    pub flattened_len: usize,
    pub hover: HoverState,
    pub focus: FocusState,
    pub info_lines: Vec<String>,
    pub now_ms: f64,
}
