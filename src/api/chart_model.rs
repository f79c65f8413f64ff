use indexmap::IndexMap;

use crate::core::{DataPoint, FlatRecord, LinearScale, PlotArea, Series, Viewport};
use crate::interaction::InteractionState;
use crate::render::{Animated, Color, DotState};

/// A series plus the display state it owns.
///
/// The path and dots are animated in data space, so a resize or rescale in
/// the middle of a transition still lands on the right pixels.
#[derive(Debug, Clone)]
pub(super) struct SeriesEntry {
    pub(super) series: Series,
    pub(super) color: Color,
    pub(super) path: Animated<Vec<DataPoint>>,
    pub(super) dots: Vec<Animated<DotState>>,
}

/// Mutable chart domain state: series, scales, viewport and hover.
pub(super) struct ChartModel {
    pub(super) viewport: Viewport,
    pub(super) plot: PlotArea,
    pub(super) x_scale: LinearScale,
    pub(super) y_scale: LinearScale,
    pub(super) interaction: InteractionState,
    pub(super) series: IndexMap<String, SeriesEntry>,
    /// Every record of every series, sorted by x.
    pub(super) flattened: Vec<FlatRecord>,
    /// x of `flattened`, kept alongside for bisection.
    pub(super) flattened_x: Vec<f64>,
    /// Draw order of series ids; the last one is on top.
    pub(super) render_order: Vec<String>,
    /// Number of colors handed out so far.
    pub(super) color_cursor: usize,
}

impl ChartModel {
    pub(super) fn new(
        viewport: Viewport,
        plot: PlotArea,
        x_scale: LinearScale,
        y_scale: LinearScale,
    ) -> Self {
        Self {
            viewport,
            plot,
            x_scale,
            y_scale,
            interaction: InteractionState::default(),
            series: IndexMap::new(),
            flattened: Vec::new(),
            flattened_x: Vec::new(),
            render_order: Vec::new(),
            color_cursor: 0,
        }
    }

    /// Smallest non-negative ordinal not used as a series id, starting at
    /// the current series count.
    pub(super) fn next_ordinal_id(&self) -> String {
        let mut ordinal = self.series.len();
        loop {
            let candidate = ordinal.to_string();
            if !self.series.contains_key(&candidate) {
                return candidate;
            }
            ordinal += 1;
        }
    }

    pub(super) fn longest_series_len(&self) -> usize {
        self.series
            .values()
            .map(|entry| entry.series.len())
            .max()
            .unwrap_or(0)
    }
}
