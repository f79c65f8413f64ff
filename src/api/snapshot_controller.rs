use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartSnapshot, SeriesSnapshot, SpecificityChart};

impl<R: Renderer> SpecificityChart<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let model = &self.core.model;
        ChartSnapshot {
            viewport: model.viewport,
            plot_area: model.plot,
            x_domain: model.x_scale.domain(),
            y_domain: model.y_scale.domain(),
            x_range: model.x_scale.range(),
            y_range: model.y_scale.range(),
            series: model
                .series
                .iter()
                .map(|(id, entry)| SeriesSnapshot {
                    id: id.clone(),
                    records_len: entry.series.len(),
                    mean: entry.series.mean(),
                    color: entry.color,
                })
                .collect(),
            render_order: model.render_order.clone(),
            flattened_len: model.flattened.len(),
            hover: model.interaction.hover(),
            focus: model.interaction.focus(),
            info_lines: self.info_lines(),
            now_ms: self.now_ms(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
