use serde::{Deserialize, Serialize};

use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, PrimitiveGroup, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::SpecificityChart;
use super::layout_helpers::{
    BOX_PADDING_PX, LINE_HEIGHT_EM, estimate_label_text_width_px, padded_box,
};
use super::series_scene_builder::ProjectedSeries;

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub id: String,
    pub color: Color,
    /// Topmost pixel y of the drawn series; rows are sorted by it so the
    /// legend reads in the same order as the lines.
    pub position: f64,
}

/// Swatch radius relative to the font size.
const SWATCH_RADIUS_EM: f64 = 0.4;

impl<R: Renderer> SpecificityChart<R> {
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        legend_entries_from(&self.project_series(), self.core.model.plot.bottom)
    }

    pub(super) fn append_legend_scene(&self, frame: &mut RenderFrame, projected: &[ProjectedSeries]) {
        let entries = legend_entries_from(projected, self.core.model.plot.bottom);
        if entries.is_empty() {
            return;
        }
        let style = &self.core.config.style;
        let plot = self.core.model.plot;
        let em = self.core.config.font_size_px;
        let line = LINE_HEIGHT_EM * em;

        let widest = entries
            .iter()
            .map(|entry| estimate_label_text_width_px(&entry.id, em))
            .fold(0.0, f64::max);
        let content_width = em + widest;
        let content_height = (entries.len() - 1) as f64 * line + em;
        let left = plot.right - content_width - BOX_PADDING_PX;
        let top = plot.top + BOX_PADDING_PX;

        frame.push_group(
            PrimitiveGroup::new(CanvasLayerKind::Legend, "legend__box").with(padded_box(
                left,
                top,
                content_width,
                content_height,
                style.legend_box_color,
                style.legend_border_color,
            )),
        );
        for (row, entry) in entries.into_iter().enumerate() {
            let baseline = top + row as f64 * line + em * 0.8;
            frame.push_group(
                PrimitiveGroup::new(CanvasLayerKind::Legend, "legend__item")
                    .with_legend(entry.id.clone())
                    .with(CirclePrimitive::new(
                        left + SWATCH_RADIUS_EM * em,
                        baseline - 0.3 * em,
                        SWATCH_RADIUS_EM * em,
                        entry.color,
                    ))
                    .with(TextPrimitive::new(
                        entry.id,
                        left + em,
                        baseline,
                        em,
                        style.legend_text_color,
                        TextHAlign::Left,
                    )),
            );
        }
    }
}

fn legend_entries_from(projected: &[ProjectedSeries], fallback_position: f64) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = projected
        .iter()
        .map(|series| LegendEntry {
            id: series.id.clone(),
            color: series.color,
            position: series.path.top().unwrap_or(fallback_position),
        })
        .collect();
    entries.sort_by(|left, right| left.position.total_cmp(&right.position));
    entries
}
