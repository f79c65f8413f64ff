use crate::render::{
    CanvasLayerKind, CirclePrimitive, PrimitiveGroup, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::SpecificityChart;
use super::layout_helpers::{LINE_HEIGHT_EM, estimate_label_text_width_px, padded_box};

/// Horizontal offset of the info box from the plot's left edge.
pub const INFO_OFFSET_X_PX: f64 = 10.0;

impl<R: Renderer> SpecificityChart<R> {
    /// Info box plus one indicator per focused record. Nothing while idle.
    pub(super) fn append_focus_scene(&self, frame: &mut RenderFrame) {
        let records = self.focused_records();
        if records.is_empty() {
            return;
        }
        let style = &self.core.config.style;
        let plot = self.core.model.plot;
        let em = self.core.config.font_size_px;
        let line = LINE_HEIGHT_EM * em;
        let lines = self.info_lines();

        let left = plot.left + INFO_OFFSET_X_PX;
        let top = plot.top;
        let widest = lines
            .iter()
            .map(|text| estimate_label_text_width_px(text, em))
            .fold(0.0, f64::max);
        let height = (lines.len() - 1) as f64 * line + em;

        let mut info = PrimitiveGroup::new(CanvasLayerKind::Info, "info").with(padded_box(
            left,
            top,
            widest,
            height,
            style.info_box_color,
            style.info_border_color,
        ));
        for (row, text) in lines.into_iter().enumerate() {
            info.push(TextPrimitive::new(
                text,
                left,
                top + row as f64 * line + em * 0.8,
                em,
                style.info_text_color,
                TextHAlign::Left,
            ));
        }
        frame.push_group(info);

        let x_scale = self.core.model.x_scale;
        let y_scale = self.core.model.y_scale;
        for record in records {
            let color = self
                .series_color(&record.series_id)
                .unwrap_or(style.axis_line_color);
            frame.push_group(
                PrimitiveGroup::new(
                    CanvasLayerKind::Indicator,
                    format!(
                        "indicators__point indicators__point--{}",
                        record.series_id
                    ),
                )
                .with_legend(record.series_id.clone())
                .with(
                    CirclePrimitive::new(
                        x_scale.map(record.x),
                        y_scale.map(record.y),
                        style.indicator_radius_px,
                        style.indicator_fill_color,
                    )
                    .with_stroke(style.indicator_stroke_width, color),
                ),
            );
        }
    }
}
