use crate::core::format_tick;
use crate::core::ticks::{
    AXIS_MAX_TICKS, AXIS_MIN_TICKS, AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX,
    axis_tick_target_count,
};
use crate::render::{
    CanvasLayerKind, LinePrimitive, PrimitiveGroup, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::SpecificityChart;
use super::layout_helpers::estimate_label_text_width_px;

/// Gap between an axis line and its tick labels when ticks are enabled.
pub const AXIS_TICK_PADDING_PX: f64 = 10.0;

/// Slack allowed when deciding whether a tick lies on the axis.
const TICK_EDGE_EPSILON_PX: f64 = 0.5;

impl<R: Renderer> SpecificityChart<R> {
    pub(super) fn append_axis_scene(&self, frame: &mut RenderFrame) {
        let config = &self.core.config;
        let style = &config.style;
        let plot = self.core.model.plot;
        let x_scale = self.core.model.x_scale;
        let y_scale = self.core.model.y_scale;
        let font = config.font_size_px;
        let tick_padding = if config.ticks {
            AXIS_TICK_PADDING_PX
        } else {
            0.0
        };

        let mut x_axis = PrimitiveGroup::new(CanvasLayerKind::Axis, "axis axis--x").with(
            LinePrimitive::new(
                plot.left,
                plot.bottom,
                plot.right,
                plot.bottom,
                style.axis_line_width,
                style.axis_line_color,
            ),
        );
        let x_count = axis_tick_target_count(
            plot.width(),
            AXIS_X_TARGET_SPACING_PX,
            AXIS_MIN_TICKS,
            AXIS_MAX_TICKS,
        );
        for tick in x_scale.ticks(x_count) {
            let px = x_scale.map(tick);
            if px < plot.left - TICK_EDGE_EPSILON_PX || px > plot.right + TICK_EDGE_EPSILON_PX {
                continue;
            }
            x_axis.push(TextPrimitive::new(
                format_tick(tick),
                px,
                plot.bottom + tick_padding + font,
                font,
                style.axis_label_color,
                TextHAlign::Center,
            ));
        }
        frame.push_group(x_axis);

        let mut y_axis = PrimitiveGroup::new(CanvasLayerKind::Axis, "axis axis--y").with(
            LinePrimitive::new(
                plot.left,
                plot.top,
                plot.left,
                plot.bottom,
                style.axis_line_width,
                style.axis_line_color,
            ),
        );
        let y_count = axis_tick_target_count(
            plot.height(),
            AXIS_Y_TARGET_SPACING_PX,
            AXIS_MIN_TICKS,
            AXIS_MAX_TICKS,
        );
        let mut widest_y_label: f64 = 0.0;
        for tick in y_scale.ticks(y_count) {
            let py = y_scale.map(tick);
            if py < plot.top - TICK_EDGE_EPSILON_PX || py > plot.bottom + TICK_EDGE_EPSILON_PX {
                continue;
            }
            let text = format_tick(tick);
            widest_y_label = widest_y_label.max(estimate_label_text_width_px(&text, font));
            y_axis.push(TextPrimitive::new(
                text,
                plot.left - tick_padding - 3.0,
                py + font * 0.35,
                font,
                style.axis_label_color,
                TextHAlign::Right,
            ));
        }
        frame.push_group(y_axis);

        if !config.x_label.is_empty() {
            let rows = if config.ticks { 3.0 } else { 2.0 };
            frame.push_group(
                PrimitiveGroup::new(CanvasLayerKind::Axis, "domain-label domain-label--x").with(
                    TextPrimitive::new(
                        config.x_label.clone(),
                        plot.left + plot.width() / 2.0,
                        plot.bottom + rows * font,
                        font,
                        style.axis_label_color,
                        TextHAlign::Center,
                    ),
                ),
            );
        }
        if !config.y_label.is_empty() {
            let x = (plot.left - tick_padding - 3.0 - widest_y_label - font * 0.5).max(font);
            frame.push_group(
                PrimitiveGroup::new(CanvasLayerKind::Axis, "domain-label domain-label--y").with(
                    TextPrimitive::new(
                        config.y_label.clone(),
                        x,
                        plot.top + plot.height() / 2.0,
                        font,
                        style.axis_label_color,
                        TextHAlign::Center,
                    )
                    .rotated(-90.0),
                ),
            );
        }
    }
}
