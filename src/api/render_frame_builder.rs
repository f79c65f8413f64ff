use crate::render::{
    CanvasLayerKind, Color, PrimitiveGroup, RectPrimitive, RenderFrame, Renderer,
};

use super::SpecificityChart;

impl<R: Renderer> SpecificityChart<R> {
    /// Materializes the current state, animations sampled at the clock's
    /// time, into a backend-agnostic frame.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let model = &self.core.model;
        let style = &self.core.config.style;
        let plot = model.plot;
        let mut frame = RenderFrame::new(model.viewport);

        if style.background_color.alpha > 0.0 {
            frame.push_group(
                PrimitiveGroup::new(CanvasLayerKind::Background, "background").with(
                    RectPrimitive::new(
                        0.0,
                        0.0,
                        f64::from(model.viewport.width),
                        f64::from(model.viewport.height),
                        style.background_color,
                    ),
                ),
            );
        }

        self.append_axis_scene(&mut frame);

        let projected = self.project_series();
        self.append_series_scene(&mut frame, &projected);
        self.append_legend_scene(&mut frame, &projected);

        frame.push_group(
            PrimitiveGroup::new(CanvasLayerKind::Overlay, "overlay").with(RectPrimitive::new(
                plot.left,
                plot.top,
                plot.width(),
                plot.height(),
                Color::TRANSPARENT,
            )),
        );

        self.append_focus_scene(&mut frame);
        frame
    }
}
