use tracing::trace;

use crate::core::{LinearScale, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartConfig, ChartStyle, chart_core::ChartCore};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Interactive specificity chart bound to one rendering backend.
///
/// `SpecificityChart` owns the series, the scales derived from them, the
/// hover state and the animation timelines. Host applications feed it CSS,
/// pointer events and clock ticks, then call [`SpecificityChart::render`].
pub struct SpecificityChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: ChartCore,
}

impl<R: Renderer> std::fmt::Debug for SpecificityChart<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecificityChart")
            .field("config", &self.core.config)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> SpecificityChart<R> {
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.core.config
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.core.config.style
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.core.model.plot
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.core.model.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.core.model.y_scale
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.core.runtime.clock.now_ms()
    }

    /// Moves the animation clock forward by `delta_ms`.
    pub fn advance(&mut self, delta_ms: f64) {
        self.core.runtime.clock.advance(delta_ms);
        self.settle_animations();
    }

    /// Sets the animation clock, e.g. from a host frame clock. Time never
    /// runs backwards.
    pub fn set_time(&mut self, now_ms: f64) {
        self.core.runtime.clock.set(now_ms);
        self.settle_animations();
    }

    /// Whether any path or dot is still mid-transition.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        let now = self.now_ms();
        self.core.model.series.values().any(|entry| {
            entry.path.is_animating(now) || entry.dots.iter().any(|dot| dot.is_animating(now))
        })
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        trace!(
            groups = frame.groups.len(),
            primitives = frame.primitive_count(),
            "rendered frame"
        );
        self.emit_plugin_event(super::PluginEvent::Rendered);
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.emit_plugin_event(super::PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn settle_animations(&mut self) {
        let now = self.now_ms();
        for entry in self.core.model.series.values_mut() {
            entry.path.settle(now);
            for dot in &mut entry.dots {
                dot.settle(now);
            }
        }
    }
}
