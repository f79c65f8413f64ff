use tracing::{debug, trace, warn};

use crate::core::{DEFAULT_TICK_COUNT, LinearScale, PlotArea, Viewport, flatten};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{PluginEvent, SpecificityChart};

/// Lower bound of the y domain's upper end.
pub const MIN_Y_DOMAIN_MAX: f64 = 100.0;

impl<R: Renderer> SpecificityChart<R> {
    #[must_use]
    pub fn x_domain(&self) -> (f64, f64) {
        self.core.model.x_scale.domain()
    }

    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        self.core.model.y_scale.domain()
    }

    /// Resizes the viewport; ranges are recomputed, records are untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        let plot = PlotArea::new(viewport, self.core.config.effective_padding())?;

        self.core.config.width = width;
        self.core.config.height = height;
        self.core.model.viewport = viewport;
        self.core.model.plot = plot;
        self.recompute_scales();

        debug!(width, height, "resized chart");
        self.emit_plugin_event(PluginEvent::Resized { width, height });
        Ok(())
    }

    /// Rebuilds the flattened dataset and everything derived from it.
    pub(super) fn refresh_layout(&mut self) {
        let (x_field, y_field) = (self.core.config.x_field, self.core.config.y_field);
        let model = &mut self.core.model;
        model.flattened = flatten(
            model.series.values().map(|entry| &entry.series),
            x_field,
            y_field,
        );
        model.flattened_x = model.flattened.iter().map(|record| record.x).collect();

        let flattened_x = &model.flattened_x;
        model
            .interaction
            .clamp_focus(flattened_x.len(), |index| flattened_x[index]);

        self.recompute_scales();
    }

    pub(super) fn recompute_scales(&mut self) {
        match self.compute_scales() {
            Ok((x_scale, y_scale)) => {
                self.core.model.x_scale = x_scale;
                self.core.model.y_scale = y_scale;
                trace!(
                    x_domain = ?x_scale.domain(),
                    y_domain = ?y_scale.domain(),
                    "recomputed scales"
                );
            }
            Err(err) => {
                warn!(error = %err, "keeping previous scales after failed recompute");
            }
        }
    }

    fn compute_scales(&self) -> ChartResult<(LinearScale, LinearScale)> {
        let model = &self.core.model;
        let plot = model.plot;

        let (x_min, x_max) = model
            .flattened
            .iter()
            .fold(None, |extent: Option<(f64, f64)>, record| {
                Some(match extent {
                    Some((min, max)) => (min.min(record.x), max.max(record.x)),
                    None => (record.x, record.x),
                })
            })
            .unwrap_or((0.0, 1.0));
        let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
        let y_max = model
            .flattened
            .iter()
            .map(|record| record.y)
            .fold(MIN_Y_DOMAIN_MAX, f64::max);

        let mut x_scale = LinearScale::new((x_min, x_max), (plot.left, plot.right))?;
        let mut y_scale = LinearScale::new((0.0, y_max), (plot.bottom, plot.top))?;
        if self.core.config.nice {
            x_scale = x_scale.nice(DEFAULT_TICK_COUNT);
            y_scale = y_scale.nice(DEFAULT_TICK_COUNT);
        }
        Ok((x_scale, y_scale))
    }
}
