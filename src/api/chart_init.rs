use tracing::debug;

use crate::core::LinearScale;
use crate::css::{
    CssSyntaxParser, SelectorSpecificity, SpecificityCalculator, SpecificityExtractor,
    StylesheetParser,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{
    ChartConfig, SpecificityChart,
    chart_core::{ChartCore, DynExtractor},
    chart_model::ChartModel,
    chart_runtime::ChartRuntimeState,
};

impl<R: Renderer> SpecificityChart<R> {
    /// Creates a chart with the built-in CSS parser and specificity
    /// calculator.
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        Self::with_extractor(renderer, config, CssSyntaxParser, SelectorSpecificity)
    }

    /// Creates a chart extracting records through the given collaborators.
    pub fn with_extractor<P, C>(
        renderer: R,
        config: ChartConfig,
        parser: P,
        calculator: C,
    ) -> ChartResult<Self>
    where
        P: StylesheetParser + Send + Sync + 'static,
        C: SpecificityCalculator + Send + Sync + 'static,
    {
        config.validate()?;

        let viewport = config.viewport();
        let plot = config.plot_area()?;
        let x_scale = LinearScale::new((0.0, 1.0), (plot.left, plot.right))?;
        let y_scale = LinearScale::new((0.0, 100.0), (plot.bottom, plot.top))?;
        let extractor: DynExtractor = SpecificityExtractor::new(Box::new(parser), Box::new(calculator));

        debug!(
            width = viewport.width,
            height = viewport.height,
            linetype = ?config.linetype,
            "created specificity chart"
        );

        let mut chart = Self {
            renderer,
            core: ChartCore {
                config,
                extractor,
                model: ChartModel::new(viewport, plot, x_scale, y_scale),
                runtime: ChartRuntimeState::default(),
            },
        };
        chart.recompute_scales();
        Ok(chart)
    }
}
