use crate::css::{SpecificityCalculator, SpecificityExtractor, StylesheetParser};

use super::{ChartConfig, chart_model::ChartModel, chart_runtime::ChartRuntimeState};

/// Parser half of an injected extractor.
pub type DynStylesheetParser = Box<dyn StylesheetParser + Send + Sync>;
/// Calculator half of an injected extractor.
pub type DynSpecificityCalculator = Box<dyn SpecificityCalculator + Send + Sync>;
/// Extractor with type-erased collaborators, as owned by the chart.
pub type DynExtractor = SpecificityExtractor<DynStylesheetParser, DynSpecificityCalculator>;

/// Internal chart core state used by the public facade (`SpecificityChart`).
pub(super) struct ChartCore {
    pub(super) config: ChartConfig,
    pub(super) extractor: DynExtractor,
    pub(super) model: ChartModel,
    pub(super) runtime: ChartRuntimeState,
}
