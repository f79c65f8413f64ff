use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::{FocusState, HoverState};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub series_count: usize,
    pub flattened_len: usize,
    pub hover: HoverState,
    pub focus: FocusState,
    pub now_ms: f64,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    SeriesAdded { id: String, records_len: usize },
    SeriesRemoved { id: String },
    SeriesReplaced { id: String, records_len: usize },
    Drawn { duration_ms: f64 },
    FocusChanged { index: usize, series_ids: Vec<String> },
    PointerLeft,
    Resized { width: u32, height: u32 },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read chart context without mutating chart
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
