mod axis_scene_builder;
mod chart;
mod chart_config;
mod chart_core;
mod chart_init;
mod chart_model;
mod chart_runtime;
mod chart_snapshot;
mod hover_controller;
mod info_box_builder;
mod json_contract;
mod layout_helpers;
mod legend_builder;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod render_style;
mod scale_coordinator;
mod series_controller;
mod series_scene_builder;
mod series_source;
mod snapshot_controller;

pub use axis_scene_builder::AXIS_TICK_PADDING_PX;
pub use chart::SpecificityChart;
pub use chart_config::{ChartConfig, MountPoint, StackOrder};
pub use chart_core::{DynExtractor, DynSpecificityCalculator, DynStylesheetParser};
pub use chart_snapshot::{ChartSnapshot, SeriesSnapshot};
pub use info_box_builder::INFO_OFFSET_X_PX;
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
pub use legend_builder::LegendEntry;
pub use render_style::{CATEGORY10, ChartStyle};
pub use scale_coordinator::MIN_Y_DOMAIN_MAX;
pub use series_controller::dot_delay_ms;
pub use series_source::SeriesSource;

pub use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};
