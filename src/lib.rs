//! specificity-graph: CSS selector specificity extraction and an
//! interactive, animated specificity line chart.
//!
//! The [`css`] module turns stylesheet text into per-selector records. The
//! [`api::SpecificityChart`] facade owns series built from those records,
//! derives scales, resolves hover focus and animates changes, and hands a
//! backend-agnostic [`render::RenderFrame`] to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod css;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfig, SeriesSource, SpecificityChart};
pub use css::{SelectorRecord, extract};
pub use error::{ChartError, ChartResult};
