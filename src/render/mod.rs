mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod svg_backend;
pub mod transition;

pub use frame::{PrimitiveGroup, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, Primitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};
pub use svg_backend::SvgRenderer;
pub use transition::{Animated, AnimationClock, DotState, Easing, Interpolate, Tween};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
