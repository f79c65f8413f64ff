pub mod curve;
pub mod scale;
pub mod series;
pub mod smoothing;
pub mod ticks;
pub mod types;

pub use curve::{Interpolation, PathCommand, PathData, PathPoint, build_path};
pub use scale::LinearScale;
pub use series::{
    DEFAULT_FAKE_MODIFIER, FlatRecord, MeanAxis, Series, SeriesMean, fake_points, flatten,
};
pub use smoothing::{AverageWindow, moving_average};
pub use ticks::{DEFAULT_TICK_COUNT, format_tick};
pub use types::{DataField, DataPoint, Padding, PlotArea, Viewport};
