use serde::{Deserialize, Serialize};

use crate::core::{
    AverageWindow, DataField, Interpolation, MeanAxis, Padding, PlotArea, Viewport,
};
use crate::error::{ChartError, ChartResult};

use super::render_style::{ChartStyle, validate_chart_style};

/// Direction in which series are stacked by their mean.
///
/// Series are drawn in sorted order, so the last one ends up on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOrder {
    /// Smallest mean drawn first, largest on top.
    Ascending,
    /// Largest mean drawn first, smallest on top.
    #[default]
    Descending,
}

/// Host widget tag parsed from [`ChartConfig::selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountPoint {
    /// `.name`: a style class on the widget.
    Class(String),
    /// `#name`: the widget's name.
    Id(String),
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every field has a default, so
/// `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub padding: Padding,
    /// Draw a marker per record.
    #[serde(default)]
    pub dots: bool,
    /// Fill the area under each line; also keeps the zero-height boundary
    /// records so the fill closes on the baseline.
    #[serde(default)]
    pub fill: bool,
    /// Boost scores by the share of `!important` declarations.
    #[serde(default)]
    pub important: bool,
    /// Mount point of the chart widget, `.class` or `#id`; see
    /// [`ChartConfig::mount_point`].
    #[serde(default = "default_selector")]
    pub selector: String,
    #[serde(default)]
    pub linetype: Interpolation,
    #[serde(default = "default_x_field", alias = "x_name")]
    pub x_field: DataField,
    #[serde(default = "default_y_field", alias = "y_name")]
    pub y_field: DataField,
    /// Show axis tick labels with padding; grows the bottom padding by one
    /// font size.
    #[serde(default)]
    pub ticks: bool,
    #[serde(default)]
    pub average: AverageWindow,
    #[serde(default)]
    pub order: MeanAxis,
    #[serde(default)]
    pub order_direction: StackOrder,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    /// Round scale domains to human-friendly bounds.
    #[serde(default = "default_nice")]
    pub nice: bool,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(default_width(), default_height())
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
            dots: false,
            fill: false,
            important: false,
            selector: default_selector(),
            linetype: Interpolation::default(),
            x_field: default_x_field(),
            y_field: default_y_field(),
            ticks: false,
            average: AverageWindow::default(),
            order: MeanAxis::default(),
            order_direction: StackOrder::default(),
            font_size_px: default_font_size_px(),
            x_label: default_x_label(),
            y_label: default_y_label(),
            nice: default_nice(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Padding actually reserved around the plot, including room for tick
    /// labels.
    #[must_use]
    pub fn effective_padding(&self) -> Padding {
        let mut padding = self.padding;
        if self.ticks {
            padding.bottom += self.font_size_px;
        }
        padding
    }

    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::new(self.viewport(), self.effective_padding())
    }

    /// Parses `selector` as a single `.class` or `#id`.
    ///
    /// Anything else (compound selectors, combinators, bare words) is `None`.
    #[must_use]
    pub fn mount_point(&self) -> Option<MountPoint> {
        let selector = self.selector.trim();
        let mut chars = selector.chars();
        let sigil = chars.next()?;
        let name = chars.as_str();
        let valid = !name.is_empty()
            && !name.starts_with(|ch: char| ch.is_ascii_digit())
            && name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !valid {
            return None;
        }
        match sigil {
            '.' => Some(MountPoint::Class(name.to_owned())),
            '#' => Some(MountPoint::Id(name.to_owned())),
            _ => None,
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_dots(mut self, dots: bool) -> Self {
        self.dots = dots;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_linetype(mut self, linetype: Interpolation) -> Self {
        self.linetype = linetype;
        self
    }

    /// Sets the record fields plotted on the x and y axes.
    #[must_use]
    pub fn with_fields(mut self, x_field: DataField, y_field: DataField) -> Self {
        self.x_field = x_field;
        self.y_field = y_field;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_average(mut self, average: AverageWindow) -> Self {
        self.average = average;
        self
    }

    #[must_use]
    pub fn with_order(mut self, axis: MeanAxis, direction: StackOrder) -> Self {
        self.order = axis;
        self.order_direction = direction;
        self
    }

    #[must_use]
    pub fn with_font_size_px(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport().is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        self.padding.validate()?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if self.x_field == self.y_field {
            return Err(ChartError::InvalidConfig(format!(
                "x and y must plot different fields, both are `{:?}`",
                self.x_field
            )));
        }
        validate_chart_style(&self.style)?;
        self.plot_area().map(|_| ())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    400
}

fn default_selector() -> String {
    ".js-graph".to_owned()
}

fn default_x_field() -> DataField {
    DataField::SelectorIndex
}

fn default_y_field() -> DataField {
    DataField::Specificity
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_x_label() -> String {
    "Location in stylesheet".to_owned()
}

fn default_y_label() -> String {
    "Specificity".to_owned()
}

fn default_nice() -> bool {
    true
}
