use crate::core::{PathData, PathPoint, build_path, moving_average};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, PathPrimitive, PrimitiveGroup, RenderFrame, Renderer,
};

use super::SpecificityChart;

/// One series projected to pixels at the current clock time.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ProjectedSeries {
    pub(super) id: String,
    pub(super) color: Color,
    pub(super) path: PathData,
    /// `(cx, cy, radius)` of visible dots.
    pub(super) dots: Vec<(f64, f64, f64)>,
}

impl<R: Renderer> SpecificityChart<R> {
    /// Drawn path of `id` in viewport pixels, smoothing and interpolation
    /// applied.
    #[must_use]
    pub fn series_path(&self, id: &str) -> Option<PathData> {
        self.project_series()
            .into_iter()
            .find(|projected| projected.id == id)
            .map(|projected| projected.path)
    }

    /// Projects every series in draw order.
    pub(super) fn project_series(&self) -> Vec<ProjectedSeries> {
        let now = self.now_ms();
        let config = &self.core.config;
        let model = &self.core.model;
        let x_scale = model.x_scale;
        let y_scale = model.y_scale;
        let window = config
            .average
            .resolve(model.longest_series_len(), model.plot.width());

        model
            .render_order
            .iter()
            .filter_map(|id| model.series.get(id).map(|entry| (id, entry)))
            .map(|(id, entry)| {
                let shown = entry.path.value_at(now);
                let smoothed = moving_average(&shown, window);
                let pixels: Vec<PathPoint> = smoothed
                    .iter()
                    .map(|point| (x_scale.map(point.x), y_scale.map(point.y)))
                    .collect();
                let dots = if config.dots {
                    entry
                        .dots
                        .iter()
                        .map(|dot| dot.value_at(now))
                        .filter(|dot| dot.radius > 0.0)
                        .map(|dot| (x_scale.map(dot.x), y_scale.map(dot.y), dot.radius))
                        .collect()
                } else {
                    Vec::new()
                };
                ProjectedSeries {
                    id: id.clone(),
                    color: entry.color,
                    path: build_path(&pixels, config.linetype),
                    dots,
                }
            })
            .collect()
    }

    pub(super) fn append_series_scene(&self, frame: &mut RenderFrame, projected: &[ProjectedSeries]) {
        let style = &self.core.config.style;
        for series in projected {
            let mut group = PrimitiveGroup::new(
                CanvasLayerKind::Series,
                format!("group group--{}", series.id),
            )
            .with_legend(series.id.clone());

            if !series.path.is_empty() {
                let mut path =
                    PathPrimitive::new(series.path.clone(), style.series_line_width, series.color)
                        .with_class("line-path");
                if self.core.config.fill {
                    path = path.with_fill(series.color.with_alpha(style.fill_alpha));
                }
                group.push(path);
            }
            for &(cx, cy, radius) in &series.dots {
                group.push(CirclePrimitive::new(cx, cy, radius, series.color).with_class("dots__dot"));
            }
            frame.push_group(group);
        }
    }
}
