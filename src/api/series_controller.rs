use tracing::{debug, trace};

use crate::core::{DEFAULT_FAKE_MODIFIER, DataPoint, FlatRecord, Series, fake_points};
use crate::css::{ExtractOptions, SelectorRecord};
use crate::error::{ChartError, ChartResult};
use crate::render::transition::DEFAULT_DURATION_MS;
use crate::render::{Animated, Color, DotState, Easing, Renderer};

use super::{
    PluginEvent, SeriesSource, SpecificityChart, StackOrder,
    chart_core::DynExtractor,
    chart_model::SeriesEntry,
};

/// Start delay of one dot's transition; points further right or higher
/// settle later, which gives the reveal its wave.
#[must_use]
pub fn dot_delay_ms(point: DataPoint, series_len: usize, duration_ms: f64) -> f64 {
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return 0.0;
    }
    (point.x * 0.8 + point.y * series_len as f64 * 4.0) / duration_ms
}

impl<R: Renderer> SpecificityChart<R> {
    /// Adds one series, or one per entry of a [`SeriesSource::Named`] map.
    ///
    /// Ids already present are skipped silently. Without `id` a single
    /// source gets the next free ordinal. All sources are extracted before
    /// the chart is touched, so a CSS error leaves it unchanged. New series
    /// are drawn on top until the next [`draw`](Self::draw) restacks them.
    pub fn add(&mut self, source: impl Into<SeriesSource>, id: Option<&str>) -> ChartResult<()> {
        let prepared = self.prepare_series(source.into(), id)?;
        if prepared.is_empty() {
            return Ok(());
        }
        for (series_id, records) in prepared {
            self.insert_series(series_id, records);
        }
        Ok(())
    }

    /// Removes a series. Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.core.model.series.shift_remove(id).is_none() {
            debug!(series_id = id, "remove ignored: unknown series");
            return false;
        }
        self.core.model.render_order.retain(|entry| entry != id);
        self.refresh_layout();
        debug!(
            series_id = id,
            remaining = self.core.model.series.len(),
            "removed series"
        );
        self.emit_plugin_event(PluginEvent::SeriesRemoved { id: id.to_owned() });
        true
    }

    /// Removes `id` when present, otherwise adds `source` under `id`.
    ///
    /// Returns whether the series is present afterwards.
    pub fn toggle(&mut self, id: &str, source: impl Into<SeriesSource>) -> ChartResult<bool> {
        if self.remove(id) {
            return Ok(false);
        }
        self.add(source, Some(id))?;
        Ok(self.has_series(id))
    }

    /// Hot-swaps the chart's primary series.
    ///
    /// Every series but the most recently added one is dropped; that one
    /// takes the new records (and `id`, if given) and animates from what is
    /// currently shown, pulled halfway down over the first sixth of
    /// `duration_ms`, up to the new values over the rest. On an empty chart
    /// this is [`add`](Self::add).
    pub fn replace_with(
        &mut self,
        source: impl Into<SeriesSource>,
        id: Option<&str>,
        duration_ms: f64,
    ) -> ChartResult<()> {
        let source = source.into();
        if self.core.model.series.is_empty() {
            return self.add(source, id);
        }
        if matches!(source, SeriesSource::Named(_)) {
            return Err(ChartError::InvalidData(
                "replace_with takes a single source, not a named map".to_owned(),
            ));
        }
        let records = leaf_records(&self.core.extractor, self.extract_options(), source)?;

        let now = self.now_ms();
        let duration_ms = sanitize_duration(duration_ms);
        let (pull_ms, settle_ms) = (duration_ms / 6.0, duration_ms * 5.0 / 6.0);
        let (x_field, y_field) = (self.core.config.x_field, self.core.config.y_field);
        let radius = self.dot_radius();

        let Some((kept_id, mut entry)) = self.core.model.series.pop() else {
            return Ok(());
        };
        let dropped: Vec<String> = self
            .core
            .model
            .series
            .drain(..)
            .map(|(dropped_id, _)| dropped_id)
            .collect();
        let series_id = id.map_or(kept_id, str::to_owned);

        let shown = entry.path.value_at(now);
        entry.series.rename(series_id.clone());
        entry.series.set_records(records, x_field, y_field);
        let target = entry.series.points(x_field, y_field);

        entry.path.transition_to(
            now,
            fake_points(&shown, DEFAULT_FAKE_MODIFIER),
            pull_ms,
            0.0,
            Easing::CubicInOut,
        );
        entry.path.then(now, target.clone(), settle_ms, Easing::Elastic);

        let shown_dots: Vec<DotState> = entry.dots.iter().map(|dot| dot.value_at(now)).collect();
        entry.dots = target
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let from = shown_dots.get(i).copied().unwrap_or(DotState {
                    x: point.x,
                    y: 0.0,
                    radius: 0.0,
                });
                let mut dot = Animated::new(from);
                dot.transition_to(
                    now,
                    DotState {
                        y: from.y / DEFAULT_FAKE_MODIFIER,
                        ..from
                    },
                    pull_ms,
                    0.0,
                    Easing::CubicInOut,
                );
                dot.then(
                    now,
                    DotState {
                        x: point.x,
                        y: point.y,
                        radius,
                    },
                    settle_ms,
                    Easing::Elastic,
                );
                dot
            })
            .collect();

        let records_len = entry.series.len();
        self.core.model.series.insert(series_id.clone(), entry);
        self.core.model.render_order = vec![series_id.clone()];
        self.refresh_layout();

        for dropped_id in dropped {
            debug!(series_id = %dropped_id, "dropped series during replace");
            self.emit_plugin_event(PluginEvent::SeriesRemoved { id: dropped_id });
        }
        debug!(
            series_id = %series_id,
            record_count = records_len,
            duration_ms,
            "replaced series"
        );
        self.emit_plugin_event(PluginEvent::SeriesReplaced {
            id: series_id,
            records_len,
        });
        Ok(())
    }

    /// Re-animates every series to its records, then restacks them.
    pub fn draw(&mut self, duration_ms: f64, easing: Easing) {
        let duration_ms = sanitize_duration(duration_ms);
        let ids: Vec<String> = self.core.model.series.keys().cloned().collect();
        for series_id in &ids {
            self.animate_series(series_id, duration_ms, easing);
        }
        self.order();
        debug!(series = ids.len(), duration_ms, ?easing, "drew series");
        self.emit_plugin_event(PluginEvent::Drawn { duration_ms });
    }

    /// [`draw`](Self::draw) with the default duration and elastic dots.
    pub fn redraw(&mut self) {
        self.draw(DEFAULT_DURATION_MS, Easing::Elastic);
    }

    /// Restacks series by their mean on the configured axis.
    pub fn order(&mut self) {
        let axis = self.core.config.order;
        let direction = self.core.config.order_direction;
        let mut ranked: Vec<(f64, String)> = self
            .core
            .model
            .series
            .iter()
            .map(|(series_id, entry)| (entry.series.mean().axis(axis), series_id.clone()))
            .collect();
        ranked.sort_by(|left, right| match direction {
            StackOrder::Ascending => left.0.total_cmp(&right.0),
            StackOrder::Descending => right.0.total_cmp(&left.0),
        });
        self.core.model.render_order = ranked.into_iter().map(|(_, series_id)| series_id).collect();
        trace!(order = ?self.core.model.render_order, "restacked series");
    }

    #[must_use]
    pub fn series(&self, id: &str) -> Option<&Series> {
        self.core.model.series.get(id).map(|entry| &entry.series)
    }

    /// Series ids in insertion order.
    pub fn series_ids(&self) -> impl Iterator<Item = &str> {
        self.core.model.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.core.model.series.len()
    }

    #[must_use]
    pub fn has_series(&self, id: &str) -> bool {
        self.core.model.series.contains_key(id)
    }

    #[must_use]
    pub fn series_color(&self, id: &str) -> Option<Color> {
        self.core.model.series.get(id).map(|entry| entry.color)
    }

    /// Series ids in draw order; the last one is drawn on top.
    #[must_use]
    pub fn render_order(&self) -> &[String] {
        &self.core.model.render_order
    }

    /// Every record of every series, sorted by the x field.
    #[must_use]
    pub fn flattened(&self) -> &[FlatRecord] {
        &self.core.model.flattened
    }

    /// Line points of `id` as displayed at the current clock time.
    #[must_use]
    pub fn displayed_points(&self, id: &str) -> Option<Vec<DataPoint>> {
        let now = self.now_ms();
        self.core
            .model
            .series
            .get(id)
            .map(|entry| entry.path.value_at(now))
    }

    /// Dot states of `id` as displayed at the current clock time.
    #[must_use]
    pub fn displayed_dots(&self, id: &str) -> Option<Vec<DotState>> {
        let now = self.now_ms();
        self.core
            .model
            .series
            .get(id)
            .map(|entry| entry.dots.iter().map(|dot| dot.value_at(now)).collect())
    }

    pub(super) fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::default()
            .with_important(self.core.config.important)
            .with_sentinels(self.core.config.fill)
    }

    fn dot_radius(&self) -> f64 {
        if self.core.config.dots {
            self.core.config.style.dot_radius_px
        } else {
            0.0
        }
    }

    fn prepare_series(
        &self,
        source: SeriesSource,
        id: Option<&str>,
    ) -> ChartResult<Vec<(String, Vec<SelectorRecord>)>> {
        let mut leaves = Vec::new();
        source.into_leaves(id.map(str::to_owned), &mut leaves);

        let mut pending: Vec<(String, SeriesSource)> = Vec::with_capacity(leaves.len());
        for (leaf_id, leaf) in leaves {
            let series_id = leaf_id.unwrap_or_else(|| self.core.model.next_ordinal_id());
            if self.core.model.series.contains_key(&series_id)
                || pending.iter().any(|(pending_id, _)| *pending_id == series_id)
            {
                debug!(series_id = %series_id, "add ignored: series id already present");
                continue;
            }
            pending.push((series_id, leaf));
        }

        extract_pending(&self.core.extractor, self.extract_options(), pending)
    }

    fn insert_series(&mut self, series_id: String, records: Vec<SelectorRecord>) {
        let (x_field, y_field) = (self.core.config.x_field, self.core.config.y_field);
        let series = Series::new(series_id.clone(), records, x_field, y_field);
        let color = self
            .core
            .config
            .style
            .series_color(self.core.model.color_cursor);
        self.core.model.color_cursor += 1;

        let start = series.fake_points(x_field, y_field, DEFAULT_FAKE_MODIFIER);
        let dots = start
            .iter()
            .map(|point| {
                Animated::new(DotState {
                    x: point.x,
                    y: point.y,
                    radius: 0.0,
                })
            })
            .collect();
        let records_len = series.len();

        self.core.model.series.insert(
            series_id.clone(),
            SeriesEntry {
                series,
                color,
                path: Animated::new(start),
                dots,
            },
        );
        self.core.model.render_order.push(series_id.clone());
        self.refresh_layout();
        self.animate_series(&series_id, DEFAULT_DURATION_MS, Easing::Elastic);

        debug!(series_id = %series_id, record_count = records_len, "added series");
        self.emit_plugin_event(PluginEvent::SeriesAdded {
            id: series_id,
            records_len,
        });
    }

    /// Starts the path and dot transitions of one series toward its records.
    fn animate_series(&mut self, series_id: &str, duration_ms: f64, easing: Easing) {
        let now = self.now_ms();
        let (x_field, y_field) = (self.core.config.x_field, self.core.config.y_field);
        let radius = self.dot_radius();
        let Some(entry) = self.core.model.series.get_mut(series_id) else {
            return;
        };

        let points = entry.series.points(x_field, y_field);
        entry
            .path
            .transition_to(now, points.clone(), duration_ms, 0.0, Easing::CubicInOut);

        entry.dots.truncate(points.len());
        for point in &points[entry.dots.len()..] {
            entry.dots.push(Animated::new(DotState {
                x: point.x,
                y: point.y / DEFAULT_FAKE_MODIFIER,
                radius: 0.0,
            }));
        }
        let len = points.len();
        for (dot, point) in entry.dots.iter_mut().zip(&points) {
            let target = DotState {
                x: point.x,
                y: point.y,
                radius,
            };
            dot.transition_to(
                now,
                target,
                duration_ms,
                dot_delay_ms(*point, len, duration_ms),
                easing,
            );
        }
    }
}

fn sanitize_duration(duration_ms: f64) -> f64 {
    if duration_ms.is_finite() {
        duration_ms.max(0.0)
    } else {
        DEFAULT_DURATION_MS
    }
}

fn leaf_records(
    extractor: &DynExtractor,
    options: ExtractOptions,
    leaf: SeriesSource,
) -> ChartResult<Vec<SelectorRecord>> {
    match leaf {
        SeriesSource::Css(css) => extractor.extract(&css, options),
        SeriesSource::Records(records) => Ok(records),
        SeriesSource::Named(_) => Err(ChartError::InvalidData(
            "named sources must be flattened before extraction".to_owned(),
        )),
    }
}

#[cfg(not(feature = "parallel-extract"))]
fn extract_pending(
    extractor: &DynExtractor,
    options: ExtractOptions,
    pending: Vec<(String, SeriesSource)>,
) -> ChartResult<Vec<(String, Vec<SelectorRecord>)>> {
    pending
        .into_iter()
        .map(|(series_id, leaf)| Ok((series_id, leaf_records(extractor, options, leaf)?)))
        .collect()
}

#[cfg(feature = "parallel-extract")]
fn extract_pending(
    extractor: &DynExtractor,
    options: ExtractOptions,
    pending: Vec<(String, SeriesSource)>,
) -> ChartResult<Vec<(String, Vec<SelectorRecord>)>> {
    use rayon::prelude::*;

    pending
        .into_par_iter()
        .map(|(series_id, leaf)| Ok((series_id, leaf_records(extractor, options, leaf)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::dot_delay_ms;
    use crate::core::DataPoint;
    use approx::assert_relative_eq;

    #[test]
    fn dot_delay_grows_with_x_and_y() {
        let low = dot_delay_ms(DataPoint::new(1.0, 10.0), 5, 500.0);
        let right = dot_delay_ms(DataPoint::new(4.0, 10.0), 5, 500.0);
        let high = dot_delay_ms(DataPoint::new(1.0, 40.0), 5, 500.0);
        assert!(right > low);
        assert!(high > low);
        assert_relative_eq!(low, (0.8 + 200.0) / 500.0);
        assert_eq!(dot_delay_ms(DataPoint::new(1.0, 1.0), 5, 0.0), 0.0);
    }
}
