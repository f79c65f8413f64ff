use serde::{Deserialize, Serialize};

use crate::core::types::{DataField, DataPoint};
use crate::css::SelectorRecord;

/// Default divisor applied to y values of the animation start state.
pub const DEFAULT_FAKE_MODIFIER: f64 = 2.0;

/// Centroid of a series over the plotted fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesMean {
    pub x: f64,
    pub y: f64,
}

impl SeriesMean {
    /// Mean of both fields; `(0, 0)` for an empty slice.
    #[must_use]
    pub fn from_records(records: &[SelectorRecord], x_field: DataField, y_field: DataField) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let count = records.len() as f64;
        let (sum_x, sum_y) = records.iter().fold((0.0, 0.0), |(sx, sy), record| {
            (sx + record.value(x_field), sy + record.value(y_field))
        });
        Self {
            x: sum_x / count,
            y: sum_y / count,
        }
    }

    #[must_use]
    pub fn axis(self, axis: MeanAxis) -> f64 {
        match axis {
            MeanAxis::X => self.x,
            MeanAxis::Y => self.y,
        }
    }
}

/// Which centroid component drives stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeanAxis {
    #[default]
    X,
    Y,
}

/// One named dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    id: String,
    records: Vec<SelectorRecord>,
    mean: SeriesMean,
}

impl Series {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        records: Vec<SelectorRecord>,
        x_field: DataField,
        y_field: DataField,
    ) -> Self {
        let mean = SeriesMean::from_records(&records, x_field, y_field);
        Self {
            id: id.into(),
            records,
            mean,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn records(&self) -> &[SelectorRecord] {
        &self.records
    }

    #[must_use]
    pub fn mean(&self) -> SeriesMean {
        self.mean
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn rename(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Swaps the records and recomputes the centroid.
    pub(crate) fn set_records(
        &mut self,
        records: Vec<SelectorRecord>,
        x_field: DataField,
        y_field: DataField,
    ) {
        self.mean = SeriesMean::from_records(&records, x_field, y_field);
        self.records = records;
    }

    /// Records projected onto the plotted fields, in record order.
    #[must_use]
    pub fn points(&self, x_field: DataField, y_field: DataField) -> Vec<DataPoint> {
        self.records
            .iter()
            .map(|record| DataPoint::new(record.value(x_field), record.value(y_field)))
            .collect()
    }

    /// Points pulled toward the baseline, used as an animation start state.
    #[must_use]
    pub fn fake_points(&self, x_field: DataField, y_field: DataField, modifier: f64) -> Vec<DataPoint> {
        fake_points(&self.points(x_field, y_field), modifier)
    }
}

/// Divides every y by `modifier`; a zero modifier flattens to the baseline.
#[must_use]
pub fn fake_points(points: &[DataPoint], modifier: f64) -> Vec<DataPoint> {
    points
        .iter()
        .map(|point| {
            let y = if modifier == 0.0 { 0.0 } else { point.y / modifier };
            DataPoint::new(point.x, y)
        })
        .collect()
}

/// A record tagged with its owning series, as seen by hover resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub series_id: String,
    pub x: f64,
    pub y: f64,
    pub record: SelectorRecord,
}

/// Merges all series into one list sorted by x.
///
/// The sort is stable, so records sharing an x keep series insertion order.
#[must_use]
pub fn flatten<'a>(
    series: impl IntoIterator<Item = &'a Series>,
    x_field: DataField,
    y_field: DataField,
) -> Vec<FlatRecord> {
    let mut flat: Vec<FlatRecord> = series
        .into_iter()
        .flat_map(|series| {
            series.records.iter().map(move |record| FlatRecord {
                series_id: series.id.clone(),
                x: record.value(x_field),
                y: record.value(y_field),
                record: record.clone(),
            })
        })
        .collect();
    flat.sort_by(|left, right| left.x.total_cmp(&right.x));
    flat
}

#[cfg(test)]
mod tests {
    use super::{Series, fake_points, flatten};
    use crate::core::types::{DataField, DataPoint};
    use crate::css::SelectorRecord;

    fn record(index: u32, specificity: u32) -> SelectorRecord {
        SelectorRecord {
            index,
            line: index,
            specificity,
            selector: format!(".s{index}"),
            important: Vec::new(),
        }
    }

    #[test]
    fn mean_uses_plotted_fields() {
        let series = Series::new(
            "a",
            vec![record(1, 10), record(3, 30)],
            DataField::SelectorIndex,
            DataField::Specificity,
        );
        assert_eq!(series.mean().x, 2.0);
        assert_eq!(series.mean().y, 20.0);
    }

    #[test]
    fn zero_modifier_flattens() {
        let points = [DataPoint::new(1.0, 10.0), DataPoint::new(2.0, 30.0)];
        assert_eq!(
            fake_points(&points, 2.0),
            vec![DataPoint::new(1.0, 5.0), DataPoint::new(2.0, 15.0)]
        );
        assert!(fake_points(&points, 0.0).iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn flatten_sorts_by_x_and_keeps_ties_stable() {
        let a = Series::new(
            "a",
            vec![record(1, 10), record(2, 20)],
            DataField::SelectorIndex,
            DataField::Specificity,
        );
        let b = Series::new(
            "b",
            vec![record(1, 100)],
            DataField::SelectorIndex,
            DataField::Specificity,
        );
        let flat = flatten([&a, &b], DataField::SelectorIndex, DataField::Specificity);
        let order: Vec<(&str, f64)> = flat.iter().map(|r| (r.series_id.as_str(), r.x)).collect();
        assert_eq!(order, vec![("a", 1.0), ("b", 1.0), ("a", 2.0)]);
    }
}
