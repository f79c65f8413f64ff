use serde::{Deserialize, Serialize};

use crate::core::types::DataPoint;

/// Horizontal pixels covered by one averaging window in `Auto` mode.
pub const AUTO_WINDOW_PIXELS: f64 = 8.0;

/// Moving average applied to drawn lines.
///
/// Serialized as `false` (off), `true` (auto) or a window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AverageRepr", into = "AverageRepr")]
pub enum AverageWindow {
    #[default]
    Off,
    /// Window sized from the longest series and the plot width.
    Auto,
    Window(usize),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AverageRepr {
    Flag(bool),
    Size(usize),
}

impl From<AverageRepr> for AverageWindow {
    fn from(repr: AverageRepr) -> Self {
        match repr {
            AverageRepr::Flag(false) | AverageRepr::Size(0) => Self::Off,
            AverageRepr::Flag(true) => Self::Auto,
            AverageRepr::Size(size) => Self::Window(size),
        }
    }
}

impl From<AverageWindow> for AverageRepr {
    fn from(window: AverageWindow) -> Self {
        match window {
            AverageWindow::Off => Self::Flag(false),
            AverageWindow::Auto => Self::Flag(true),
            AverageWindow::Window(size) => Self::Size(size),
        }
    }
}

impl AverageWindow {
    /// Concrete window size; `1` means no smoothing.
    #[must_use]
    pub fn resolve(self, longest_series: usize, plot_width: f64) -> usize {
        match self {
            Self::Off => 1,
            Self::Window(size) => size.max(1),
            Self::Auto => {
                let windows = plot_width / AUTO_WINDOW_PIXELS;
                if !windows.is_finite() || windows <= 0.0 {
                    return 1;
                }
                ((longest_series as f64 / windows).round() as usize).max(1)
            }
        }
    }
}

/// Replaces interior points with the mean of each full window of `window`
/// consecutive interior points. The first and last points are kept.
#[must_use]
pub fn moving_average(points: &[DataPoint], window: usize) -> Vec<DataPoint> {
    if window <= 1 || points.len() < 3 {
        return points.to_vec();
    }

    let interior = &points[1..points.len() - 1];
    let size = window as f64;
    let mut out = Vec::with_capacity(interior.len() + 2);
    out.push(points[0]);
    out.extend(interior.windows(window).map(|chunk| {
        let (sum_x, sum_y) = chunk
            .iter()
            .fold((0.0, 0.0), |(sx, sy), point| (sx + point.x, sy + point.y));
        DataPoint::new(sum_x / size, sum_y / size)
    }));
    out.push(points[points.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::{AverageWindow, moving_average};
    use crate::core::types::DataPoint;

    fn pts(values: &[(f64, f64)]) -> Vec<DataPoint> {
        values.iter().map(|&(x, y)| DataPoint::new(x, y)).collect()
    }

    #[test]
    fn keeps_end_points_and_averages_interior() {
        let input = pts(&[(0.0, 0.0), (1.0, 10.0), (2.0, 20.0), (3.0, 30.0), (4.0, 0.0)]);
        let out = moving_average(&input, 2);
        assert_eq!(
            out,
            pts(&[(0.0, 0.0), (1.5, 15.0), (2.5, 25.0), (4.0, 0.0)])
        );
    }

    #[test]
    fn window_larger_than_interior_leaves_only_ends() {
        let input = pts(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)]);
        assert_eq!(moving_average(&input, 5), pts(&[(0.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn auto_window_scales_with_density() {
        assert_eq!(AverageWindow::Auto.resolve(2000, 880.0), 18);
        assert_eq!(AverageWindow::Auto.resolve(10, 880.0), 1);
        assert_eq!(AverageWindow::Off.resolve(2000, 880.0), 1);
        assert_eq!(AverageWindow::Window(0).resolve(10, 880.0), 1);
    }

    #[test]
    fn serde_accepts_bool_or_number() {
        let parsed: Vec<AverageWindow> =
            serde_json::from_str("[false, true, 4]").expect("parse windows");
        assert_eq!(
            parsed,
            vec![AverageWindow::Off, AverageWindow::Auto, AverageWindow::Window(4)]
        );
        assert_eq!(
            serde_json::to_string(&AverageWindow::Auto).expect("serialize"),
            "true"
        );
    }
}
