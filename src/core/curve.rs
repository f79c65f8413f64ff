//! Line interpolation into path commands.
//!
//! Every mode consumes pixel-space points and emits absolute `M`/`L`/`Q`/`C`/`Z`
//! commands, so backends only need the four primitives to draw any curve.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub type PathPoint = (f64, f64);

const CARDINAL_TENSION: f64 = 0.7;
const BUNDLE_TENSION: f64 = 0.85;
const MONOTONE_EPSILON: f64 = 1e-6;

const BASIS_BEZIER1: [f64; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
const BASIS_BEZIER2: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
const BASIS_BEZIER3: [f64; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    Linear,
    StepBefore,
    StepAfter,
    Basis,
    BasisOpen,
    BasisClosed,
    Bundle,
    Cardinal,
    CardinalOpen,
    CardinalClosed,
    #[default]
    Monotone,
}

impl Interpolation {
    pub const ALL: [Self; 11] = [
        Self::Linear,
        Self::StepBefore,
        Self::StepAfter,
        Self::Basis,
        Self::BasisOpen,
        Self::BasisClosed,
        Self::Bundle,
        Self::Cardinal,
        Self::CardinalOpen,
        Self::CardinalClosed,
        Self::Monotone,
    ];

    /// Closed modes end the path with `Z`.
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, Self::BasisClosed | Self::CardinalClosed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    CubicTo { c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64 },
    Close,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Smallest y reached by any end point, i.e. the top of the path on screen.
    #[must_use]
    pub fn top(&self) -> Option<f64> {
        self.end_points().map(|(_, y)| y).min_by(f64::total_cmp)
    }

    pub fn end_points(&self) -> impl Iterator<Item = PathPoint> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::QuadTo { x, y, .. }
            | PathCommand::CubicTo { x, y, .. } => Some((x, y)),
            PathCommand::Close => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = self.commands.iter().all(|command| match *command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                [cx, cy, x, y].iter().all(|v| v.is_finite())
            }
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => [c1x, c1y, c2x, c2y, x, y].iter().all(|v| v.is_finite()),
            PathCommand::Close => true,
        });
        if !finite {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    /// SVG `d` attribute text.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            // Writing into a String cannot fail.
            let _ = match *command {
                PathCommand::MoveTo { x, y } => write!(out, "M{},{}", coord(x), coord(y)),
                PathCommand::LineTo { x, y } => write!(out, "L{},{}", coord(x), coord(y)),
                PathCommand::QuadTo { cx, cy, x, y } => write!(
                    out,
                    "Q{},{},{},{}",
                    coord(cx),
                    coord(cy),
                    coord(x),
                    coord(y)
                ),
                PathCommand::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => write!(
                    out,
                    "C{},{},{},{},{},{}",
                    coord(c1x),
                    coord(c1y),
                    coord(c2x),
                    coord(c2y),
                    coord(x),
                    coord(y)
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }

    fn move_to(&mut self, (x, y): PathPoint) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, (x, y): PathPoint) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    fn quad_to(&mut self, (cx, cy): PathPoint, (x, y): PathPoint) {
        self.commands.push(PathCommand::QuadTo { cx, cy, x, y });
    }

    fn cubic_to(&mut self, (c1x, c1y): PathPoint, (c2x, c2y): PathPoint, (x, y): PathPoint) {
        self.commands.push(PathCommand::CubicTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

/// Formats a coordinate with at most three decimals.
pub(crate) fn coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Builds the path for `points` with the given interpolation mode.
#[must_use]
pub fn build_path(points: &[PathPoint], interpolation: Interpolation) -> PathData {
    let mut path = PathData::default();
    if points.is_empty() {
        return path;
    }

    match interpolation {
        Interpolation::Linear => linear(&mut path, points),
        Interpolation::StepBefore => step(&mut path, points, true),
        Interpolation::StepAfter => step(&mut path, points, false),
        Interpolation::Basis => basis(&mut path, points),
        Interpolation::BasisOpen => basis_open(&mut path, points),
        Interpolation::BasisClosed => basis_closed(&mut path, points),
        Interpolation::Bundle => basis(&mut path, &bundle(points, BUNDLE_TENSION)),
        Interpolation::Cardinal => cardinal(&mut path, points, CARDINAL_TENSION),
        Interpolation::CardinalOpen => cardinal_open(&mut path, points, CARDINAL_TENSION),
        Interpolation::CardinalClosed => cardinal_closed(&mut path, points, CARDINAL_TENSION),
        Interpolation::Monotone => monotone(&mut path, points),
    }

    if interpolation.is_closed() && !matches!(path.commands.last(), Some(PathCommand::Close)) {
        path.close();
    }
    path
}

fn linear(path: &mut PathData, points: &[PathPoint]) {
    path.move_to(points[0]);
    for &point in &points[1..] {
        path.line_to(point);
    }
}

fn step(path: &mut PathData, points: &[PathPoint], vertical_first: bool) {
    path.move_to(points[0]);
    for pair in points.windows(2) {
        let ((px, py), (x, y)) = (pair[0], pair[1]);
        if vertical_first {
            path.line_to((px, y));
        } else {
            path.line_to((x, py));
        }
        path.line_to((x, y));
    }
}

fn dot4(a: [f64; 4], b: [f64; 4]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

fn shift_in(window: &mut [f64; 4], value: f64) {
    window.rotate_left(1);
    window[3] = value;
}

fn basis_segment(path: &mut PathData, px: [f64; 4], py: [f64; 4]) {
    path.cubic_to(
        (dot4(BASIS_BEZIER1, px), dot4(BASIS_BEZIER1, py)),
        (dot4(BASIS_BEZIER2, px), dot4(BASIS_BEZIER2, py)),
        (dot4(BASIS_BEZIER3, px), dot4(BASIS_BEZIER3, py)),
    );
}

fn basis(path: &mut PathData, points: &[PathPoint]) {
    if points.len() < 3 {
        linear(path, points);
        return;
    }

    let n = points.len();
    let (x0, y0) = points[0];
    let mut px = [x0, x0, x0, points[1].0];
    let mut py = [y0, y0, y0, points[1].1];
    path.move_to((x0, y0));
    path.line_to((dot4(BASIS_BEZIER3, px), dot4(BASIS_BEZIER3, py)));

    // The last point is repeated once so the curve reaches it.
    for i in 2..=n {
        let (x, y) = points[i.min(n - 1)];
        shift_in(&mut px, x);
        shift_in(&mut py, y);
        basis_segment(path, px, py);
    }
    path.line_to(points[n - 1]);
}

fn basis_open(path: &mut PathData, points: &[PathPoint]) {
    if points.len() < 4 {
        linear(path, points);
        return;
    }

    let mut px = [0.0, points[0].0, points[1].0, points[2].0];
    let mut py = [0.0, points[0].1, points[1].1, points[2].1];
    path.move_to((dot4(BASIS_BEZIER3, px), dot4(BASIS_BEZIER3, py)));
    for &(x, y) in &points[3..] {
        shift_in(&mut px, x);
        shift_in(&mut py, y);
        basis_segment(path, px, py);
    }
}

fn basis_closed(path: &mut PathData, points: &[PathPoint]) {
    let n = points.len();
    let mut px = [0.0; 4];
    let mut py = [0.0; 4];
    for i in 0..4 {
        (px[i], py[i]) = points[i % n];
    }
    path.move_to((dot4(BASIS_BEZIER3, px), dot4(BASIS_BEZIER3, py)));
    for i in 4..n + 4 {
        let (x, y) = points[i % n];
        shift_in(&mut px, x);
        shift_in(&mut py, y);
        basis_segment(path, px, py);
    }
}

/// Straightens points toward the chord between the end points.
fn bundle(points: &[PathPoint], tension: f64) -> Vec<PathPoint> {
    let n = points.len() - 1;
    if n == 0 {
        return points.to_vec();
    }
    let (x0, y0) = points[0];
    let dx = points[n].0 - x0;
    let dy = points[n].1 - y0;
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            let t = i as f64 / n as f64;
            (
                tension * x + (1.0 - tension) * (x0 + t * dx),
                tension * y + (1.0 - tension) * (y0 + t * dy),
            )
        })
        .collect()
}

fn cardinal_tangents(points: &[PathPoint], tension: f64) -> Vec<PathPoint> {
    let a = (1.0 - tension) / 2.0;
    points
        .windows(3)
        .map(|w| (a * (w[2].0 - w[0].0), a * (w[2].1 - w[0].1)))
        .collect()
}

/// Appends cubic Hermite segments through `points`, starting at `points[0]`.
///
/// `tangents` either matches `points` one to one, or covers only the interior
/// points, in which case the ends are joined with quadratic segments.
fn hermite(path: &mut PathData, points: &[PathPoint], tangents: &[PathPoint]) {
    if tangents.is_empty()
        || (points.len() != tangents.len() && points.len() != tangents.len() + 2)
    {
        for &point in &points[1..] {
            path.line_to(point);
        }
        return;
    }

    let quad = points.len() != tangents.len();
    let mut p0 = points[0];
    let mut p = points[1];
    let t0 = tangents[0];
    let mut t = t0;
    let mut pi = 1;

    if quad {
        path.quad_to((p.0 - t0.0 * 2.0 / 3.0, p.1 - t0.1 * 2.0 / 3.0), p);
        p0 = points[1];
        pi = 2;
    }

    if tangents.len() > 1 {
        t = tangents[1];
        p = points[pi];
        pi += 1;
        path.cubic_to((p0.0 + t0.0, p0.1 + t0.1), (p.0 - t.0, p.1 - t.1), p);
        for &next_tangent in &tangents[2..] {
            // Smooth join: the first control mirrors the previous second one.
            let first_control = (p.0 + t.0, p.1 + t.1);
            p = points[pi];
            t = next_tangent;
            path.cubic_to(first_control, (p.0 - t.0, p.1 - t.1), p);
            pi += 1;
        }
    }

    if quad {
        let last = points[pi];
        path.quad_to((p.0 + t.0 * 2.0 / 3.0, p.1 + t.1 * 2.0 / 3.0), last);
    }
}

fn cardinal(path: &mut PathData, points: &[PathPoint], tension: f64) {
    if points.len() < 3 {
        linear(path, points);
        return;
    }
    path.move_to(points[0]);
    hermite(path, points, &cardinal_tangents(points, tension));
}

fn cardinal_open(path: &mut PathData, points: &[PathPoint], tension: f64) {
    if points.len() < 4 {
        linear(path, points);
        return;
    }
    let inner = &points[1..points.len() - 1];
    path.move_to(inner[0]);
    hermite(path, inner, &cardinal_tangents(points, tension));
}

fn cardinal_closed(path: &mut PathData, points: &[PathPoint], tension: f64) {
    if points.len() < 3 {
        linear(path, points);
        path.close();
        return;
    }
    let n = points.len();
    let mut ring = points.to_vec();
    ring.push(points[0]);

    let mut extended = Vec::with_capacity(n + 3);
    extended.push(points[n - 1]);
    extended.extend_from_slice(&ring);
    extended.push(points[1]);

    path.move_to(points[0]);
    hermite(path, &ring, &cardinal_tangents(&extended, tension));
}

fn slope(p0: PathPoint, p1: PathPoint) -> f64 {
    let dx = p1.0 - p0.0;
    if dx == 0.0 { 0.0 } else { (p1.1 - p0.1) / dx }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Fritsch-Carlson tangents: no overshoot between monotone neighbours.
fn monotone_tangents(points: &[PathPoint]) -> Vec<PathPoint> {
    let j = points.len() - 1;
    let mut m = vec![0.0; points.len()];
    let mut d = slope(points[0], points[1]);
    m[0] = d;
    for i in 1..j {
        let next = slope(points[i], points[i + 1]);
        m[i] = (d + next) / 2.0;
        d = next;
    }
    m[j] = d;

    for i in 0..j {
        let d = slope(points[i], points[i + 1]);
        if d.abs() < MONOTONE_EPSILON {
            m[i] = 0.0;
            m[i + 1] = 0.0;
        } else {
            let a = m[i] / d;
            let b = m[i + 1] / d;
            let s = a * a + b * b;
            if s > 9.0 {
                let s = d * 3.0 / s.sqrt();
                m[i] = s * a;
                m[i + 1] = s * b;
            }
        }
    }

    (0..=j)
        .map(|i| {
            let span = points[j.min(i + 1)].0 - points[i.saturating_sub(1)].0;
            let s = span / (6.0 * (1.0 + m[i] * m[i]));
            (finite_or_zero(s), finite_or_zero(m[i] * s))
        })
        .collect()
}

fn monotone(path: &mut PathData, points: &[PathPoint]) {
    if points.len() < 3 {
        linear(path, points);
        return;
    }
    path.move_to(points[0]);
    hermite(path, points, &monotone_tangents(points));
}

#[cfg(test)]
mod tests {
    use super::{Interpolation, PathCommand, build_path, coord};

    const ZIGZAG: [(f64, f64); 5] = [(0.0, 0.0), (10.0, 20.0), (20.0, 5.0), (30.0, 25.0), (40.0, 0.0)];

    #[test]
    fn linear_and_steps_emit_expected_svg() {
        let pts = [(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)];
        assert_eq!(build_path(&pts, Interpolation::Linear).to_svg(), "M0,0L10,5L20,0");
        assert_eq!(
            build_path(&pts, Interpolation::StepBefore).to_svg(),
            "M0,0L0,5L10,5L10,0L20,0"
        );
        assert_eq!(
            build_path(&pts, Interpolation::StepAfter).to_svg(),
            "M0,0L10,0L10,5L20,5L20,0"
        );
    }

    #[test]
    fn every_mode_starts_with_move_and_stays_finite() {
        for mode in Interpolation::ALL {
            let path = build_path(&ZIGZAG, mode);
            assert!(
                matches!(path.commands().first(), Some(PathCommand::MoveTo { .. })),
                "{mode:?} must start with a move"
            );
            path.validate().expect("finite path");
            assert_eq!(
                mode.is_closed(),
                matches!(path.commands().last(), Some(PathCommand::Close)),
                "{mode:?} closing"
            );
        }
    }

    #[test]
    fn curves_through_endpoints_end_at_last_point() {
        for mode in [
            Interpolation::Basis,
            Interpolation::Cardinal,
            Interpolation::Monotone,
            Interpolation::Linear,
        ] {
            let end = build_path(&ZIGZAG, mode).end_points().last();
            assert_eq!(end, Some((40.0, 0.0)), "{mode:?}");
        }
    }

    #[test]
    fn monotone_handles_repeated_x() {
        let pts = [(0.0, 0.0), (0.0, 10.0), (5.0, 10.0), (5.0, 0.0)];
        build_path(&pts, Interpolation::Monotone)
            .validate()
            .expect("repeated x stays finite");
    }

    #[test]
    fn short_inputs_fall_back_to_lines() {
        let pts = [(0.0, 0.0), (10.0, 10.0)];
        for mode in [Interpolation::Basis, Interpolation::Cardinal, Interpolation::Monotone] {
            assert_eq!(build_path(&pts, mode).to_svg(), "M0,0L10,10");
        }
        assert!(build_path(&[], Interpolation::Monotone).is_empty());
    }

    #[test]
    fn coordinates_are_trimmed() {
        assert_eq!(coord(1.5), "1.5");
        assert_eq!(coord(2.0), "2");
        assert_eq!(coord(1.23456), "1.235");
        assert_eq!(coord(-0.0001), "0");
    }
}
