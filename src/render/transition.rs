//! Time-based interpolation of displayed values.
//!
//! The chart owns no timer: hosts feed time through [`AnimationClock`] and
//! every frame samples each [`Animated`] value at the current instant.
//! Starting a new transition on a value replaces whatever was running and
//! starts from the value shown at that instant (last write wins).

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

pub const DEFAULT_DURATION_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Quad,
    Cubic,
    #[default]
    CubicInOut,
    Sin,
    Exp,
    Circle,
    Elastic,
    Bounce,
    Back,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    ///
    /// Input is clamped and both ends are exact, though `Elastic` and `Back`
    /// leave `[0, 1]` in between.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let rest = t2 - 2.0;
                    (rest * rest * rest + 2.0) / 2.0
                }
            }
            Self::Sin => 1.0 - (t * FRAC_PI_2).cos(),
            Self::Exp => 2f64.powf(10.0 * (t - 1.0)),
            Self::Circle => 1.0 - (1.0 - t * t).sqrt(),
            Self::Elastic => {
                const PERIOD: f64 = 0.45;
                let shift = PERIOD / TAU * FRAC_PI_2;
                1.0 + 2f64.powf(-10.0 * t) * ((t - shift) * TAU / PERIOD).sin()
            }
            Self::Bounce => bounce(t),
            Self::Back => {
                const OVERSHOOT: f64 = 1.70158;
                t * t * ((OVERSHOOT + 1.0) * t - OVERSHOOT)
            }
        }
    }
}

fn bounce(t: f64) -> f64 {
    const K: f64 = 7.5625;
    if t < 1.0 / 2.75 {
        K * t * t
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        K * t * t + 0.75
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        K * t * t + 0.9375
    } else {
        let t = t - 2.625 / 2.75;
        K * t * t + 0.984375
    }
}

/// Values that can be blended between two states.
pub trait Interpolate: Clone {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for DataPoint {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        DataPoint::new(self.x.interpolate(&to.x, t), self.y.interpolate(&to.y, t))
    }
}

/// Pairs points by position; extra target points grow out of the last
/// source point.
impl Interpolate for Vec<DataPoint> {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        to.iter()
            .enumerate()
            .map(|(i, target)| {
                let source = self.get(i).or_else(|| self.last()).unwrap_or(target);
                source.interpolate(target, t)
            })
            .collect()
    }
}

/// Displayed state of one point marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotState {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Interpolate for DotState {
    /// Position blends; the radius jumps to its target as soon as the
    /// transition has started.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            x: self.x.interpolate(&to.x, t),
            y: self.y.interpolate(&to.y, t),
            radius: if t > 0.0 { to.radius } else { self.radius },
        }
    }
}

/// One eased segment between two states.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if now_ms >= self.start_ms { 1.0 } else { 0.0 };
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn sample(&self, now_ms: f64) -> T {
        let eased = self.easing.apply(self.progress(now_ms));
        self.from.interpolate(&self.to, eased)
    }
}

/// A value with an optional running timeline of back-to-back tweens.
#[derive(Debug, Clone, PartialEq)]
pub struct Animated<T> {
    target: T,
    segments: Vec<Tween<T>>,
}

impl<T: Interpolate> Animated<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            target: value,
            segments: Vec::new(),
        }
    }

    /// Where the value ends up once every segment has run.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> T {
        let Some(first) = self.segments.first() else {
            return self.target.clone();
        };
        if now_ms < first.start_ms {
            return first.from.clone();
        }
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.start_ms <= now_ms)
            .map_or_else(|| self.target.clone(), |segment| segment.sample(now_ms))
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.segments
            .last()
            .is_some_and(|segment| now_ms < segment.end_ms())
    }

    /// Jumps to `value` and drops any running timeline.
    pub fn set(&mut self, value: T) {
        self.target = value;
        self.segments.clear();
    }

    /// Replaces the running timeline with one tween from the value shown now.
    pub fn transition_to(
        &mut self,
        now_ms: f64,
        to: T,
        duration_ms: f64,
        delay_ms: f64,
        easing: Easing,
    ) {
        let from = self.value_at(now_ms);
        self.segments.clear();
        self.segments.push(Tween {
            from,
            to: to.clone(),
            start_ms: now_ms + delay_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            easing,
        });
        self.target = to;
    }

    /// Appends a tween that starts when the current timeline ends.
    pub fn then(&mut self, now_ms: f64, to: T, duration_ms: f64, easing: Easing) {
        let (from, start_ms) = match self.segments.last() {
            Some(last) => (last.to.clone(), last.end_ms()),
            None => (self.target.clone(), now_ms),
        };
        self.segments.push(Tween {
            from,
            to: to.clone(),
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        });
        self.target = to;
    }

    /// Drops the timeline once it has fully run.
    pub fn settle(&mut self, now_ms: f64) {
        if !self.segments.is_empty() && !self.is_animating(now_ms) {
            self.segments.clear();
        }
    }
}

/// Host-driven time source in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationClock {
    now_ms: f64,
}

impl AnimationClock {
    #[must_use]
    pub fn now_ms(self) -> f64 {
        self.now_ms
    }

    /// Moves time forward; negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.now_ms += delta_ms;
        }
    }

    /// Sets absolute time, e.g. from a frame clock. Time never runs backwards.
    pub fn set(&mut self, now_ms: f64) {
        if now_ms.is_finite() && now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Animated, AnimationClock, DotState, Easing};
    use approx::assert_abs_diff_eq;

    #[test]
    fn easings_pin_both_ends() {
        for easing in [
            Easing::Linear,
            Easing::Quad,
            Easing::Cubic,
            Easing::CubicInOut,
            Easing::Sin,
            Easing::Circle,
            Easing::Elastic,
            Easing::Bounce,
            Easing::Back,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
        assert_abs_diff_eq!(Easing::CubicInOut.apply(0.5), 0.5);
        assert!(Easing::Elastic.apply(0.3) > 1.0);
    }

    #[test]
    fn new_transition_starts_from_displayed_value() {
        let mut value = Animated::new(0.0);
        value.transition_to(0.0, 100.0, 100.0, 0.0, Easing::Linear);
        assert_abs_diff_eq!(value.value_at(50.0), 50.0);

        value.transition_to(50.0, 0.0, 100.0, 0.0, Easing::Linear);
        assert_abs_diff_eq!(value.value_at(50.0), 50.0);
        assert_abs_diff_eq!(value.value_at(100.0), 25.0);
        assert_eq!(*value.target(), 0.0);
    }

    #[test]
    fn chained_segments_run_back_to_back() {
        let mut value = Animated::new(10.0);
        value.transition_to(0.0, 0.0, 100.0, 0.0, Easing::Linear);
        value.then(0.0, 40.0, 500.0, Easing::Linear);
        assert_abs_diff_eq!(value.value_at(100.0), 0.0);
        assert_abs_diff_eq!(value.value_at(350.0), 20.0);
        assert!(value.is_animating(599.0));
        value.settle(600.0);
        assert!(!value.is_animating(600.0));
        assert_abs_diff_eq!(value.value_at(600.0), 40.0);
    }

    #[test]
    fn delayed_dot_keeps_radius_until_start() {
        let mut dot = Animated::new(DotState {
            x: 0.0,
            y: 0.0,
            radius: 0.0,
        });
        dot.transition_to(
            0.0,
            DotState {
                x: 10.0,
                y: 10.0,
                radius: 1.5,
            },
            100.0,
            20.0,
            Easing::Linear,
        );
        assert_eq!(dot.value_at(10.0).radius, 0.0);
        assert_eq!(dot.value_at(30.0).radius, 1.5);
    }

    #[test]
    fn clock_ignores_backwards_time() {
        let mut clock = AnimationClock::default();
        clock.advance(16.0);
        clock.advance(-5.0);
        clock.set(10.0);
        assert_eq!(clock.now_ms(), 16.0);
        clock.set(40.0);
        assert_eq!(clock.now_ms(), 40.0);
    }
}
