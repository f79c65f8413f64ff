//! Tick step selection on 1/2/5 multiples of powers of ten.

pub const AXIS_X_TARGET_SPACING_PX: f64 = 80.0;
pub const AXIS_Y_TARGET_SPACING_PX: f64 = 40.0;
pub const AXIS_MIN_TICKS: usize = 2;
pub const AXIS_MAX_TICKS: usize = 10;
pub const DEFAULT_TICK_COUNT: usize = 10;

/// How many ticks fit on an axis of `axis_span_px` at the given spacing.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Step between roughly `count` ticks spanning `start..stop`.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let span = (stop - start).abs();
    if count == 0 || !span.is_finite() || span == 0.0 {
        return None;
    }

    let count = count as f64;
    let mut step = 10f64.powf((span / count).log10().floor());
    let error = count / span * step;

    if error <= 0.15 {
        step *= 10.0;
    } else if error <= 0.35 {
        step *= 5.0;
    } else if error <= 0.75 {
        step *= 2.0;
    }

    (step.is_finite() && step > 0.0).then_some(step)
}

/// Domain extended outward to multiples of the tick step.
#[must_use]
pub fn nice_extent(start: f64, stop: f64, count: usize) -> Option<(f64, f64)> {
    let (low, high, reversed) = if start <= stop {
        (start, stop, false)
    } else {
        (stop, start, true)
    };
    let step = tick_step(low, high, count)?;
    let low = (low / step).floor() * step;
    let high = (high / step).ceil() * step;
    Some(if reversed { (high, low) } else { (low, high) })
}

/// Tick values within `start..=stop`, ascending.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (low, high) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    let Some(step) = tick_step(low, high, count) else {
        return if low.is_finite() { vec![low] } else { Vec::new() };
    };

    // Sub-unit steps divide by the inverse so values like 0.3 come out exact.
    let inverse = (step < 1.0).then(|| (1.0 / step).round());
    let (first, last) = match inverse {
        Some(inverse) => ((low * inverse).ceil(), (high * inverse).floor()),
        None => ((low / step).ceil(), (high / step).floor()),
    };
    if last < first {
        return Vec::new();
    }
    (0..=((last - first) as usize))
        .map(|i| {
            let n = first + i as f64;
            match inverse {
                Some(inverse) => n / inverse,
                None => n * step,
            }
        })
        .collect()
}

/// Label text for a tick, without trailing zeros.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{axis_tick_target_count, format_tick, linear_ticks, nice_extent, tick_step};

    #[test]
    fn step_snaps_to_one_two_five() {
        assert_eq!(tick_step(0.0, 100.0, 10), Some(10.0));
        assert_eq!(tick_step(0.0, 87.0, 10), Some(10.0));
        assert_eq!(tick_step(0.0, 37.0, 10), Some(5.0));
        assert_eq!(tick_step(3.0, 3.0, 10), None);
    }

    #[test]
    fn nice_extent_rounds_outward() {
        assert_eq!(nice_extent(0.0, 123.0, 10), Some((0.0, 130.0)));
        assert_eq!(nice_extent(1.0, 9.5, 10), Some((1.0, 10.0)));
    }

    #[test]
    fn ticks_cover_the_domain() {
        assert_eq!(
            linear_ticks(0.0, 100.0, 5),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
        );
        assert_eq!(linear_ticks(0.2, 0.6, 4), vec![0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn target_count_is_clamped() {
        assert_eq!(axis_tick_target_count(800.0, 80.0, 2, 10), 10);
        assert_eq!(axis_tick_target_count(100.0, 80.0, 2, 10), 2);
        assert_eq!(axis_tick_target_count(f64::NAN, 80.0, 2, 10), 2);
    }

    #[test]
    fn tick_labels_drop_trailing_zeros() {
        assert_eq!(format_tick(40.0), "40");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(-2.25), "-2.25");
    }
}
