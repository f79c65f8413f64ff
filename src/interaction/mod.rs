use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    /// No pointer over the chart; info box and indicators hidden.
    #[default]
    Idle,
    /// An index is resolved and its records are displayed.
    Focused,
}

/// Public focus state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FocusState {
    pub visible: bool,
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Index into the flattened dataset; kept across pointer-leave so
    /// keyboard stepping resumes where the pointer left off.
    pub index: Option<usize>,
    /// Data-space x shared by every focused record.
    pub x_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    hover: HoverState,
    focus: FocusState,
}

impl InteractionState {
    #[must_use]
    pub fn hover(self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn focus(self) -> FocusState {
        self.focus
    }

    #[must_use]
    pub fn pointer(self) -> (f64, f64) {
        (self.focus.pointer_x, self.focus.pointer_y)
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.focus.pointer_x = x;
        self.focus.pointer_y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover = HoverState::Idle;
        self.focus.visible = false;
    }

    /// Enters `Focused` on `index`, or hides the display when nothing is there.
    pub fn set_focus(&mut self, focus: Option<(usize, f64)>) {
        match focus {
            Some((index, x_value)) => {
                self.hover = HoverState::Focused;
                self.focus.visible = true;
                self.focus.index = Some(index);
                self.focus.x_value = Some(x_value);
            }
            None => {
                self.hover = HoverState::Idle;
                self.focus.visible = false;
                self.focus.index = None;
                self.focus.x_value = None;
            }
        }
    }

    /// Keeps a remembered index inside a dataset that now has `len`
    /// records, refreshing its x from `x_at`. An empty dataset clears focus.
    pub fn clamp_focus(&mut self, len: usize, x_at: impl Fn(usize) -> f64) {
        let Some(index) = self.focus.index else {
            return;
        };
        if len == 0 {
            self.set_focus(None);
            return;
        }
        let clamped = index.min(len - 1);
        self.focus.index = Some(clamped);
        self.focus.x_value = Some(x_at(clamped));
    }
}

/// Leftmost insertion point for `target` in ascending `xs`.
#[must_use]
pub fn bisect_left(xs: &[f64], target: f64) -> usize {
    xs.partition_point(|&x| x < target)
}

/// Index of the value nearest to `target` in ascending `xs`.
///
/// Only the two neighbours of the insertion point are compared; on equal
/// distance the left one wins. `None` for an empty slice or a NaN target.
#[must_use]
pub fn nearest_index(xs: &[f64], target: f64) -> Option<usize> {
    if xs.is_empty() || target.is_nan() {
        return None;
    }

    let insertion = bisect_left(xs, target);
    let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 2]> = SmallVec::new();
    if insertion > 0 {
        let left = insertion - 1;
        candidates.push((OrderedFloat((target - xs[left]).abs()), left));
    }
    if insertion < xs.len() {
        candidates.push((OrderedFloat((xs[insertion] - target).abs()), insertion));
    }

    candidates
        .into_iter()
        .min_by_key(|candidate| candidate.0)
        .map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::{HoverState, InteractionState, bisect_left, nearest_index};

    const XS: [f64; 5] = [0.0, 1.0, 2.0, 5.0, 8.0];

    #[test]
    fn picks_closer_neighbour() {
        assert_eq!(nearest_index(&XS, 3.0), Some(2));
        assert_eq!(nearest_index(&XS, 4.0), Some(3));
    }

    #[test]
    fn ties_go_left() {
        assert_eq!(nearest_index(&XS, 6.5), Some(3));
    }

    #[test]
    fn out_of_range_targets_clamp_to_ends() {
        assert_eq!(nearest_index(&XS, -10.0), Some(0));
        assert_eq!(nearest_index(&XS, 100.0), Some(4));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn bisect_is_leftmost() {
        assert_eq!(bisect_left(&[1.0, 2.0, 2.0, 3.0], 2.0), 1);
    }

    #[test]
    fn leave_hides_but_keeps_index() {
        let mut state = InteractionState::default();
        state.on_pointer_move(10.0, 20.0);
        state.set_focus(Some((3, 5.0)));
        assert_eq!(state.hover(), HoverState::Focused);
        state.on_pointer_leave();
        assert_eq!(state.hover(), HoverState::Idle);
        assert!(!state.focus().visible);
        assert_eq!(state.focus().index, Some(3));
    }

    #[test]
    fn clamp_focus_shrinks_index_and_clears_on_empty() {
        let mut state = InteractionState::default();
        state.set_focus(Some((4, 8.0)));
        state.clamp_focus(2, |index| index as f64 * 10.0);
        assert_eq!(state.focus().index, Some(1));
        assert_eq!(state.focus().x_value, Some(10.0));
        state.clamp_focus(0, |_| 0.0);
        assert_eq!(state.focus().index, None);
        assert_eq!(state.hover(), HoverState::Idle);
    }
}
