use tracing::trace;

use crate::core::FlatRecord;
use crate::interaction::{FocusState, HoverState, nearest_index};
use crate::render::Renderer;

use super::{PluginEvent, SpecificityChart};

impl<R: Renderer> SpecificityChart<R> {
    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.core.model.interaction.hover()
    }

    #[must_use]
    pub fn focus_state(&self) -> FocusState {
        self.core.model.interaction.focus()
    }

    /// Resolves the record nearest to the pointer's x and focuses it.
    ///
    /// `x`/`y` are in viewport pixels. Scales are left untouched.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.core.model.interaction.on_pointer_move(x, y);
        if self.core.model.flattened.is_empty() {
            self.core.model.interaction.set_focus(None);
            return;
        }
        let data_x = match self.core.model.x_scale.pixel_to_domain(x) {
            Ok(data_x) => data_x,
            Err(err) => {
                trace!(error = %err, pointer_x = x, "pointer x not invertible");
                return;
            }
        };
        if let Some(index) = nearest_index(&self.core.model.flattened_x, data_x) {
            self.update_info(index);
        }
    }

    /// Hides the info box and indicators; the focused index is remembered.
    pub fn pointer_leave(&mut self) {
        self.core.model.interaction.on_pointer_leave();
        trace!("pointer left chart");
        self.emit_plugin_event(PluginEvent::PointerLeft);
    }

    /// Steps focus one record to the right.
    pub fn next_info(&mut self) {
        let index = self.focus_state().index.unwrap_or(0);
        self.update_info(index.saturating_add(1));
    }

    /// Steps focus one record to the left.
    pub fn prev_info(&mut self) {
        let index = self.focus_state().index.unwrap_or(0);
        self.update_info(index.saturating_sub(1));
    }

    /// Focuses `index` of the flattened dataset, clamped to its bounds.
    pub fn update_info(&mut self, index: usize) {
        let len = self.core.model.flattened.len();
        if len == 0 {
            self.core.model.interaction.set_focus(None);
            return;
        }
        let index = index.min(len - 1);
        let x_value = self.core.model.flattened[index].x;
        self.core.model.interaction.set_focus(Some((index, x_value)));

        let series_ids: Vec<String> = self
            .focused_records()
            .into_iter()
            .map(|record| record.series_id.clone())
            .collect();
        trace!(index, x_value, records = series_ids.len(), "focused records");
        self.emit_plugin_event(PluginEvent::FocusChanged { index, series_ids });
    }

    /// Every record sharing the focused x, sorted by series id. Empty while
    /// idle.
    #[must_use]
    pub fn focused_records(&self) -> Vec<&FlatRecord> {
        let focus = self.focus_state();
        let (HoverState::Focused, Some(x_value)) = (self.hover_state(), focus.x_value) else {
            return Vec::new();
        };
        let xs = &self.core.model.flattened_x;
        let start = xs.partition_point(|&x| x < x_value);
        let end = xs.partition_point(|&x| x <= x_value);
        let mut records: Vec<&FlatRecord> = self.core.model.flattened[start..end].iter().collect();
        records.sort_by(|left, right| left.series_id.cmp(&right.series_id));
        records
    }

    /// Info box lines for the focused records, `"{id}({specificity}): {selector}"`.
    #[must_use]
    pub fn info_lines(&self) -> Vec<String> {
        self.focused_records()
            .into_iter()
            .map(|record| {
                format!(
                    "{}({}): {}",
                    record.series_id, record.record.specificity, record.record.selector
                )
            })
            .collect()
    }
}
