use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{PluginEvent, SpecificityChart};

impl<R: Renderer> SpecificityChart<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let model = &self.core.model;
        PluginContext {
            viewport: model.viewport,
            x_domain: model.x_scale.domain(),
            y_domain: model.y_scale.domain(),
            series_count: model.series.len(),
            flattened_len: model.flattened.len(),
            hover: model.interaction.hover(),
            focus: model.interaction.focus(),
            now_ms: self.now_ms(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.core.runtime.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.core.runtime.plugins {
            plugin.on_event(&event, context);
        }
    }
}
