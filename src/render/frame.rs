use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, Primitive};

/// Named run of primitives drawn together, e.g. one series or one legend item.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveGroup {
    pub layer: CanvasLayerKind,
    /// Space separated class list, used verbatim by the SVG backend.
    pub class: String,
    /// Series id this group stands for in the legend, if any.
    pub legend: Option<String>,
    pub primitives: Vec<Primitive>,
}

impl PrimitiveGroup {
    #[must_use]
    pub fn new(layer: CanvasLayerKind, class: impl Into<String>) -> Self {
        Self {
            layer,
            class: class.into(),
            legend: None,
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    #[must_use]
    pub fn with(mut self, primitive: impl Into<Primitive>) -> Self {
        self.primitives.push(primitive.into());
        self
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|item| item == class)
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Groups are kept sorted by layer; within a layer they keep insertion order,
/// which is the paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub groups: Vec<PrimitiveGroup>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: PrimitiveGroup) -> Self {
        self.push_group(group);
        self
    }

    pub fn push_group(&mut self, group: PrimitiveGroup) {
        let at = self
            .groups
            .partition_point(|existing| existing.layer <= group.layer);
        self.groups.insert(at, group);
    }

    pub fn groups_in(&self, layer: CanvasLayerKind) -> impl Iterator<Item = &PrimitiveGroup> {
        self.groups.iter().filter(move |group| group.layer == layer)
    }

    pub fn groups_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a PrimitiveGroup> + 'a {
        self.groups.iter().filter(move |group| group.has_class(class))
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.groups.iter().flat_map(|group| group.primitives.iter())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.groups.iter().map(|group| group.primitives.len()).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for primitive in self.primitives() {
            primitive.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{PrimitiveGroup, RenderFrame};
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive};

    #[test]
    fn groups_are_ordered_by_layer_then_insertion() {
        let frame = RenderFrame::new(Viewport::new(10, 10))
            .with_group(PrimitiveGroup::new(CanvasLayerKind::Indicator, "c"))
            .with_group(PrimitiveGroup::new(CanvasLayerKind::Series, "a"))
            .with_group(PrimitiveGroup::new(CanvasLayerKind::Series, "b"));
        let classes: Vec<&str> = frame.groups.iter().map(|g| g.class.as_str()).collect();
        assert_eq!(classes, vec!["a", "b", "c"]);
    }

    #[test]
    fn validation_reaches_nested_primitives() {
        let frame = RenderFrame::new(Viewport::new(10, 10)).with_group(
            PrimitiveGroup::new(CanvasLayerKind::Axis, "axis").with(LinePrimitive::new(
                0.0,
                0.0,
                f64::NAN,
                1.0,
                1.0,
                Color::rgb(0.0, 0.0, 0.0),
            )),
        );
        assert!(frame.validate().is_err());
    }
}
