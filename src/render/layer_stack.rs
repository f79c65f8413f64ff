use serde::{Deserialize, Serialize};

/// Paint layers of a chart, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Axis,
    Series,
    Legend,
    /// Transparent pointer-capture rectangle over the plot area.
    Overlay,
    Info,
    Indicator,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [Self; 7] = [
        Self::Background,
        Self::Axis,
        Self::Series,
        Self::Legend,
        Self::Overlay,
        Self::Info,
        Self::Indicator,
    ];

    /// Class of the `<g>` wrapping this layer in SVG output.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Axis => "axes",
            Self::Series => "groups",
            Self::Legend => "legend",
            Self::Overlay => "overlay",
            Self::Info => "info",
            Self::Indicator => "indicators",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn canonical_order_is_sorted() {
        let mut sorted = CanvasLayerKind::CANONICAL_ORDER;
        sorted.sort();
        assert_eq!(sorted, CanvasLayerKind::CANONICAL_ORDER);
    }
}
