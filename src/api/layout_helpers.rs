use crate::render::{Color, RectPrimitive};

/// Vertical distance between stacked text lines, in ems.
pub(super) const LINE_HEIGHT_EM: f64 = 1.25;
/// Space between a box's border and its content.
pub(super) const BOX_PADDING_PX: f64 = 5.0;

pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' | ';' | '(' | ')' | '[' | ']' => 0.34,
            '-' | '+' | '#' | '>' | '~' | '*' => 0.5,
            'i' | 'l' | 'j' | 't' | 'f' | 'r' => 0.32,
            'm' | 'w' | 'M' | 'W' => 0.86,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    units * font_size_px
}

/// Outline rectangle around `(left, top, width, height)` content, grown by
/// [`BOX_PADDING_PX`] on every side.
pub(super) fn padded_box(
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    fill: Color,
    border: Color,
) -> RectPrimitive {
    RectPrimitive::new(
        left - BOX_PADDING_PX,
        top - BOX_PADDING_PX,
        width.max(0.0) + 2.0 * BOX_PADDING_PX,
        height.max(0.0) + 2.0 * BOX_PADDING_PX,
        fill,
    )
    .with_border(1.0, border)
}
