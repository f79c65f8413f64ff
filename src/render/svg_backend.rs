use std::fmt::Write as _;

use crate::core::curve::coord;
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, Color, Primitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Serializes frames to standalone SVG markup.
///
/// Each layer becomes a `<g>` named after the layer, and each primitive
/// group a nested `<g>` carrying its class list, so the output can be styled
/// with the usual `.group--{id}`, `.dots__dot`, `.legend__item` selectors.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    class: Option<String>,
    markup: String,
    frames_rendered: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Class set on the root `<svg>` element.
    #[must_use]
    pub fn with_root_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Markup of the last rendered frame.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn into_markup(self) -> String {
        self.markup
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut svg = String::with_capacity(4096);
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        let class_attr = self
            .class
            .as_deref()
            .map(|class| format!(" class='{}'", escape(class)))
            .unwrap_or_default();
        let _ = writeln!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'{class_attr}>"
        );

        for layer in CanvasLayerKind::CANONICAL_ORDER {
            let mut groups = frame.groups_in(layer).peekable();
            if groups.peek().is_none() {
                continue;
            }
            let _ = writeln!(svg, "  <g class='{}'>", layer.class_name());
            for group in groups {
                let legend = group
                    .legend
                    .as_deref()
                    .map(|id| format!(" data-legend='{}'", escape(id)))
                    .unwrap_or_default();
                let _ = writeln!(svg, "    <g class='{}'{legend}>", escape(&group.class));
                for primitive in &group.primitives {
                    write_primitive(&mut svg, primitive);
                }
                let _ = writeln!(svg, "    </g>");
            }
            let _ = writeln!(svg, "  </g>");
        }
        let _ = writeln!(svg, "</svg>");

        self.markup = svg;
        self.frames_rendered += 1;
        Ok(())
    }
}

fn write_primitive(svg: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Line(line) => {
            let _ = writeln!(
                svg,
                "      <line x1='{}' y1='{}' x2='{}' y2='{}' stroke-width='{}'{}/>",
                coord(line.x1),
                coord(line.y1),
                coord(line.x2),
                coord(line.y2),
                coord(line.stroke_width),
                paint("stroke", line.color),
            );
        }
        Primitive::Rect(rect) => {
            let border = if rect.border_width > 0.0 {
                format!(
                    " stroke-width='{}'{}",
                    coord(rect.border_width),
                    paint("stroke", rect.border_color)
                )
            } else {
                String::new()
            };
            let _ = writeln!(
                svg,
                "      <rect x='{}' y='{}' width='{}' height='{}'{}{border}/>",
                coord(rect.x),
                coord(rect.y),
                coord(rect.width),
                coord(rect.height),
                paint("fill", rect.fill_color),
            );
        }
        Primitive::Circle(circle) => {
            let stroke = if circle.stroke_width > 0.0 {
                format!(
                    " stroke-width='{}'{}",
                    coord(circle.stroke_width),
                    paint("stroke", circle.stroke_color)
                )
            } else {
                String::new()
            };
            let _ = writeln!(
                svg,
                "      <circle{} cx='{}' cy='{}' r='{}'{}{stroke}/>",
                class_attr(circle.class),
                coord(circle.cx),
                coord(circle.cy),
                coord(circle.radius),
                paint("fill", circle.fill_color),
            );
        }
        Primitive::Path(path) => {
            let fill = match path.fill_color {
                Some(color) => paint("fill", color),
                None => " fill='none'".to_owned(),
            };
            let _ = writeln!(
                svg,
                "      <path{} d='{}' stroke-width='{}'{}{fill}/>",
                class_attr(path.class),
                path.data.to_svg(),
                coord(path.stroke_width),
                paint("stroke", path.stroke_color),
            );
        }
        Primitive::Text(text) => write_text(svg, text),
    }
}

fn write_text(svg: &mut String, text: &TextPrimitive) {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let transform = if text.rotation_deg == 0.0 {
        String::new()
    } else {
        format!(
            " transform='rotate({} {} {})'",
            coord(text.rotation_deg),
            coord(text.x),
            coord(text.y)
        )
    };
    let _ = writeln!(
        svg,
        "      <text x='{}' y='{}' font-size='{}' text-anchor='{anchor}'{}{transform}>{}</text>",
        coord(text.x),
        coord(text.y),
        coord(text.font_size_px),
        paint("fill", text.color),
        escape(&text.text),
    );
}

fn class_attr(class: Option<&str>) -> String {
    class
        .map(|class| format!(" class='{}'", escape(class)))
        .unwrap_or_default()
}

/// `attr='#rrggbb'` plus an opacity attribute when translucent.
fn paint(attr: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(" {attr}='{}'", color.to_hex_rgb())
    } else {
        format!(
            " {attr}='{}' {attr}-opacity='{}'",
            color.to_hex_rgb(),
            coord(color.alpha)
        )
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a > b & 'c'"), "a &gt; b &amp; &#39;c&#39;");
    }
}
