use crate::error::ChartResult;
use crate::render::{Primitive, RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_group_count: usize,
    pub last_line_count: usize,
    pub last_path_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_group_count = frame.groups.len();
        self.last_line_count = 0;
        self.last_path_count = 0;
        self.last_circle_count = 0;
        self.last_text_count = 0;
        for primitive in frame.primitives() {
            match primitive {
                Primitive::Line(_) => self.last_line_count += 1,
                Primitive::Path(_) => self.last_path_count += 1,
                Primitive::Circle(_) => self.last_circle_count += 1,
                Primitive::Text(_) => self.last_text_count += 1,
                Primitive::Rect(_) => {}
            }
        }
        self.frames_rendered += 1;
        Ok(())
    }
}
