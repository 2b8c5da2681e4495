use kurbo::Point;

use crate::{
    markup::tags::strip_tags,
    surface::{Glyph, TextSurface},
};

/// Fixed-pitch, in-memory [`TextSurface`].
///
/// Every character occupies one `advance × line_height` cell; `\n` starts a new line. Useful
/// for tests, terminals and headless previews.
#[derive(Clone, Debug)]
pub struct MonospaceSurface {
    text: String,
    rich_text: bool,
    max_visible: usize,
    advance: f64,
    line_height: f64,
    laid_out: Vec<Glyph>,
    glyphs: Vec<Glyph>,
}

impl Default for MonospaceSurface {
    fn default() -> Self {
        Self::new(10.0, 16.0)
    }
}

impl MonospaceSurface {
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            text: String::new(),
            rich_text: false,
            max_visible: usize::MAX,
            advance,
            line_height,
            laid_out: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    /// Characters currently revealed, with any substitutions applied.
    pub fn revealed_text(&self) -> String {
        self.glyphs
            .iter()
            .take(self.max_visible)
            .map(|g| g.ch)
            .collect()
    }

    /// All laid-out characters regardless of visibility.
    pub fn laid_out_text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    fn cell(&self, col: usize, line: usize) -> [Point; 4] {
        let x0 = col as f64 * self.advance;
        let x1 = x0 + self.advance;
        // y grows upwards; line 0 sits on the baseline at y = 0.
        let y0 = -(line as f64) * self.line_height;
        let y1 = y0 + self.line_height;
        [
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
            Point::new(x1, y0),
        ]
    }
}

impl TextSurface for MonospaceSurface {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_rich_text(&mut self, enabled: bool) {
        self.rich_text = enabled;
    }

    fn set_max_visible_characters(&mut self, count: usize) {
        self.max_visible = count;
    }

    fn max_visible_characters(&self) -> usize {
        self.max_visible
    }

    fn force_layout(&mut self) {
        let source: Vec<char> = self.text.chars().collect();
        let content = if self.rich_text {
            strip_tags(&source)
        } else {
            source
        };

        let mut laid_out = Vec::with_capacity(content.len());
        let (mut col, mut line) = (0usize, 0usize);
        for ch in content {
            laid_out.push(Glyph {
                ch,
                visible: !ch.is_whitespace(),
                quad: self.cell(col, line),
            });
            if ch == '\n' {
                col = 0;
                line += 1;
            } else {
                col += 1;
            }
        }

        self.glyphs = laid_out.clone();
        self.laid_out = laid_out;
    }

    fn character_count(&self) -> usize {
        self.laid_out.len()
    }

    fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    fn glyphs_mut(&mut self) -> &mut [Glyph] {
        &mut self.glyphs
    }

    fn reset_glyphs(&mut self) {
        self.glyphs.clone_from(&self.laid_out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/monospace.rs"]
mod tests;
