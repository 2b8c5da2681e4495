//! Boundary with the rendering collaborator.
//!
//! The presenter drives a [`TextSurface`] through its text/visibility/layout calls only. Glyph
//! geometry is exposed for [`crate::GlyphTransform`] implementations and is never inspected by
//! the presenter itself.

use kurbo::Point;

/// In-memory reference surface.
pub mod monospace;

/// One laid-out character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Displayed character. Transforms may substitute it.
    pub ch: char,
    /// Whether the glyph produces ink (whitespace and line breaks do not).
    pub visible: bool,
    /// Quad corners: bottom-left, top-left, top-right, bottom-right.
    pub quad: [Point; 4],
}

impl Glyph {
    /// Centroid of the quad's diagonal.
    pub fn center(&self) -> Point {
        self.quad[0].midpoint(self.quad[2])
    }
}

/// A rich-text widget that owns laid-out glyphs.
///
/// Implementations are driven from a single task at a time; the presenter and the glitch
/// coordinator never touch a surface concurrently within one tick.
pub trait TextSurface: Send {
    /// Replace the source text. Takes effect on the next [`TextSurface::force_layout`].
    fn set_text(&mut self, text: &str);

    fn text(&self) -> &str;

    /// Interpret `<...>` runs as markup instead of content.
    fn set_rich_text(&mut self, enabled: bool);

    /// Number of leading characters that are shown.
    fn set_max_visible_characters(&mut self, count: usize);

    fn max_visible_characters(&self) -> usize;

    /// Lay out the current text synchronously.
    fn force_layout(&mut self);

    /// Post-layout character count (markup excluded).
    fn character_count(&self) -> usize;

    fn glyphs(&self) -> &[Glyph];

    fn glyphs_mut(&mut self) -> &mut [Glyph];

    /// Restore glyph geometry and characters to their laid-out state.
    fn reset_glyphs(&mut self);
}
