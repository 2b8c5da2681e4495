//! Built-in glyph transforms and the glitch effect coordinator.

/// Scrambles glyphs into rune/astrological symbols.
pub mod corruption;
/// Crush / melt / shatter / stretch quad distortions.
pub mod distortion;
/// Cancellable, duration-bounded glitch bursts sharing one stop broadcast.
pub mod glitch;
/// Per-glyph sinusoidal jitter.
pub mod shake;

use crate::surface::Glyph;

/// Visible glyphs in `start..=end`, with the span clamped into the glyph buffer.
pub(crate) fn visible_glyphs_mut(
    glyphs: &mut [Glyph],
    start: usize,
    end: usize,
) -> impl Iterator<Item = (usize, &mut Glyph)> {
    let count = glyphs.len();
    let (lo, hi) = if start >= count || end < start {
        (0, 0)
    } else {
        (start, end.min(count - 1) + 1)
    };
    glyphs[lo..hi]
        .iter_mut()
        .enumerate()
        .map(move |(k, g)| (lo + k, g))
        .filter(|(_, g)| g.visible)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Where `v` sits between `a` and `b`, clamped to `[0, 1]`.
pub(crate) fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}
