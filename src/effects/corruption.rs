use crate::{effects::visible_glyphs_mut, present::options::GlyphTransform, surface::TextSurface};

/// Substitution alphabet for corrupted glyphs.
pub const CORRUPTION_GLYPHS: [char; 38] = [
    'ᚠ', 'ᚢ', 'ᚦ', 'ᚨ', 'ᚱ', 'ᚲ', 'ᚷ', 'ᚹ', 'ᚺ', 'ᚾ', 'ᛁ', 'ᛃ', 'ᛇ', 'ᛈ', 'ᛉ', 'ᛋ', 'ᛏ', 'ᛒ', 'ᛖ',
    'ᛗ', 'ᛚ', 'ᛜ', 'ᛞ', 'ᛟ', 'ᛝ', 'ᛡ', 'ᛠ', '⸸', '☠', '♆', '☾', '☿', '♄', '♃', '♀', '♂', '⚶', '⚸',
];

/// Replaces visible, non-whitespace glyphs with symbols from [`CORRUPTION_GLYPHS`].
///
/// The substitute for a glyph changes `corruption_speed` times per second and is a pure
/// function of glyph index and time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlyphCorruptionModifier {
    pub corruption_speed: f64,
}

impl Default for GlyphCorruptionModifier {
    fn default() -> Self {
        Self {
            corruption_speed: 6.0,
        }
    }
}

impl GlyphCorruptionModifier {
    /// Substitute for glyph `index` at `time_secs`.
    pub fn glyph_for(&self, index: usize, time_secs: f64) -> char {
        let tick = (time_secs * self.corruption_speed).floor() as i32;
        let hash = tick.wrapping_mul(73_856_093)
            ^ (index as i32).wrapping_mul(19_349_663)
            ^ 0x5bd1_e995;
        CORRUPTION_GLYPHS[hash.unsigned_abs() as usize % CORRUPTION_GLYPHS.len()]
    }
}

impl GlyphTransform for GlyphCorruptionModifier {
    fn apply(&self, surface: &mut dyn TextSurface, start: usize, end: usize, time_secs: f64) {
        for (i, glyph) in visible_glyphs_mut(surface.glyphs_mut(), start, end) {
            if glyph.ch.is_whitespace() {
                continue;
            }
            glyph.ch = self.glyph_for(i, time_secs);
        }
    }

    fn name(&self) -> &'static str {
        "corruption"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/corruption.rs"]
mod tests;
