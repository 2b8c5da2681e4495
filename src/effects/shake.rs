use kurbo::Vec2;

use crate::{effects::visible_glyphs_mut, present::options::GlyphTransform, surface::TextSurface};

/// Moves each glyph along a Lissajous-like path; neighbouring glyphs are phase-shifted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShakeModifier {
    /// Offset in surface units.
    pub amplitude: f64,
    /// Angular speed in radians per second.
    pub frequency: f64,
}

impl Default for ShakeModifier {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            frequency: 20.0,
        }
    }
}

impl GlyphTransform for ShakeModifier {
    fn apply(&self, surface: &mut dyn TextSurface, start: usize, end: usize, time_secs: f64) {
        for (i, glyph) in visible_glyphs_mut(surface.glyphs_mut(), start, end) {
            let phase = time_secs * self.frequency + i as f64 * 0.37;
            let offset = Vec2::new(
                phase.sin() * self.amplitude,
                (phase * 1.3).cos() * self.amplitude,
            );
            for p in &mut glyph.quad {
                *p += offset;
            }
        }
    }

    fn name(&self) -> &'static str {
        "shake"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shake.rs"]
mod tests;
