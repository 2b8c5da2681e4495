use kurbo::{Point, Vec2};

use crate::{
    effects::{inverse_lerp, lerp, visible_glyphs_mut},
    present::options::GlyphTransform,
    surface::{Glyph, TextSurface},
};

/// Shape of a distortion, shared by [`DistortionModifier`] and
/// [`crate::GlitchController::distort`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionKind {
    /// Pulse the glyph towards its centre.
    #[default]
    Crush,
    /// Drag the upper vertices downwards.
    Melt,
    /// Throw vertices apart by per-glyph jitter.
    Shatter,
    /// Trade width for height.
    Stretch,
}

/// Time-varying quad distortion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DistortionModifier {
    pub mode: DistortionKind,
    pub amplitude: f64,
    pub frequency: f64,
}

impl Default for DistortionModifier {
    fn default() -> Self {
        Self {
            mode: DistortionKind::Crush,
            amplitude: 4.0,
            frequency: 8.0,
        }
    }
}

impl DistortionModifier {
    pub fn new(mode: DistortionKind) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    fn scale_about(glyph: &mut Glyph, center: Point, sx: f64, sy: f64) {
        for p in &mut glyph.quad {
            let d = *p - center;
            *p = center + Vec2::new(d.x * sx, d.y * sy);
        }
    }

    fn distort(&self, glyph: &mut Glyph, index: usize, phase: f64) {
        let center = glyph.center();
        let wave = (phase.sin() + 1.0) * 0.5;
        match self.mode {
            DistortionKind::Crush => {
                let crush = lerp(1.0, 0.4, wave);
                Self::scale_about(glyph, center, crush, crush);
            }
            DistortionKind::Melt => {
                let melt = lerp(0.2, 1.0, wave);
                let (lo, hi) = (center.y - self.amplitude, center.y + self.amplitude);
                for p in &mut glyph.quad {
                    p.y -= self.amplitude * melt * inverse_lerp(lo, hi, p.y);
                }
            }
            DistortionKind::Shatter => {
                let i = index as f64;
                let jitter = Vec2::new((phase * 1.3 + i).cos(), (phase + i * 1.7).sin())
                    * self.amplitude;
                for (k, p) in glyph.quad.iter_mut().enumerate() {
                    *p += jitter * (0.5 + k as f64 * 0.1);
                }
            }
            DistortionKind::Stretch => {
                let sx = lerp(0.6, 1.4, wave);
                let sy = lerp(1.4, 0.6, (phase.cos() + 1.0) * 0.5);
                Self::scale_about(glyph, center, sx, sy);
            }
        }
    }
}

impl GlyphTransform for DistortionModifier {
    fn apply(&self, surface: &mut dyn TextSurface, start: usize, end: usize, time_secs: f64) {
        for (i, glyph) in visible_glyphs_mut(surface.glyphs_mut(), start, end) {
            let phase = time_secs * self.frequency + i as f64 * 0.23;
            self.distort(glyph, i, phase);
        }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            DistortionKind::Crush => "distortion.crush",
            DistortionKind::Melt => "distortion.melt",
            DistortionKind::Shatter => "distortion.shatter",
            DistortionKind::Stretch => "distortion.stretch",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/distortion.rs"]
mod tests;
