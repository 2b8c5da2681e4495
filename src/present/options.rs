use std::fmt;
use std::sync::Arc;

use crate::{
    foundation::clock::TimeBase,
    foundation::error::{NovelKitError, NovelKitResult},
    surface::TextSurface,
};

/// A visual effect applied to a span of revealed glyphs.
///
/// Called once per presenter tick for every range it belongs to. Configuration may live on the
/// implementing type, but a call must depend only on that configuration, the surface and
/// `time_secs`.
pub trait GlyphTransform: Send + Sync {
    /// Apply the effect to glyphs `start_index..=end_index` (visible indices).
    fn apply(
        &self,
        surface: &mut dyn TextSurface,
        start_index: usize,
        end_index: usize,
        time_secs: f64,
    );

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A contiguous visible-index span with the transforms applied to it, in order.
#[derive(Clone)]
pub struct EffectRange {
    pub start_index: usize,
    pub length: usize,
    pub modifiers: Vec<Arc<dyn GlyphTransform>>,
}

impl fmt::Debug for EffectRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectRange")
            .field("start_index", &self.start_index)
            .field("length", &self.length)
            .field(
                "modifiers",
                &self.modifiers.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl EffectRange {
    pub fn new(
        start_index: usize,
        length: usize,
        modifiers: impl IntoIterator<Item = Arc<dyn GlyphTransform>>,
    ) -> Self {
        Self {
            start_index,
            length,
            modifiers: modifiers.into_iter().collect(),
        }
    }

    /// Inclusive `[start, end]` of this range intersected with `[0, visible_count - 1]`.
    pub fn clip_to_visible(&self, visible_count: usize) -> Option<(usize, usize)> {
        if self.length == 0 || visible_count == 0 {
            return None;
        }
        let start = self.start_index;
        let end = (self.start_index.saturating_add(self.length) - 1).min(visible_count - 1);
        (start <= end).then_some((start, end))
    }
}

/// Reveal configuration for [`crate::TextPresenter::present`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextPresenterOptions {
    /// Delay between revealed characters.
    pub character_interval_seconds: f64,
    /// Measure delays and effect time on wall time instead of scaled time.
    pub use_unscaled_time: bool,
    /// On skip, show everything at once on the next tick.
    pub reveal_immediately_on_skip: bool,
    /// Effect spans; not serializable.
    #[serde(skip)]
    pub effect_ranges: Vec<EffectRange>,
}

impl Default for TextPresenterOptions {
    fn default() -> Self {
        Self {
            character_interval_seconds: 0.03,
            use_unscaled_time: true,
            reveal_immediately_on_skip: true,
            effect_ranges: Vec::new(),
        }
    }
}

impl TextPresenterOptions {
    /// Decode options from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> NovelKitResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_character_interval(mut self, seconds: f64) -> Self {
        self.character_interval_seconds = seconds;
        self
    }

    pub fn with_effect_range(mut self, range: EffectRange) -> Self {
        self.effect_ranges.push(range);
        self
    }

    pub fn time_base(&self) -> TimeBase {
        if self.use_unscaled_time {
            TimeBase::Unscaled
        } else {
            TimeBase::Scaled
        }
    }

    pub fn validate(&self) -> NovelKitResult<()> {
        let v = self.character_interval_seconds;
        if !v.is_finite() || v < 0.0 {
            return Err(NovelKitError::invalid_argument(format!(
                "character_interval_seconds must be finite and >= 0, got {v}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/options.rs"]
mod tests;
