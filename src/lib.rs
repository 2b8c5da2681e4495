//! novelkit reveals narrative text one character at a time over a rich-text surface.
//!
//! The crate is the presentation core of a visual-novel text box:
//!
//! 1. **Parse**: [`parse_ruby`] turns `<ruby>base<rt>gloss</rt></ruby>` markup into display text
//!    plus [`RubyAnnotation`]s addressed by *visible index*.
//! 2. **Present**: [`TextPresenter::present`] drives a [`TextSurface`] from 0 to all characters,
//!    honours skip requests and applies [`EffectRange`]s to the revealed prefix every tick.
//! 3. **Glitch**: [`GlitchController`] runs short, cancellable bursts that all race one shared
//!    stop broadcast.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Cooperative**: every suspension is a tokio future; nothing blocks a thread.
//! - **Renderer-agnostic**: surfaces and glyph transforms are traits. [`MonospaceSurface`] is a
//!   headless reference implementation.
//!
//! See [`crate::guide`] for a walkthrough.
#![forbid(unsafe_code)]

mod effects;
mod foundation;
mod markup;
mod present;
mod surface;

/// Standalone walkthrough of novelkit's concepts and flow.
pub mod guide;

pub use effects::corruption::{CORRUPTION_GLYPHS, GlyphCorruptionModifier};
pub use effects::distortion::{DistortionKind, DistortionModifier};
pub use effects::glitch::{EffectOutcome, GlitchConfig, GlitchController};
pub use effects::shake::ShakeModifier;
pub use foundation::clock::{Clock, TimeBase};
pub use foundation::error::{NovelKitError, NovelKitResult};
pub use markup::ruby::{
    DisplayText, RubyAnnotation, parse_ruby, parse_ruby_optional, visible_index_at,
};
pub use present::options::{EffectRange, GlyphTransform, TextPresenterOptions};
pub use present::presenter::{PresentOutcome, PresenterFactory, TextPresenter};
pub use surface::monospace::MonospaceSurface;
pub use surface::{Glyph, TextSurface};
