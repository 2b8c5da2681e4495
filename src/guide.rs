//! # novelkit guide
//!
//! A standalone walkthrough of how text gets from a script line to revealed glyphs.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`DisplayText`](crate::DisplayText): display text with ruby markup removed, plus its glosses
//! - *Visible index*: a position in the character stream that excludes markup tags and ruby
//!   glosses. Annotations, effect ranges and reveal progress are all addressed this way.
//! - [`TextSurface`](crate::TextSurface): the rendering collaborator. It owns layout and glyph
//!   geometry; novelkit only sets text, visibility and asks for the laid-out character count.
//! - [`GlyphTransform`](crate::GlyphTransform): a pluggable visual effect applied to a
//!   visible-index span at a given time.
//! - [`TextPresenter`](crate::TextPresenter): one reveal session per surface.
//! - [`GlitchController`](crate::GlitchController): independent glitch bursts with a global stop.
//!
//! ## 1. Parse ruby markup
//!
//! ```
//! let d = novelkit::parse_ruby("これは<ruby>漢字<rt>かんじ</rt></ruby>です");
//! assert_eq!(d.output_text, "これは漢字です");
//! assert_eq!(d.annotations[0].base_start_index, 3);
//! assert_eq!(d.annotations[0].base_length, 2);
//! assert_eq!(d.with_parenthetical_glosses(), "これは漢字（かんじ）です");
//! ```
//!
//! Only `ruby` and `rt` are interpreted. Other tags are copied through verbatim and do not count
//! as visible characters. Malformed markup never fails: an unterminated `<ruby>` leaks its `<` as
//! a visible character, a ruby element without `<rt>` becomes plain text.
//!
//! [`visible_index_at`](crate::visible_index_at) answers "which visible index does this raw
//! position correspond to" on the *source* text. It flips an "inside rt" flag on tag names
//! alone, so gloss text is never counted.
//!
//! ## 2. Present
//!
//! ```no_run
//! use std::sync::Arc;
//! use novelkit::{
//!     EffectRange, GlyphTransform, MonospaceSurface, ShakeModifier, TextPresenter,
//!     TextPresenterOptions,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> novelkit::NovelKitResult<()> {
//! let presenter = TextPresenter::new(MonospaceSurface::default());
//! let shake: Arc<dyn GlyphTransform> = Arc::new(ShakeModifier::default());
//! let options = TextPresenterOptions::default()
//!     .with_character_interval(0.02)
//!     .with_effect_range(EffectRange::new(0, 999, [shake]));
//!
//! let outcome = presenter
//!     .present("揺れる文字", &options, &CancellationToken::new())
//!     .await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```
//!
//! Each tick the presenter:
//!
//! 1. checks the caller's token (a cancelled token ends the call with
//!    [`PresentOutcome::Cancelled`](crate::PresentOutcome::Cancelled));
//! 2. if a skip was requested and `reveal_immediately_on_skip` is set, reveals everything,
//!    applies effects over the full range and returns
//!    [`PresentOutcome::Skipped`](crate::PresentOutcome::Skipped);
//! 3. otherwise sets the visible count, restores glyphs to their laid-out state and runs every
//!    effect range clipped to the revealed prefix;
//! 4. waits one character interval on the selected [`TimeBase`](crate::TimeBase).
//!
//! `is_running` returns to `false` on every exit path. A second `present` on the same surface
//! while one runs fails with [`NovelKitError::InvalidState`](crate::NovelKitError::InvalidState).
//! Clone the presenter to call [`request_skip`](crate::TextPresenter::request_skip) from
//! another task (an input handler, typically).
//!
//! ## 3. Glitch bursts
//!
//! [`GlitchController`](crate::GlitchController) operations (`corrupt`, `distort`,
//! `screen_noise`) each race a timer against a shared stop broadcast:
//!
//! - timer first: [`EffectOutcome::Completed`](crate::EffectOutcome::Completed)
//! - [`stop_all`](crate::GlitchController::stop_all) first:
//!   [`EffectOutcome::Interrupted`](crate::EffectOutcome::Interrupted)
//! - caller token first: [`EffectOutcome::Cancelled`](crate::EffectOutcome::Cancelled)
//!
//! `stop_all` fires the broadcast, retires it and arms a fresh one, so effects started later
//! run normally.
//!
//! ## Time
//!
//! [`Clock`](crate::Clock) provides wall ("unscaled") and game ("scaled") time. Presenters
//! default to unscaled time; glitch durations run on scaled time, so slowing the game slows the
//! glitches too. Both are tokio-timer based and therefore deterministic under
//! `#[tokio::test(start_paused = true)]`.
