use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::{
    foundation::clock::{Clock, TimeBase},
    foundation::error::{NovelKitError, NovelKitResult},
    present::options::{EffectRange, TextPresenterOptions},
    surface::TextSurface,
};

/// How a [`TextPresenter::present`] call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentOutcome {
    /// Every character was revealed one interval at a time.
    Completed,
    /// A skip request revealed the remainder at once.
    Skipped,
    /// The caller's token fired first. Visible count stays where the last tick left it.
    Cancelled,
}

#[derive(Debug, Default)]
struct SessionState {
    running: AtomicBool,
    skip_requested: AtomicBool,
    generation: AtomicU64,
}

impl SessionState {
    fn begin(&self) -> NovelKitResult<SessionGuard<'_>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(NovelKitError::invalid_state(
                "a presentation is already running on this surface",
            ));
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.skip_requested.store(false, Ordering::Release);
        Ok(SessionGuard {
            state: self,
            generation,
        })
    }
}

/// Returns the session to idle on every exit path.
struct SessionGuard<'a> {
    state: &'a SessionState,
    generation: u64,
}

impl SessionGuard<'_> {
    /// False once [`TextPresenter::reset`] has retired this session.
    fn is_current(&self) -> bool {
        self.state.generation.load(Ordering::Acquire) == self.generation
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        // A reset retires this generation; a newer session owns the flag from then on.
        if self.is_current() {
            self.state.running.store(false, Ordering::Release);
        }
    }
}

/// Typewriter reveal driver for one surface.
///
/// Cloning yields another handle to the same session, so one task can await
/// [`TextPresenter::present`] while another calls [`TextPresenter::request_skip`]. Only one
/// presentation may run per surface at a time.
pub struct TextPresenter<S> {
    surface: Arc<Mutex<S>>,
    state: Arc<SessionState>,
    clock: Arc<Clock>,
}

impl<S> Clone for TextPresenter<S> {
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: TextSurface> TextPresenter<S> {
    /// Presenter with a private clock.
    pub fn new(surface: S) -> Self {
        Self::with_clock(surface, Arc::new(Clock::new()))
    }

    pub fn with_clock(surface: S, clock: Arc<Clock>) -> Self {
        Self::from_shared(Arc::new(Mutex::new(surface)), clock)
    }

    /// Presenter over a surface that other parts of the application also hold.
    pub fn from_shared(surface: Arc<Mutex<S>>, clock: Arc<Clock>) -> Self {
        Self {
            surface,
            state: Arc::new(SessionState::default()),
            clock,
        }
    }

    /// Lock the surface. Never held across a suspension point by the presenter.
    pub fn surface(&self) -> MutexGuard<'_, S> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn shared_surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }

    pub fn clock(&self) -> &Arc<Clock> {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
    }

    pub fn is_skip_requested(&self) -> bool {
        self.state.skip_requested.load(Ordering::Acquire)
    }

    /// Reveal `message` one character per `options.character_interval_seconds`.
    ///
    /// Fails with [`NovelKitError::InvalidState`] if a presentation is already running and with
    /// [`NovelKitError::InvalidArgument`] for invalid options; neither touches the surface.
    /// Cancellation is observed at the start of each tick and during the inter-character delay.
    #[tracing::instrument(skip_all, fields(chars = message.chars().count()))]
    pub async fn present(
        &self,
        message: &str,
        options: &TextPresenterOptions,
        cancel: &CancellationToken,
    ) -> NovelKitResult<PresentOutcome> {
        options.validate()?;
        let session = self.state.begin()?;
        let base = options.time_base();

        let total = {
            let mut s = self.surface();
            s.set_rich_text(true);
            s.set_text(message);
            s.set_max_visible_characters(0);
            s.force_layout();
            s.character_count()
        };
        tracing::debug!(total, ranges = options.effect_ranges.len(), "presentation started");

        for visible in 0..=total {
            if cancel.is_cancelled() {
                tracing::debug!(visible, "presentation cancelled");
                return Ok(PresentOutcome::Cancelled);
            }

            if self.is_skip_requested() && options.reveal_immediately_on_skip {
                if !self.tick(&session, total, &options.effect_ranges, base) {
                    return Ok(retired(visible));
                }
                tracing::debug!(visible, total, "presentation skipped to end");
                return Ok(PresentOutcome::Skipped);
            }

            if !self.tick(&session, visible, &options.effect_ranges, base) {
                return Ok(retired(visible));
            }

            if visible < total {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!(visible, "presentation cancelled");
                        return Ok(PresentOutcome::Cancelled);
                    }
                    _ = self.clock.delay(options.character_interval_seconds, base) => {}
                }
            }
        }

        tracing::debug!(total, "presentation completed");
        Ok(PresentOutcome::Completed)
    }

    /// Ask the running presentation to finish early. Ignored while idle.
    ///
    /// The flag is observed on the next tick, so latency is at most one character interval.
    pub fn request_skip(&self) {
        if !self.is_running() {
            tracing::trace!("skip requested while idle; ignored");
            return;
        }
        self.state.skip_requested.store(true, Ordering::Release);
        tracing::debug!("skip requested");
    }

    /// Force the session back to idle and hide all characters, whatever its state.
    ///
    /// A running `present` stops touching the surface and returns
    /// [`PresentOutcome::Cancelled`] at its next tick.
    pub fn reset(&self) {
        self.state.generation.fetch_add(1, Ordering::AcqRel);
        self.state.skip_requested.store(false, Ordering::Release);
        self.state.running.store(false, Ordering::Release);
        self.surface().set_max_visible_characters(0);
    }

    /// Returns false without touching the surface once `session` has been retired.
    fn tick(
        &self,
        session: &SessionGuard<'_>,
        visible: usize,
        ranges: &[EffectRange],
        base: TimeBase,
    ) -> bool {
        let time_secs = self.clock.now(base);
        // Checked under the surface lock; `reset` bumps the generation before taking it.
        let mut s = self.surface();
        if !session.is_current() {
            return false;
        }
        s.set_max_visible_characters(visible);
        s.reset_glyphs();
        apply_effect_ranges(&mut *s, ranges, visible, time_secs);
        tracing::trace!(visible, time_secs, "tick");
        true
    }
}

fn retired(visible: usize) -> PresentOutcome {
    tracing::debug!(visible, "presentation retired by reset");
    PresentOutcome::Cancelled
}

/// Run every range's transforms over its intersection with the revealed prefix.
///
/// Recomputed each tick; ranges that do not intersect are skipped for that tick.
pub(crate) fn apply_effect_ranges(
    surface: &mut dyn TextSurface,
    ranges: &[EffectRange],
    visible_count: usize,
    time_secs: f64,
) {
    for range in ranges {
        let Some((start, end)) = range.clip_to_visible(visible_count) else {
            continue;
        };
        for modifier in &range.modifiers {
            modifier.apply(surface, start, end, time_secs);
        }
    }
}

/// Creates presenters that share one clock.
#[derive(Clone, Debug, Default)]
pub struct PresenterFactory {
    clock: Arc<Clock>,
}

impl PresenterFactory {
    pub fn new(clock: Arc<Clock>) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &Arc<Clock> {
        &self.clock
    }

    pub fn create<S: TextSurface>(&self, surface: S) -> TextPresenter<S> {
        TextPresenter::with_clock(surface, Arc::clone(&self.clock))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/presenter.rs"]
mod tests;
