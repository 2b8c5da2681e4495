use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::{
    effects::distortion::DistortionKind,
    foundation::clock::{Clock, TimeBase},
    foundation::error::{NovelKitError, NovelKitResult},
};

/// How a glitch operation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectOutcome {
    /// The effect ran for its full duration.
    Completed,
    /// [`GlitchController::stop_all`] fired while the effect was running.
    Interrupted,
    /// The caller's token fired.
    Cancelled,
}

/// Coordinator settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    /// Length of one scheduling tick, used by [`GlitchController::distort`].
    pub frame_interval_seconds: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            frame_interval_seconds: 1.0 / 60.0,
        }
    }
}

impl GlitchConfig {
    pub fn from_json(s: &str) -> NovelKitResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn validate(&self) -> NovelKitResult<()> {
        let v = self.frame_interval_seconds;
        if !v.is_finite() || v < 0.0 {
            return Err(NovelKitError::invalid_argument(format!(
                "frame_interval_seconds must be finite and >= 0, got {v}"
            )));
        }
        Ok(())
    }
}

/// One generation of the shared stop mechanism: a cancellation scope plus a one-shot broadcast.
#[derive(Debug)]
struct StopSignal {
    token: CancellationToken,
    tx: broadcast::Sender<()>,
}

impl StopSignal {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            token: CancellationToken::new(),
            tx,
        }
    }
}

/// Runs short-lived glitch bursts that can all be stopped at once.
///
/// Every operation races its own timer against the current stop broadcast.
/// [`GlitchController::stop_all`] fires that broadcast, retires it and installs a fresh one, so
/// operations started afterwards are unaffected.
///
/// The stop signal is swapped under a lock, so a new operation can never subscribe to a
/// signal that is being retired.
#[derive(Debug)]
pub struct GlitchController {
    clock: Arc<Clock>,
    config: GlitchConfig,
    stop: Mutex<StopSignal>,
}

fn validate_range(start_index: i64, end_index: i64) -> NovelKitResult<()> {
    if start_index < 0 {
        return Err(NovelKitError::invalid_argument(format!(
            "start_index must be >= 0, got {start_index}"
        )));
    }
    if end_index < start_index {
        return Err(NovelKitError::invalid_argument(format!(
            "end_index must be >= start_index, got {start_index}..{end_index}"
        )));
    }
    Ok(())
}

pub(crate) fn clamp_duration(secs: f64) -> f64 {
    secs.max(0.0)
}

pub(crate) fn clamp_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() {
        return 0.0;
    }
    intensity.clamp(0.0, 1.0)
}

impl GlitchController {
    pub fn new(clock: Arc<Clock>) -> Self {
        Self {
            clock,
            config: GlitchConfig::default(),
            stop: Mutex::new(StopSignal::new()),
        }
    }

    pub fn with_config(clock: Arc<Clock>, config: GlitchConfig) -> NovelKitResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(clock)
        })
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    fn stop_signal(&self) -> MutexGuard<'_, StopSignal> {
        self.stop.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of operations currently racing the stop broadcast.
    pub fn in_flight(&self) -> usize {
        self.stop_signal().tx.receiver_count()
    }

    /// Corrupt glyphs `start_index..=end_index` for `duration_secs` of scaled time.
    pub async fn corrupt(
        &self,
        start_index: i64,
        end_index: i64,
        duration_secs: f64,
        cancel: &CancellationToken,
    ) -> NovelKitResult<EffectOutcome> {
        validate_range(start_index, end_index)?;
        let duration = clamp_duration(duration_secs);
        tracing::info!(start_index, end_index, duration, "applying glyph corruption");

        let outcome = self
            .race(self.clock.delay(duration, TimeBase::Scaled), cancel)
            .await;
        tracing::debug!(?outcome, "glyph corruption finished");
        Ok(outcome)
    }

    /// Distort glyphs `start_index..=end_index` for one scheduling tick.
    pub async fn distort(
        &self,
        start_index: i64,
        end_index: i64,
        kind: DistortionKind,
        cancel: &CancellationToken,
    ) -> NovelKitResult<EffectOutcome> {
        validate_range(start_index, end_index)?;
        tracing::info!(?kind, start_index, end_index, "applying vertex distortion");

        let tick = self.config.frame_interval_seconds;
        let outcome = self
            .race(self.clock.delay(tick, TimeBase::Scaled), cancel)
            .await;
        tracing::debug!(?outcome, "vertex distortion finished");
        Ok(outcome)
    }

    /// Full-screen noise at `intensity` (clamped into `[0, 1]`) for `duration_secs`.
    ///
    /// Only the timing lives here; drawing the noise at that intensity is the renderer's job.
    pub async fn screen_noise(
        &self,
        intensity: f64,
        duration_secs: f64,
        cancel: &CancellationToken,
    ) -> EffectOutcome {
        let intensity = clamp_intensity(intensity);
        let duration = clamp_duration(duration_secs);
        tracing::info!(intensity, duration, "playing screen noise");

        let outcome = self
            .race(self.clock.delay(duration, TimeBase::Scaled), cancel)
            .await;
        tracing::debug!(?outcome, "screen noise finished");
        outcome
    }

    /// Interrupt every operation in flight and arm a fresh stop signal.
    pub fn stop_all(&self) {
        let mut stop = self.stop_signal();
        tracing::info!(in_flight = stop.tx.receiver_count(), "stopping all glitch effects");

        // Err only means nobody is listening.
        let _ = stop.tx.send(());
        stop.token.cancel();
        *stop = StopSignal::new();
    }

    async fn race(
        &self,
        timer: impl Future<Output = ()>,
        cancel: &CancellationToken,
    ) -> EffectOutcome {
        let (stop_token, mut stop_rx) = {
            let stop = self.stop_signal();
            (stop.token.clone(), stop.tx.subscribe())
        };

        // Combined scope of the caller token and the current stop generation; cancelled on
        // every exit to release whichever side lost.
        let scope = stop_token.child_token();
        let _release = scope.clone().drop_guard();

        let effect = async {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => EffectOutcome::Cancelled,
                _ = scope.cancelled() => EffectOutcome::Interrupted,
                _ = timer => EffectOutcome::Completed,
            }
        };

        tokio::select! {
            biased;
            Ok(()) = stop_rx.recv() => EffectOutcome::Interrupted,
            outcome = effect => outcome,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitch.rs"]
mod tests;
