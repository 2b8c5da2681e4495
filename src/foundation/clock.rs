use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

use crate::foundation::error::{NovelKitError, NovelKitResult};

/// Remaining scaled time below this is treated as elapsed.
const DELAY_EPSILON_SECS: f64 = 1e-6;

/// Which timeline a time value or a delay is measured on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeBase {
    /// Game time: unscaled time multiplied by the clock's time scale.
    Scaled,
    /// Wall time since the clock was created.
    Unscaled,
}

#[derive(Clone, Copy, Debug)]
struct ScaleAnchor {
    scale: f64,
    unscaled_at: f64,
    scaled_at: f64,
}

/// Shared time source for presenters and glitch effects.
///
/// Built on `tokio::time::Instant`, so paused test runtimes advance it deterministically.
/// Scaled time accumulates piecewise: changing the scale re-anchors the timeline instead of
/// rescaling time that has already passed.
#[derive(Debug)]
pub struct Clock {
    origin: Instant,
    anchor: Mutex<ScaleAnchor>,
    scale_changed: Notify,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Start a clock at time zero with a time scale of 1.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            anchor: Mutex::new(ScaleAnchor {
                scale: 1.0,
                unscaled_at: 0.0,
                scaled_at: 0.0,
            }),
            scale_changed: Notify::new(),
        }
    }

    fn anchor(&self) -> ScaleAnchor {
        *self.anchor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seconds of wall time since the clock was created.
    pub fn unscaled_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Seconds of scaled time since the clock was created.
    pub fn scaled_secs(&self) -> f64 {
        let a = self.anchor();
        a.scaled_at + (self.unscaled_secs() - a.unscaled_at) * a.scale
    }

    /// Current time on `base`.
    pub fn now(&self, base: TimeBase) -> f64 {
        match base {
            TimeBase::Scaled => self.scaled_secs(),
            TimeBase::Unscaled => self.unscaled_secs(),
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.anchor().scale
    }

    /// Change the speed of scaled time. `0` freezes it.
    pub fn set_time_scale(&self, scale: f64) -> NovelKitResult<()> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(NovelKitError::invalid_argument(format!(
                "time scale must be finite and >= 0, got {scale}"
            )));
        }
        {
            let mut a = self.anchor.lock().unwrap_or_else(PoisonError::into_inner);
            let unscaled = self.unscaled_secs();
            a.scaled_at += (unscaled - a.unscaled_at) * a.scale;
            a.unscaled_at = unscaled;
            a.scale = scale;
        }
        self.scale_changed.notify_waiters();
        tracing::debug!(scale, "clock time scale changed");
        Ok(())
    }

    /// Suspend for `secs` measured on `base`.
    ///
    /// Zero, negative and NaN lengths return at once; `+inf` never returns.
    pub async fn delay(&self, secs: f64, base: TimeBase) {
        if secs.is_nan() || secs <= 0.0 {
            return;
        }
        if secs.is_infinite() {
            std::future::pending::<()>().await;
        }
        match base {
            TimeBase::Unscaled => sleep_secs(secs).await,
            TimeBase::Scaled => self.delay_scaled(secs).await,
        }
    }

    async fn delay_scaled(&self, secs: f64) {
        let target = self.scaled_secs() + secs;
        loop {
            // Registered before reading the scale so a concurrent change is never missed.
            let changed = self.scale_changed.notified();
            let remaining = target - self.scaled_secs();
            if remaining <= DELAY_EPSILON_SECS {
                return;
            }
            let scale = self.time_scale();
            if scale <= 0.0 {
                changed.await;
                continue;
            }
            tokio::select! {
                _ = sleep_secs(remaining / scale) => {}
                _ = changed => {}
            }
        }
    }
}

/// Sleep for `secs` of tokio time. Lengths past `Duration::MAX` never elapse.
async fn sleep_secs(secs: f64) {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) => tokio::time::sleep(d).await,
        Err(_) => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/clock.rs"]
mod tests;
