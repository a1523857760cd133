#![forbid(unsafe_code)]

//! Eased interpolation between two values.

use web_time::{Duration, Instant};

use super::{AnimationStatus, EasingFn, ease_out_quint};

/// Interpolates `from → to` over `duration`, starting at `start`.
///
/// The default easing is [`ease_out_quint`].
#[derive(Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: EasingFn,
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl Tween {
    /// Create a tween starting at `start`.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration, start: Instant) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing: ease_out_quint,
        }
    }

    /// Set the easing function (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> f32 {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> Instant {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear time progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Eased value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.progress_at(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * (self.easing)(t)
    }

    /// Whether the tween has reached its end at `now`.
    #[must_use]
    pub fn status_at(&self, now: Instant) -> AnimationStatus {
        if self.progress_at(now) >= 1.0 {
            AnimationStatus::Done
        } else {
            AnimationStatus::InProgress
        }
    }

    /// Remaining distance to the target at `now` (absolute).
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> f32 {
        (self.to - self.value_at(now)).abs()
    }
}
