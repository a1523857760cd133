#![forbid(unsafe_code)]

//! Wall-clock animation primitives.
//!
//! Every animation here is a pure function of `(start, now)`. Sampling the
//! same animation twice in one frame, or skipping a frame, never changes the
//! total duration: nothing is accumulated per tick.
//!
//! - [`Tween`]: eased interpolation between two values over a fixed duration.
//! - [`Decay`]: exponential-friction motion from an initial velocity.
//!
//! # Invariants
//!
//! 1. Easing functions map `[0, 1]` onto `[0, 1]` with `f(0) = 0`, `f(1) = 1`.
//! 2. A zero-duration tween is complete at its start instant and samples to
//!    its target.
//! 3. Sampling before the start instant yields the start value.

mod decay;
mod tween;

pub use decay::Decay;
pub use tween::Tween;

/// Result of advancing an animation to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// More frames are needed.
    InProgress,
    /// The animation reached its end state.
    Done,
}

impl AnimationStatus {
    #[inline]
    #[must_use]
    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// An easing curve over normalized time.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out.
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-out: `(t - 1)^3 + 1`.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

/// Quintic ease-out: `(t - 1)^5 + 1`. The page-snap curve.
#[inline]
#[must_use]
pub fn ease_out_quint(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t * t * t + 1.0
}

/// Decelerate curve for the overscroll release: `1 - (1 - t)^2`.
#[inline]
#[must_use]
pub fn decelerate(t: f32) -> f32 {
    ease_out(t)
}
