#![forbid(unsafe_code)]

//! Exponential-friction fling.
//!
//! Position follows `x(t) = x0 + v0·τ·(1 − e^(−t/τ))`, so velocity decays as
//! `v(t) = v0·e^(−t/τ)` and the resting position is `x0 + v0·τ`. The fling is
//! considered done once `|v(t)|` drops below the stop velocity.

use web_time::{Duration, Instant};

use super::AnimationStatus;

/// Default velocity (units/s) below which a fling is treated as stopped.
const DEFAULT_STOP_VELOCITY: f32 = 20.0;

/// An exponential decay from an initial velocity.
#[derive(Debug, Clone, Copy)]
pub struct Decay {
    origin: f32,
    velocity: f32,
    time_constant: Duration,
    start: Instant,
    stop_velocity: f32,
}

impl Decay {
    /// Create a fling from `origin` with `velocity` (units/s).
    ///
    /// A zero time constant is clamped to 1ms.
    #[must_use]
    pub fn new(origin: f32, velocity: f32, time_constant: Duration, start: Instant) -> Self {
        Self {
            origin,
            velocity,
            time_constant: time_constant.max(Duration::from_millis(1)),
            start,
            stop_velocity: DEFAULT_STOP_VELOCITY,
        }
    }

    /// Set the stop velocity (builder pattern). Negative values are treated as 0.
    #[must_use]
    pub fn stop_velocity(mut self, v: f32) -> Self {
        self.stop_velocity = v.max(0.0);
        self
    }

    fn tau(&self) -> f32 {
        self.time_constant.as_secs_f32()
    }

    fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Asymptotic resting position of the fling. The fling stops slightly
    /// short of it, at `|v| = stop_velocity`.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.origin + self.velocity * self.tau()
    }

    /// Where the fling comes to rest: the position at which `|v|` reaches
    /// the stop velocity.
    #[must_use]
    pub fn resting_value(&self) -> f32 {
        let v = self.velocity.abs();
        if v <= self.stop_velocity {
            return self.origin;
        }
        self.origin + self.velocity * self.tau() * (1.0 - self.stop_velocity / v)
    }

    /// Time from start until the fling stops.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let v = self.velocity.abs();
        if v <= self.stop_velocity {
            return Duration::ZERO;
        }
        if self.stop_velocity == 0.0 {
            return Duration::MAX;
        }
        Duration::from_secs_f32(self.tau() * (v / self.stop_velocity).ln())
    }

    /// Position at `now`. Frozen once the fling has stopped.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.elapsed(now).min(self.duration().as_secs_f32());
        self.origin + self.velocity * self.tau() * (1.0 - (-t / self.tau()).exp())
    }

    /// Velocity at `now`.
    #[must_use]
    pub fn velocity_at(&self, now: Instant) -> f32 {
        let t = self.elapsed(now);
        self.velocity * (-t / self.tau()).exp()
    }

    #[must_use]
    pub fn status_at(&self, now: Instant) -> AnimationStatus {
        if self.velocity_at(now).abs() <= self.stop_velocity {
            AnimationStatus::Done
        } else {
            AnimationStatus::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAU: Duration = Duration::from_millis(325);

    #[test]
    fn moves_in_velocity_direction() {
        let t0 = Instant::now();
        let d = Decay::new(100.0, -2000.0, TAU, t0);
        assert!(d.value_at(t0 + Duration::from_millis(50)) < 100.0);
        assert!(d.target() < 100.0);
    }

    #[test]
    fn settles_on_target() {
        let t0 = Instant::now();
        let d = Decay::new(0.0, 3000.0, TAU, t0);
        let end = t0 + d.duration() + Duration::from_millis(1);
        assert_eq!(d.status_at(end), AnimationStatus::Done);
        assert_eq!(d.value_at(end), d.value_at(end + TAU));
        assert!((d.target() - 975.0).abs() < 0.5);
        // Stops within stop_velocity * tau of the asymptote.
        assert!((d.target() - d.value_at(end)).abs() < 7.0);
        assert!((d.resting_value() - d.value_at(end)).abs() < 0.5);
    }

    #[test]
    fn slow_fling_is_done_immediately() {
        let t0 = Instant::now();
        let d = Decay::new(0.0, 10.0, TAU, t0);
        assert_eq!(d.status_at(t0), AnimationStatus::Done);
        assert_eq!(d.duration(), Duration::ZERO);
    }

    #[test]
    fn velocity_decays_monotonically() {
        let t0 = Instant::now();
        let d = Decay::new(0.0, 5000.0, TAU, t0);
        let mut prev = f32::INFINITY;
        for ms in (0..1000).step_by(50) {
            let v = d.velocity_at(t0 + Duration::from_millis(ms));
            assert!(v <= prev);
            prev = v;
        }
    }
}
