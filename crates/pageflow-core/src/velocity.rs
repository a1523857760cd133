#![forbid(unsafe_code)]

//! Pointer velocity estimation.
//!
//! [`VelocityTracker`] keeps a small ring buffer of `(time, x)` samples and
//! fits a least-squares line through the samples inside a short horizon.
//! The slope is the release velocity in px/s.
//!
//! # Invariants
//!
//! 1. Samples older than [`HORIZON`] relative to the newest sample are
//!    ignored, as is everything before a pause longer than [`ASSUME_STOPPED`].
//! 2. Fewer than two usable samples yield a velocity of `0.0`.
//! 3. `velocity_with_max` never exceeds `max` in magnitude.

use web_time::{Duration, Instant};

#[cfg(feature = "tracing")]
use crate::logging::trace;
#[cfg(not(feature = "tracing"))]
use crate::trace;

const HISTORY: usize = 20;

/// Only samples this close to the newest one contribute.
pub const HORIZON: Duration = Duration::from_millis(100);

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Instant,
    x: f32,
}

/// Ring-buffer velocity estimator for one axis.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY],
    /// Index of the newest sample.
    head: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY],
            head: 0,
        }
    }

    /// Record the pointer's x position at `time`.
    pub fn add(&mut self, time: Instant, x: f32) {
        self.head = (self.head + 1) % HISTORY;
        self.samples[self.head] = Some(Sample { time, x });
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples = [None; HISTORY];
        self.head = 0;
    }

    /// Number of samples currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples[self.head].is_none()
    }

    /// Estimated velocity in px/s.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.head] else {
            return 0.0;
        };

        // Collect (t, x) newest → oldest with t in seconds relative to newest.
        let mut ts = [0.0f64; HISTORY];
        let mut xs = [0.0f64; HISTORY];
        let mut n = 0usize;
        let mut idx = self.head;
        let mut prev_time = newest.time;
        while let Some(sample) = self.samples[idx] {
            let age = newest.time.saturating_duration_since(sample.time);
            let gap = prev_time.saturating_duration_since(sample.time);
            if age > HORIZON || gap > ASSUME_STOPPED {
                break;
            }
            ts[n] = -age.as_secs_f64();
            xs[n] = f64::from(sample.x);
            n += 1;
            if n == HISTORY {
                break;
            }
            prev_time = sample.time;
            idx = if idx == 0 { HISTORY - 1 } else { idx - 1 };
        }

        if n < 2 {
            return 0.0;
        }

        let mean_t = ts[..n].iter().sum::<f64>() / n as f64;
        let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..n {
            let dt = ts[i] - mean_t;
            num += dt * (xs[i] - mean_x);
            den += dt * dt;
        }
        if den <= f64::EPSILON {
            return 0.0;
        }
        (num / den) as f32
    }

    /// Estimated velocity clamped to `[-max, max]`. A non-positive or
    /// non-finite `max` yields `0.0`.
    #[must_use]
    pub fn velocity_with_max(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let v = self.velocity();
        if !v.is_finite() {
            return 0.0;
        }
        if v.abs() > max {
            trace!(velocity = v, max = max, "velocity clamped");
        }
        v.clamp(-max, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);

    fn feed(tracker: &mut VelocityTracker, t0: Instant, px_per_step: f32, steps: u32) {
        for i in 0..steps {
            tracker.add(t0 + MS_10 * i, px_per_step * i as f32);
        }
    }

    #[test]
    fn empty_is_zero() {
        let tracker = VelocityTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn single_sample_is_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add(Instant::now(), 10.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn constant_motion() {
        let mut tracker = VelocityTracker::new();
        // 20px per 10ms = 2000 px/s
        feed(&mut tracker, Instant::now(), 20.0, 8);
        assert!((tracker.velocity() - 2000.0).abs() < 1.0);
    }

    #[test]
    fn negative_motion() {
        let mut tracker = VelocityTracker::new();
        feed(&mut tracker, Instant::now(), -5.0, 8);
        assert!((tracker.velocity() + 500.0).abs() < 1.0);
    }

    #[test]
    fn pause_resets_estimate() {
        let mut tracker = VelocityTracker::new();
        let t0 = Instant::now();
        feed(&mut tracker, t0, 20.0, 5);
        // Hold still for 60ms then one more sample at the same x.
        tracker.add(t0 + Duration::from_millis(100), 80.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn old_samples_ignored() {
        let mut tracker = VelocityTracker::new();
        let t0 = Instant::now();
        // Fast early motion outside the horizon.
        for i in 0..4 {
            tracker.add(t0 + MS_10 * i, 100.0 * i as f32);
        }
        // Slow motion over the last 100ms.
        for i in 0..12 {
            tracker.add(
                t0 + Duration::from_millis(40) + MS_10 * i,
                300.0 + i as f32,
            );
        }
        assert!((tracker.velocity() - 100.0).abs() < 1.0);
    }

    #[test]
    fn clamped_to_max() {
        let mut tracker = VelocityTracker::new();
        feed(&mut tracker, Instant::now(), 200.0, 6);
        assert_eq!(tracker.velocity_with_max(8000.0), 8000.0);
        assert_eq!(tracker.velocity_with_max(0.0), 0.0);
        assert_eq!(tracker.velocity_with_max(f32::NAN), 0.0);
    }

    #[test]
    fn clear_forgets() {
        let mut tracker = VelocityTracker::new();
        feed(&mut tracker, Instant::now(), 20.0, 6);
        assert_eq!(tracker.len(), 6);
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.velocity(), 0.0);
    }
}
