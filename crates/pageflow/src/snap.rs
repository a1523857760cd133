#![forbid(unsafe_code)]

//! Snap and fling animation.
//!
//! [`SnapAnimator`] drives the [`ScrollModel`] offset toward a page's scroll
//! target (or, in free-scroll mode, along a decaying fling) and commits the
//! destination page when the motion ends.
//!
//! Motion is sampled from wall-clock time: `tick(now)` evaluates the curve
//! at `now`, so frame rate affects smoothness but never the total duration.
//!
//! # Invariants
//!
//! 1. Starting a snap while another is in flight replaces it. The new curve
//!    starts from the offset last written to the model, so there is no jump.
//! 2. The destination page is committed exactly once, on the tick that
//!    finishes the motion (or on [`force_finish`](SnapAnimator::force_finish)).
//! 3. A zero-duration snap finishes on the next tick.
//!
//! # Failure Modes
//!
//! - Zero viewport width: velocity snaps fall back to the default duration.

use std::f32::consts::PI;

use pageflow_core::animation::{Decay, Tween};
use web_time::{Duration, Instant};

use crate::config::PagerConfig;
use crate::scroll_model::ScrollModel;

/// Result of advancing the animator by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTick {
    /// Nothing was in flight and nothing was pending.
    Idle,
    /// Still moving.
    InProgress,
    /// Motion ended and `page` is now the current page.
    Settled { page: usize, previous: usize },
}

impl SnapTick {
    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Settled { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Snap(Tween),
    Fling(Decay),
}

/// Animates the scroll offset between pages.
#[derive(Debug, Clone)]
pub struct SnapAnimator {
    motion: Option<Motion>,
    default_duration: Duration,
    min_fling_velocity: f32,
    min_snap_velocity: f32,
    fling_time_constant: Duration,
}

impl SnapAnimator {
    #[must_use]
    pub fn new(config: &PagerConfig) -> Self {
        Self {
            motion: None,
            default_duration: config.page_snap_duration(),
            min_fling_velocity: config.min_fling_velocity_px(),
            min_snap_velocity: config.min_snap_velocity_px(),
            fling_time_constant: config.fling.free_scroll_time_constant(),
        }
    }

    /// Whether a snap or fling is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Whether the motion in flight is a free-scroll fling.
    #[inline]
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        matches!(self.motion, Some(Motion::Fling(_)))
    }

    /// Offset the motion in flight will stop at.
    #[must_use]
    pub fn target_offset(&self) -> Option<i32> {
        self.motion.map(|m| match m {
            Motion::Snap(tw) => tw.target().round() as i32,
            Motion::Fling(d) => d.resting_value().round() as i32,
        })
    }

    /// Distance left to travel, or 0 when idle.
    #[must_use]
    pub fn remaining(&self, model: &ScrollModel) -> f32 {
        self.target_offset()
            .map_or(0.0, |target| (target - model.offset()).abs() as f32)
    }

    // --- Starting motion ----------------------------------------------------

    /// Snap to `page` with the default duration. Returns the validated page.
    pub fn snap_to_page(&mut self, model: &mut ScrollModel, page: usize, now: Instant) -> usize {
        self.snap_to_page_with_duration(model, page, self.default_duration, now)
    }

    /// Snap to `page` over `duration`. Returns the validated page.
    pub fn snap_to_page_with_duration(
        &mut self,
        model: &mut ScrollModel,
        page: usize,
        duration: Duration,
        now: Instant,
    ) -> usize {
        let page = model.validate_page(page);
        let delta = model.page_offset(page) - model.offset();
        self.start(model, page, delta, duration, now);
        page
    }

    /// Snap to `page` with a duration derived from the release velocity.
    pub fn snap_to_page_with_velocity(
        &mut self,
        model: &mut ScrollModel,
        page: usize,
        velocity: f32,
        now: Instant,
    ) -> usize {
        let page = model.validate_page(page);
        let delta = model.page_offset(page) - model.offset();
        let duration = self.velocity_snap_duration(delta, model.viewport_width(), velocity);
        self.start(model, page, delta, duration, now);
        page
    }

    /// Duration of a snap covering `delta` pixels released at `velocity`.
    ///
    /// Slow releases use the default duration. Faster ones travel an
    /// effective distance of between half and a little over one viewport,
    /// shaped by a sine so that short hops are not sluggish.
    #[must_use]
    pub fn velocity_snap_duration(&self, delta: i32, viewport_width: i32, velocity: f32) -> Duration {
        let half = (viewport_width / 2) as f32;
        if velocity.abs() < self.min_fling_velocity || half <= 0.0 {
            return self.default_duration;
        }
        let ratio = (delta.abs() as f32 / (2.0 * half)).min(1.0);
        let distance = half + half * distance_influence(ratio);
        let speed = velocity.abs().max(self.min_snap_velocity);
        let ms = 4.0 * (1000.0 * (distance / speed).abs()).round();
        Duration::from_millis(ms as u64)
    }

    /// Start a decaying fling from the current offset (free-scroll mode).
    ///
    /// `velocity` is in offset units per second: positive scrolls toward
    /// higher offsets.
    pub fn fling(&mut self, model: &mut ScrollModel, velocity: f32, now: Instant) {
        model.set_pending_page(None);
        let decay = Decay::new(model.offset() as f32, velocity, self.fling_time_constant, now);
        tracing::debug!(
            target: "pageflow.snap",
            velocity,
            rest = decay.resting_value(),
            "fling started"
        );
        self.motion = Some(Motion::Fling(decay));
    }

    fn start(
        &mut self,
        model: &mut ScrollModel,
        page: usize,
        delta: i32,
        duration: Duration,
        now: Instant,
    ) {
        if self.motion.is_some() {
            tracing::trace!(target: "pageflow.snap", page, "superseding in-flight motion");
        }
        model.set_pending_page(Some(page));
        let from = model.offset() as f32;
        self.motion = Some(Motion::Snap(Tween::new(
            from,
            from + delta as f32,
            duration,
            now,
        )));
        tracing::debug!(
            target: "pageflow.snap",
            page,
            delta,
            duration_ms = duration.as_millis() as u64,
            "snap started"
        );
    }

    // --- Advancing ----------------------------------------------------------

    /// Write the offset for `now` into the model.
    ///
    /// A pending page with no motion in flight (after an abort that kept
    /// it) is committed here.
    pub fn tick(&mut self, model: &mut ScrollModel, now: Instant) -> SnapTick {
        let Some(motion) = self.motion else {
            return Self::commit(model);
        };
        let (x, done) = match motion {
            Motion::Snap(tw) => (tw.value_at(now), tw.status_at(now).is_done()),
            Motion::Fling(d) => (d.value_at(now), d.status_at(now).is_done()),
        };
        let result = model.scroll_to(x.round() as i32);
        if result.exceeded_free_bounds {
            tracing::trace!(target: "pageflow.snap", x, "left free-scroll bounds");
            return self.force_finish(model);
        }
        if !done {
            return SnapTick::InProgress;
        }
        self.motion = None;
        if matches!(motion, Motion::Fling(_)) {
            model.set_pending_page(model.nearest_page_to_center());
        }
        Self::commit(model)
    }

    /// Jump to the end of the motion in flight and commit.
    pub fn force_finish(&mut self, model: &mut ScrollModel) -> SnapTick {
        if let Some(motion) = self.motion.take() {
            match motion {
                Motion::Snap(tw) => {
                    model.scroll_to(tw.target().round() as i32);
                }
                Motion::Fling(d) => {
                    model.scroll_to(d.resting_value().round() as i32);
                    model.set_pending_page(model.nearest_page_to_center());
                }
            }
        }
        Self::commit(model)
    }

    /// Stop where the offset currently is.
    ///
    /// With `reset_pending` the destination is dropped; otherwise the next
    /// tick commits it as the current page.
    pub fn abort(&mut self, model: &mut ScrollModel, reset_pending: bool) {
        if self.motion.take().is_some() {
            tracing::trace!(target: "pageflow.snap", offset = model.offset(), "motion aborted");
        }
        if reset_pending {
            model.set_pending_page(None);
        }
    }

    fn commit(model: &mut ScrollModel) -> SnapTick {
        let Some(next) = model.pending_page() else {
            return SnapTick::Idle;
        };
        let previous = model.current_page();
        model.set_current_page(next);
        model.set_pending_page(None);
        let page = model.current_page();
        tracing::debug!(target: "pageflow.snap", page, previous, "page settled");
        SnapTick::Settled { page, previous }
    }
}

/// Bend a linear distance ratio so that mid-range hops are shortened.
fn distance_influence(ratio: f32) -> f32 {
    ((ratio - 0.5) * 0.3 * PI / 2.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PageExtent;
    use pageflow_core::geometry::Insets;

    const MS_16: Duration = Duration::from_millis(16);
    const MS_750: Duration = Duration::from_millis(750);

    fn setup(count: usize) -> (ScrollModel, SnapAnimator) {
        let config = PagerConfig::default();
        let mut model = ScrollModel::new(true, 0.14);
        model.update_layout(&vec![PageExtent::new(1000, 100); count], 1000, Insets::ZERO, 0, false);
        (model, SnapAnimator::new(&config))
    }

    fn run_to_end(snap: &mut SnapAnimator, model: &mut ScrollModel, t0: Instant) -> (SnapTick, u32) {
        let mut now = t0;
        let mut frames = 0;
        loop {
            now += MS_16;
            frames += 1;
            let tick = snap.tick(model, now);
            if tick != SnapTick::InProgress {
                return (tick, frames);
            }
            assert!(frames < 10_000, "snap never finished");
        }
    }

    #[test]
    fn snap_commits_page_on_completion() {
        let (mut model, mut snap) = setup(5);
        let t0 = Instant::now();
        assert_eq!(snap.snap_to_page(&mut model, 3, t0), 3);
        assert_eq!(model.next_page(), 3);
        assert_eq!(model.current_page(), 0);
        let (tick, _) = run_to_end(&mut snap, &mut model, t0);
        assert_eq!(tick, SnapTick::Settled { page: 3, previous: 0 });
        assert_eq!(model.offset(), 3000);
        assert_eq!(model.pending_page(), None);
        assert!(!snap.is_animating());
    }

    #[test]
    fn snap_target_is_clamped() {
        let (mut model, mut snap) = setup(3);
        let t0 = Instant::now();
        assert_eq!(snap.snap_to_page(&mut model, 42, t0), 2);
        assert_eq!(snap.target_offset(), Some(2000));
    }

    #[test]
    fn duration_is_wall_clock() {
        let (mut model, mut snap) = setup(3);
        let t0 = Instant::now();
        snap.snap_to_page(&mut model, 1, t0);
        assert_eq!(snap.tick(&mut model, t0 + MS_750 - MS_16), SnapTick::InProgress);
        assert!(snap.tick(&mut model, t0 + MS_750).is_settled());
    }

    #[test]
    fn zero_duration_finishes_on_next_tick() {
        let (mut model, mut snap) = setup(3);
        let t0 = Instant::now();
        snap.snap_to_page_with_duration(&mut model, 2, Duration::ZERO, t0);
        assert_eq!(
            snap.tick(&mut model, t0),
            SnapTick::Settled { page: 2, previous: 0 }
        );
        assert_eq!(model.offset(), 2000);
    }

    #[test]
    fn superseding_snap_starts_from_live_offset() {
        let (mut model, mut snap) = setup(5);
        let t0 = Instant::now();
        snap.snap_to_page(&mut model, 2, t0);
        snap.tick(&mut model, t0 + Duration::from_millis(100));
        let live = model.offset();
        assert!(live > 0 && live < 2000);

        snap.snap_to_page(&mut model, 4, t0 + Duration::from_millis(100));
        snap.tick(&mut model, t0 + Duration::from_millis(101));
        assert!((model.offset() - live).abs() < 40, "no visible jump");
        let (tick, _) = run_to_end(&mut snap, &mut model, t0 + Duration::from_millis(101));
        assert_eq!(tick, SnapTick::Settled { page: 4, previous: 0 });
    }

    #[test]
    fn abort_keeping_pending_commits_next_tick() {
        let (mut model, mut snap) = setup(3);
        let t0 = Instant::now();
        snap.snap_to_page(&mut model, 1, t0);
        snap.tick(&mut model, t0 + MS_16);
        let x = model.offset();
        snap.abort(&mut model, false);
        assert!(!snap.is_animating());
        assert_eq!(
            snap.tick(&mut model, t0 + MS_16 + MS_16),
            SnapTick::Settled { page: 1, previous: 0 }
        );
        assert_eq!(model.offset(), x);
    }

    #[test]
    fn abort_with_reset_drops_destination() {
        let (mut model, mut snap) = setup(3);
        let t0 = Instant::now();
        snap.snap_to_page(&mut model, 1, t0);
        snap.abort(&mut model, true);
        assert_eq!(snap.tick(&mut model, t0 + MS_16), SnapTick::Idle);
        assert_eq!(model.current_page(), 0);
    }

    #[test]
    fn force_finish_lands_on_target() {
        let (mut model, mut snap) = setup(4);
        let t0 = Instant::now();
        snap.snap_to_page(&mut model, 3, t0);
        assert_eq!(
            snap.force_finish(&mut model),
            SnapTick::Settled { page: 3, previous: 0 }
        );
        assert_eq!(model.offset(), 3000);
    }

    #[test]
    fn velocity_duration_formula() {
        let (_, snap) = setup(2);
        // Full page at 3000 px/s: distance 500 + 500·sin(0.075π) ≈ 616.7.
        assert_eq!(
            snap.velocity_snap_duration(1000, 1000, 3000.0),
            Duration::from_millis(824)
        );
        // Slow releases are floored at the minimum snap velocity.
        assert_eq!(
            snap.velocity_snap_duration(1000, 1000, 1000.0),
            Duration::from_millis(1644)
        );
        // Below the fling threshold the default duration is used.
        assert_eq!(snap.velocity_snap_duration(1000, 1000, 100.0), MS_750);
        assert_eq!(snap.velocity_snap_duration(1000, 0, 3000.0), MS_750);
    }

    #[test]
    fn faster_release_snaps_sooner() {
        let (_, snap) = setup(2);
        let slow = snap.velocity_snap_duration(600, 1000, 2000.0);
        let fast = snap.velocity_snap_duration(600, 1000, 6000.0);
        assert!(fast < slow);
    }

    #[test]
    fn fling_settles_on_nearest_page() {
        let (mut model, mut snap) = setup(5);
        model.set_free_scroll(true, (0, 4));
        model.scroll_to(1000);
        let t0 = Instant::now();
        snap.fling(&mut model, 3000.0, t0);
        let (tick, _) = run_to_end(&mut snap, &mut model, t0);
        // Rests near 1000 + 968.
        assert_eq!(tick, SnapTick::Settled { page: 2, previous: 0 });
        assert!((model.offset() - 1968).abs() <= 2);
    }

    #[test]
    fn fling_past_free_bounds_is_force_finished() {
        let (mut model, mut snap) = setup(5);
        model.set_free_scroll(true, (0, 2));
        model.scroll_to(1800);
        let t0 = Instant::now();
        snap.fling(&mut model, 6000.0, t0);
        let (tick, _) = run_to_end(&mut snap, &mut model, t0);
        assert!(tick.is_settled());
        assert_eq!(model.offset(), 2000);
        assert!(!snap.is_animating());
    }
}
