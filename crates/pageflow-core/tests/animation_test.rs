//! Integration tests for the animation module.

use pageflow_core::animation::*;
use proptest::prelude::*;
use web_time::{Duration, Instant};

const MS_16: Duration = Duration::from_millis(16);
const MS_750: Duration = Duration::from_millis(750);

#[test]
fn tween_duration_independent_of_frame_rate() {
    let t0 = Instant::now();
    let tween = Tween::new(0.0, 1000.0, MS_750, t0);

    // 60fps stepping.
    let mut frames = 0;
    let mut now = t0;
    while !tween.status_at(now).is_done() {
        now += MS_16;
        frames += 1;
    }
    assert_eq!(frames, 47, "750ms at 16ms/frame needs 47 frames");

    // A single late frame lands on the same end state.
    assert_eq!(tween.value_at(t0 + Duration::from_secs(2)), 1000.0);
}

#[test]
fn repeated_sampling_does_not_drift() {
    let t0 = Instant::now();
    let tween = Tween::new(0.0, 500.0, MS_750, t0);
    let at = t0 + Duration::from_millis(300);
    let first = tween.value_at(at);
    for _ in 0..100 {
        assert_eq!(tween.value_at(at), first);
    }
}

#[test]
fn quint_tween_front_loads_motion() {
    let t0 = Instant::now();
    let tween = Tween::new(0.0, 100.0, Duration::from_millis(1000), t0);
    // After 20% of the time, quintic ease-out has covered 1 - 0.8^5 ≈ 67%.
    let v = tween.value_at(t0 + Duration::from_millis(200));
    assert!((v - 67.232).abs() < 0.01, "value = {v}");
}

#[test]
fn easing_functions_are_monotonic() {
    for easing in [linear, ease_out, ease_out_cubic, ease_out_quint, decelerate] {
        let mut prev = 0.0f32;
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let v = easing(t);
            assert!(v >= prev - 0.0001, "easing should be monotonic at t={t}");
            prev = v;
        }
    }
}

proptest! {
    #[test]
    fn tween_stays_between_endpoints(
        from in -5000.0f32..5000.0,
        to in -5000.0f32..5000.0,
        duration_ms in 0u64..2000,
        sample_ms in 0u64..3000,
    ) {
        let t0 = Instant::now();
        let tween = Tween::new(from, to, Duration::from_millis(duration_ms), t0);
        let v = tween.value_at(t0 + Duration::from_millis(sample_ms));
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        prop_assert!(v >= lo - 0.01 && v <= hi + 0.01);
    }

    #[test]
    fn decay_never_reverses(
        velocity in -8000.0f32..8000.0,
        a_ms in 0u64..2000,
        b_ms in 0u64..2000,
    ) {
        let t0 = Instant::now();
        let decay = Decay::new(0.0, velocity, Duration::from_millis(325), t0);
        let (early, late) = if a_ms <= b_ms { (a_ms, b_ms) } else { (b_ms, a_ms) };
        let x_early = decay.value_at(t0 + Duration::from_millis(early));
        let x_late = decay.value_at(t0 + Duration::from_millis(late));
        if velocity >= 0.0 {
            prop_assert!(x_late >= x_early - 0.001);
        } else {
            prop_assert!(x_late <= x_early + 0.001);
        }
    }
}
