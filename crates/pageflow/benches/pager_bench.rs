//! Benchmark: per-frame and per-event cost of the pager.
//!
//! Run with: `cargo bench -p pageflow --bench pager_bench`
//!
//! Measures a frame tick during a snap, a full drag-and-release gesture,
//! and layout over a large page list.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pageflow::{MemoryHost, Pager, PagerConfig, PointerEvent};
use web_time::{Duration, Instant};

fn pager(pages: usize) -> Pager<MemoryHost> {
    Pager::new(PagerConfig::default(), MemoryHost::uniform(pages, 1080, 1920)).unwrap()
}

// ===========================================================================
// Frame tick
// ===========================================================================

fn bench_tick_during_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_during_snap");
    for pages in [3usize, 50, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(pages), &pages, |b, &pages| {
            let mut p = pager(pages);
            let t0 = Instant::now();
            p.snap_to_page(pages - 1, t0);
            let mid = t0 + Duration::from_millis(300);
            b.iter(|| black_box(p.tick(black_box(mid))));
        });
    }
    group.finish();
}

// ===========================================================================
// Gesture
// ===========================================================================

fn bench_drag_release(c: &mut Criterion) {
    c.bench_function("drag_release_60_moves", |b| {
        let mut p = pager(10);
        b.iter(|| {
            let mut t = Instant::now();
            p.set_current_page(5);
            p.on_pointer(PointerEvent::down((900.0, 960.0), t));
            for i in 0..60 {
                t += Duration::from_millis(8);
                let x = 900.0 - 10.0 * i as f32;
                black_box(p.on_pointer(PointerEvent::moved((x, 960.0), t)));
            }
            t += Duration::from_millis(8);
            black_box(p.on_pointer(PointerEvent::up((300.0, 960.0), None, t)));
        });
    });
}

// ===========================================================================
// Layout
// ===========================================================================

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for pages in [10usize, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(pages), &pages, |b, &pages| {
            let mut p = pager(pages);
            b.iter(|| {
                p.layout();
                black_box(p.scroll_offset())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick_during_snap, bench_drag_release, bench_layout);
criterion_main!(benches);
