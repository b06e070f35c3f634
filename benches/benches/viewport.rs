// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use mockup_canvas::input::{HitTarget, MouseEvent};
use mockup_canvas::{HeadlessSurface, MemoryStore};
use mockup_compare::{CompareConfig, CompareGeometry, ComparisonController, ComparisonOption};
use mockup_view2d::{ViewState, ViewportTransform, ZoomLimits};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn requests(count: usize, seed: u64) -> Vec<(f64, Point)> {
    let mut rng = Lcg(seed);
    (0..count)
        .map(|_| {
            let zoom = 0.1 + rng.next_f64() * 3.0;
            let anchor = Point::new(rng.next_f64() * 1200.0, rng.next_f64() * 800.0);
            (zoom, anchor)
        })
        .collect()
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("mockup_view2d");
    let transform = ViewportTransform::new(ZoomLimits::default());
    let inputs = requests(1_024, 0x5EED_0000_0000_0001);
    let container = Size::new(1200.0, 800.0);
    let content = Size::new(1600.0, 1000.0);

    group.bench_function("anchored_zoom(1024)", |b| {
        b.iter(|| {
            let mut state = ViewState::IDENTITY;
            for &(zoom, anchor) in &inputs {
                state = transform.anchored_zoom(state, zoom, Some(anchor));
            }
            black_box(state)
        });
    });

    group.bench_function("anchored_zoom_then_clamp(1024)", |b| {
        b.iter(|| {
            let mut state = ViewState::IDENTITY;
            for &(zoom, anchor) in &inputs {
                state = transform.anchored_zoom(state, zoom, Some(anchor));
                state = transform.panned(state, state.pan(), container, content);
            }
            black_box(state)
        });
    });

    group.finish();
}

fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("mockup_compare");
    group.sample_size(50);

    for &cells in &[2_usize, 8, 32] {
        let option = ComparisonOption::new(
            "bench",
            "Bench",
            (0..cells).map(|i| (format!("v{i}"), format!("Variant {i}"))),
        );
        group.bench_function(format!("synced_drag(cells={cells},moves=64)"), |b| {
            b.iter_batched(
                || {
                    let mut compare =
                        ComparisonController::new(MemoryStore::new(), CompareConfig::default());
                    compare.open(
                        &option,
                        CompareGeometry {
                            container: Size::new(1920.0, 1080.0),
                            intrinsic: None,
                        },
                        |_| HeadlessSurface::new(Size::new(400.0, 300.0), Size::new(400.0, 300.0)),
                    );
                    compare
                },
                |mut compare| {
                    let at = |p: Point| MouseEvent::primary(p, HitTarget::Content);
                    let mut pos = Point::new(10.0, 10.0);
                    compare.on_cell_mouse_down(0, &at(pos));
                    for _ in 0..64 {
                        pos += Vec2::new(3.0, 2.0);
                        compare.on_mouse_move(&at(pos));
                    }
                    compare.on_mouse_up(None, &at(pos));
                    black_box(compare.cells().len())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform, bench_sync);
criterion_main!(benches);
