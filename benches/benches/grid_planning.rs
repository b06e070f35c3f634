// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use mockup_grid::{ChromeInsets, LayoutCursor, auto_pick, build_steps};

const CONTAINERS: [Size; 3] = [
    Size::new(1200.0, 800.0),
    Size::new(800.0, 1200.0),
    Size::new(3440.0, 1440.0),
];

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("mockup_grid");
    group.sample_size(50);

    for &n in &[5_usize, 24, 96] {
        for (i, &container) in CONTAINERS.iter().enumerate() {
            group.bench_function(format!("build_steps(n={n},container={i})"), |b| {
                b.iter(|| black_box(build_steps(black_box(n), black_box(container))));
            });
        }

        let container = CONTAINERS[0];
        let steps = build_steps(n, container);
        let chrome = ChromeInsets::default();
        group.bench_function(format!("auto_pick(n={n})"), |b| {
            b.iter(|| {
                black_box(auto_pick(
                    black_box(&steps),
                    Size::new(400.0, 300.0),
                    container,
                    &chrome,
                ))
            });
        });

        group.bench_function(format!("remap_landscape_portrait(n={n})"), |b| {
            b.iter_batched(
                || LayoutCursor::new(n, CONTAINERS[0]),
                |cursor| {
                    if let Some(mut cursor) = cursor {
                        cursor.remap(CONTAINERS[1]);
                        black_box(cursor.remap(CONTAINERS[0]));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
