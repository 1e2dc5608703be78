// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use overstory_placement::{Placement, solve};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_anchors(count: usize, max_w: f64, max_h: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (max_w - 80.0);
        let y0 = rng.next_f64() * (max_h - 30.0);
        out.push(Rect::new(x0, y0, x0 + 80.0, y0 + 30.0));
    }
    out
}

fn bench_solve_mixed(c: &mut Criterion) {
    let viewport = Size::new(1920.0, 1080.0);
    let panel = Size::new(240.0, 320.0);
    let mut group = c.benchmark_group("solve");
    for &n in &[256usize, 1024, 4096] {
        let anchors = gen_anchors(n, viewport.width, viewport.height);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("mixed_placements_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for (i, &anchor) in anchors.iter().enumerate() {
                    let placement = Placement::ALL[i % Placement::ALL.len()];
                    let pos = solve(anchor, panel, placement, 8.0, viewport);
                    acc += pos.x + pos.y;
                }
                black_box(acc);
            })
        });
    }
    group.finish();
}

fn bench_solve_flip_heavy(c: &mut Criterion) {
    let viewport = Size::new(1920.0, 1080.0);
    let panel = Size::new(240.0, 320.0);
    let mut group = c.benchmark_group("solve_flip_heavy");
    // Anchors hugging the top edge, so every Top placement flips below.
    let n = 4096usize;
    let mut anchors = gen_anchors(n, viewport.width, viewport.height);
    for a in &mut anchors {
        *a = Rect::new(a.x0, 2.0, a.x1, 32.0);
    }
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("top_all_flip", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &anchor in &anchors {
                let pos = solve(anchor, panel, Placement::Top, 8.0, viewport);
                acc += pos.y;
            }
            black_box(acc);
        })
    });
    group.finish();
}

fn bench_placement_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_names");
    group.throughput(Throughput::Elements(Placement::ALL.len() as u64));
    group.bench_function("round_trip_all", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for p in Placement::ALL {
                if Placement::from_name(p.name()) == p {
                    hits += 1;
                }
            }
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_solve_mixed,
    bench_solve_flip_heavy,
    bench_placement_names,
);
criterion_main!(benches);
