// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use overstory_panel::host::{Host, Measurements, PanelId};
use overstory_panel::options::PanelOptions;
use overstory_placement::Placement;

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

#[derive(Clone)]
struct BenchDom {
    rects: Vec<Rect>,
    viewport: Size,
}

impl Measurements<u32> for BenchDom {
    fn bounding_rect(&self, key: &u32) -> Option<Rect> {
        self.rects.get(*key as usize).copied()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

/// `n` panels, each with a scattered anchor and a 200x150 content element.
/// Element keys: anchor `i`, content `n + i`.
fn build(n: usize) -> (Host<u32>, BenchDom, Vec<PanelId>) {
    let viewport = Size::new(1920.0, 1080.0);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut rects = Vec::with_capacity(n * 2);
    for _ in 0..n {
        let x0 = rng.next_f64() * (viewport.width - 80.0);
        let y0 = rng.next_f64() * (viewport.height - 30.0);
        rects.push(Rect::new(x0, y0, x0 + 80.0, y0 + 30.0));
    }
    for _ in 0..n {
        rects.push(Rect::new(0.0, 0.0, 200.0, 150.0));
    }

    let mut host = Host::with_viewport(viewport);
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let placement = Placement::ALL[i % Placement::ALL.len()];
        let (id, _) = host.mount(i as u32, PanelOptions::new().with_placement(placement));
        host.set_content(id, (n + i) as u32);
        ids.push(id);
    }
    (host, BenchDom { rects, viewport }, ids)
}

fn bench_sync_commit_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("host");
    for &n in &[64usize, 256, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("sync_commit_cold_n{}", n), |b| {
            b.iter_batched(
                || build(n),
                |(mut host, dom, _)| {
                    host.sync(&dom);
                    black_box(host.commit().dirty_rects.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_commit_settled(c: &mut Criterion) {
    let mut group = c.benchmark_group("host");
    for &n in &[64usize, 256, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("commit_settled_n{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut host, dom, ids) = build(n);
                    host.sync(&dom);
                    let _ = host.commit();
                    (host, dom, ids)
                },
                |(mut host, dom, _)| {
                    // Force a full re-solve that lands on identical rects:
                    // all marked, all skipped, zero damage.
                    host.set_viewport(Size::new(1921.0, 1080.0));
                    host.set_viewport(dom.viewport);
                    black_box(host.commit().dirty_rects.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_pointer_down_outside(c: &mut Criterion) {
    let mut group = c.benchmark_group("host");
    for &n in &[64usize, 256, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("pointer_down_outside_n{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut host, _, ids) = build(n);
                    for &id in &ids {
                        let _ = host.set_open_flag(id, true);
                    }
                    host
                },
                |mut host| {
                    black_box(host.pointer_down(&[u32::MAX]).len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sync_commit_cold,
    bench_commit_settled,
    bench_pointer_down_outside,
);
criterion_main!(benches);
