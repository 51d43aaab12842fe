// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_hotspot::{
    DeepZoomViewport, DeviceClass, FitOptions, Geometry, Hotspot, Polygon, compute_bounds,
    hotspot_at, zoom_to_hotspot,
};

/// A roughly circular ring with `n` vertices around `(cx, cy)`.
fn ring(n: usize, cx: f64, cy: f64, r: f64) -> Polygon {
    Polygon::new((0..n).map(|i| {
        let t = i as f64 / n as f64 * core::f64::consts::TAU;
        Point::new(cx + r * t.cos(), cy + r * t.sin())
    }))
}

fn bench_bounds_and_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hotspot/zoom_to_hotspot");
    let viewport = DeepZoomViewport::new(Size::new(40_000.0, 30_000.0), Size::new(1920.0, 1080.0));
    let options = FitOptions::for_device(DeviceClass::Desktop);

    for vertices in [8usize, 64, 512, 4_096] {
        let geometry = Geometry::MultiPolygon(vec![
            ring(vertices, 10_000.0, 8_000.0, 900.0),
            ring(vertices, 12_500.0, 8_400.0, 300.0),
        ]);
        group.throughput(Throughput::Elements(2 * vertices as u64));

        group.bench_with_input(
            BenchmarkId::new("compute_bounds", vertices),
            &geometry,
            |b, geometry| b.iter(|| black_box(compute_bounds(black_box(geometry)))),
        );

        group.bench_with_input(
            BenchmarkId::new("zoom_to_hotspot", vertices),
            &geometry,
            |b, geometry| {
                b.iter(|| black_box(zoom_to_hotspot(&viewport, black_box(geometry), options)));
            },
        );
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hotspot/hotspot_at");

    for count in [16usize, 128, 1_024] {
        let hotspots: Vec<Hotspot<usize>> = (0..count)
            .map(|i| {
                let x = (i % 32) as f64 * 1_000.0;
                let y = (i / 32) as f64 * 1_000.0;
                Hotspot::new(i, Geometry::Polygon(ring(32, x, y, 400.0)))
            })
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &hotspots, |b, hotspots| {
            b.iter(|| black_box(hotspot_at(hotspots, black_box(Point::new(1_000.0, 0.0)))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bounds_and_fit, bench_hit_test);
criterion_main!(benches);
