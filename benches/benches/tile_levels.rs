// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_tile_levels::{
    EngineHooks, LevelContext, LevelSelectionConfig, TileCoord, ZoomLevelInterval, install,
    retain_drawable_tiles,
};

fn tiles(per_level: u32) -> Vec<TileCoord> {
    (0..=14)
        .flat_map(|level| (0..per_level).map(move |i| TileCoord::new(level, i, i)))
        .collect()
}

fn bench_retain(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_levels/retain_drawable_tiles");
    let interval = ZoomLevelInterval::new(10, 12);

    for per_level in [4u32, 64, 512] {
        let input = tiles(per_level);
        group.throughput(Throughput::Elements(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(per_level), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut tiles| {
                    retain_drawable_tiles(&mut tiles, interval);
                    black_box(tiles);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// One render cycle through installed hooks, across the zoom range.
fn bench_installed_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_levels/installed_frame");
    let per_level = 64;
    let mut hooks: EngineHooks<TileCoord> = EngineHooks::new(
        Rc::new(|ctx: &LevelContext| ZoomLevelInterval::new(0, ctx.max_level)),
        Rc::new(move |_ctx: &LevelContext, out: &mut Vec<TileCoord>| {
            out.clear();
            out.extend(tiles(per_level));
        }),
    );
    let _installation = install(&mut hooks, LevelSelectionConfig::default()).unwrap();

    for zoom in [0.05, 1.0, 2.5, 8.0] {
        let ctx = LevelContext {
            zoom,
            max_level: 14,
        };
        group.bench_with_input(BenchmarkId::from_parameter(zoom), &ctx, |b, ctx| {
            let mut out = Vec::new();
            b.iter(|| {
                black_box(hooks.compute_level_interval(ctx));
                hooks.update_drawable_tiles(ctx, &mut out);
                black_box(out.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_retain, bench_installed_frame);
criterion_main!(benches);
