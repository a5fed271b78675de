//! Criterion benchmarks for full distance-map runs on the reference grid.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use graindist_bench::{reference_config, reference_grid, sequential_config};
use graindist_core::ClassSet;
use graindist_engine::{classify_seeds, DistanceMapConfig, DistanceMapper};

/// Benchmark: seed classification over 262K voxels.
fn bench_classify_seeds(c: &mut Criterion) {
    let grid = reference_grid(42);

    c.bench_function("classify_seeds_262k", |b| {
        b.iter(|| {
            let seeds = classify_seeds(&grid, ClassSet::all(), true);
            black_box(seeds.seed_count(graindist_core::DistanceClass::GrainBoundary));
        });
    });
}

/// Benchmark: all three channels, parallel vs sequential.
fn bench_full_run(c: &mut Criterion) {
    let grid = reference_grid(42);
    let parallel = DistanceMapper::new(reference_config()).unwrap();
    let sequential = DistanceMapper::new(sequential_config()).unwrap();

    let mut group = c.benchmark_group("distance_map_262k");
    group.sample_size(10);
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(parallel.run(&grid).unwrap()));
    });
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(sequential.run(&grid).unwrap()));
    });
    group.finish();
}

/// Benchmark: boundary channel only, with and without the Euclidean pass.
fn bench_boundary_modes(c: &mut Criterion) {
    let grid = reference_grid(7);
    let euclidean = DistanceMapper::new(DistanceMapConfig {
        do_boundaries: true,
        ..DistanceMapConfig::default()
    })
    .unwrap();
    let manhattan = DistanceMapper::new(DistanceMapConfig {
        do_boundaries: true,
        calc_only_manhattan_dist: true,
        ..DistanceMapConfig::default()
    })
    .unwrap();

    let mut group = c.benchmark_group("boundary_262k");
    group.sample_size(20);
    group.bench_function("euclidean", |b| {
        b.iter(|| black_box(euclidean.run(&grid).unwrap()));
    });
    group.bench_function("manhattan_only", |b| {
        b.iter(|| black_box(manhattan.run(&grid).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_classify_seeds,
    bench_full_run,
    bench_boundary_modes
);
criterion_main!(benches);
