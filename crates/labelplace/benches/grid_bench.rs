//! Criterion microbenches for the spatial indices.
//!
//! - point grid: build and 3x3 density queries.
//! - rect grid vs quadtree: bulk insert, overlap and min-gap queries over a
//!   full layer of label-sized squares.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;

use labelplace::geom::{Corner, Rect};
use labelplace::grid::{PointGrid, RectGrid, RectQuadtree};
use labelplace::scatter::{draw_points_uniform, Domain2, ReplayToken, UniformCfg};

fn scatter(n: usize) -> Vec<Vector2<f64>> {
    draw_points_uniform(
        UniformCfg {
            count: n,
            domain: Domain2::square(-1.0, 1.0),
        },
        ReplayToken { seed: 42, index: 0 },
    )
}

fn bench_point_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_grid");
    for &n in &[1_000usize, 10_000] {
        let points = scatter(n);
        let size = 0.02;
        group.bench_function(BenchmarkId::new("build", n), |b| {
            b.iter(|| PointGrid::build(&points, size))
        });
        let grid = PointGrid::build(&points, size);
        group.bench_function(BenchmarkId::new("local_density", n), |b| {
            b.iter(|| {
                let mut acc = 0usize;
                for p in &points {
                    acc += grid.local_density(*p);
                }
                acc
            })
        });
    }
    group.finish();
}

fn bench_rect_stores(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_stores");
    let n = 2_000usize;
    let points = scatter(n);
    let size = 0.02;
    let rects: Vec<Rect> = points
        .iter()
        .map(|p| Rect::anchored(*p, size, Corner::TopLeft))
        .collect();
    // Offset keeps a probe clear of its own source square, so min-gap
    // answers mix zeros (collisions with other labels) and real ring walks.
    let probes: Vec<Rect> = points
        .iter()
        .map(|p| Rect::anchored(*p + Vector2::new(1.5 * size, 0.0), size, Corner::TopLeft))
        .collect();
    let region = Rect::bounding(&points).unwrap().expand(size);

    group.bench_function(BenchmarkId::new("grid_insert", n), |b| {
        b.iter_batched(
            || RectGrid::new(size),
            |mut store| {
                for r in &rects {
                    store.insert(*r);
                }
                store
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("quadtree_insert", n), |b| {
        b.iter_batched(
            || RectQuadtree::new(region),
            |mut store| {
                for r in &rects {
                    store.insert(*r);
                }
                store
            },
            BatchSize::SmallInput,
        )
    });

    let mut grid = RectGrid::new(size);
    let mut quad = RectQuadtree::new(region);
    for r in &rects {
        grid.insert(*r);
        quad.insert(*r);
    }
    group.bench_function(BenchmarkId::new("grid_overlaps", n), |b| {
        b.iter(|| probes.iter().filter(|r| grid.overlaps_any(r)).count())
    });
    group.bench_function(BenchmarkId::new("quadtree_overlaps", n), |b| {
        b.iter(|| probes.iter().filter(|r| quad.overlaps_any(r)).count())
    });
    group.bench_function(BenchmarkId::new("grid_min_gap", n), |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            for r in &probes {
                acc += grid.min_gap_to_any(r);
            }
            acc
        })
    });
    group.bench_function(BenchmarkId::new("quadtree_min_gap", n), |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            for r in &probes {
                acc += quad.min_gap_to_any(r);
            }
            acc
        })
    });
    group.finish();
}

criterion_group!(benches, bench_point_grid, bench_rect_stores);
criterion_main!(benches);
