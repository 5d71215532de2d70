/*
 * Flocking Simulation Benchmark
 *
 * Measures the hot paths of a frame: rebuilding the quadtree over the whole
 * population, answering one range query per boid, and advancing the flock by
 * one tick.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flocking::{Bound, Flock, PointerState, QuadTree, SimulationParams};
use nannou::prelude::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 400.0;

fn bench_quadtree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");

    for num_boids in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut rng = StdRng::seed_from_u64(7);
            let points: Vec<Vec2> = (0..n)
                .map(|_| Vec2::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT)))
                .collect();

            b.iter(|| {
                let mut tree = QuadTree::new(10, Bound::new(0.0, 0.0, WIDTH, HEIGHT));
                for (i, point) in points.iter().enumerate() {
                    tree.insert(*point, i);
                }
                black_box(tree.leaf_count())
            });
        });
    }

    group.finish();
}

fn bench_range_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_query");

    for num_boids in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut rng = StdRng::seed_from_u64(11);
            let mut tree = QuadTree::new(10, Bound::new(0.0, 0.0, WIDTH, HEIGHT));
            let points: Vec<Vec2> = (0..n)
                .map(|_| Vec2::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT)))
                .collect();
            for (i, point) in points.iter().enumerate() {
                tree.insert(*point, i);
            }
            let mut found = Vec::with_capacity(64);

            b.iter(|| {
                let mut total = 0;
                for point in &points {
                    found.clear();
                    tree.query_into(&Bound::centered(*point, 25.0), &mut found);
                    total += found.len();
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_flock_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_tick");
    group.measurement_time(Duration::from_secs(10));

    for num_boids in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut params = SimulationParams::default();
            params.num_boids = n;
            let mut rng = StdRng::seed_from_u64(3);
            let mut flock = match Flock::new(&params, WIDTH, HEIGHT, &mut rng) {
                Ok(flock) => flock,
                Err(err) => panic!("benchmark parameters rejected: {}", err),
            };

            b.iter(|| {
                flock.tick(&params, PointerState::default());
                black_box(flock.ticks())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quadtree_build, bench_range_query, bench_flock_tick);
criterion_main!(benches);
