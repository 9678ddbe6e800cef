//! Planner benchmarks.
//!
//! Measures full propagation after a target change, incremental repair after
//! an obstacle is discovered, and a complete exploring walk.
//!
//! Run with: `cargo bench -p marga`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use marga::core::{GridBounds, GridCoord, Terrain};
use marga::network::NullBroadcast;
use marga::pathfinding::{BfsPlanner, DStarPlanner, GridStrategy, Navigator, Senses};
use marga::world::{RandomGenerator, TileMap};

// ============================================================================
// Fixtures
// ============================================================================

fn world(size: usize) -> TileMap {
    let mut map = RandomGenerator::new(
        7,
        &[
            (Terrain::Grass, 6.0),
            (Terrain::Sand, 2.0),
            (Terrain::Rock, 1.0),
            (Terrain::Water, 1.5),
        ],
    )
    .unwrap()
    .generate(GridBounds::from_size(size, size));

    map.set(GridCoord::ZERO, Terrain::Grass);
    map.set(corner(size), Terrain::Grass);
    map
}

fn corner(size: usize) -> GridCoord {
    GridCoord::new(size as i32 - 1, size as i32 - 1)
}

/// Planner that already knows every tile of `map`, drained toward `target`.
fn informed_planner(map: &TileMap, target: GridCoord) -> DStarPlanner<GridStrategy> {
    let mut planner = DStarPlanner::with_defaults(GridStrategy::with_defaults(map.bounds()));
    planner.update_target(target);
    for pos in map.bounds().iter() {
        if let Some(terrain) = map.get(pos) {
            planner.on_discovered(pos, terrain);
        }
    }
    planner.drain();
    planner
}

fn walk<N: Navigator>(navigator: &mut N, map: &TileMap, target: GridCoord, limit: usize) -> usize {
    let senses = Senses::new(map, &NullBroadcast);
    let mut position = GridCoord::ZERO;
    let mut steps = 0;

    while position != target && steps < limit {
        let step = navigator.step_toward(position, target, &senses);
        if step == GridCoord::ZERO {
            break;
        }
        position = position + step;
        steps += 1;
    }
    steps
}

// ============================================================================
// Propagation
// ============================================================================

fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");

    for size in [32usize, 64, 128] {
        let map = world(size);
        group.throughput(Throughput::Elements((size * size) as u64));

        // Unknown world: every cell is optimistic
        group.bench_with_input(BenchmarkId::new("blank_drain", size), &size, |b, &size| {
            b.iter(|| {
                let mut planner =
                    DStarPlanner::with_defaults(GridStrategy::with_defaults(map.bounds()));
                planner.update_target(corner(size));
                black_box(planner.drain())
            })
        });

        // Retarget with full knowledge
        let mut planner = informed_planner(&map, corner(size));
        group.bench_with_input(BenchmarkId::new("retarget", size), &size, |b, &size| {
            let targets = [GridCoord::ZERO, corner(size)];
            let mut i = 0;
            b.iter(|| {
                i += 1;
                planner.update_target(targets[i % 2]);
                black_box(planner.drain())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Repair
// ============================================================================

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");

    for size in [32usize, 64] {
        let map = world(size);
        let target = corner(size);
        let base = informed_planner(&map, target);
        let Some(path) = base.path(GridCoord::ZERO) else {
            continue;
        };
        let blocked = path[path.len() / 2];

        group.bench_with_input(BenchmarkId::new("block_path", size), &blocked, |b, &blocked| {
            b.iter_batched(
                || informed_planner(&map, target),
                |mut planner| {
                    planner.on_discovered(blocked, Terrain::Water);
                    black_box(planner.drain())
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Exploration
// ============================================================================

fn bench_exploration(c: &mut Criterion) {
    let mut group = c.benchmark_group("exploration");
    group.sample_size(20);

    for size in [24usize, 48] {
        let map = world(size);
        let target = corner(size);
        let limit = size * size;

        group.bench_with_input(BenchmarkId::new("dstar_walk", size), &size, |b, _| {
            b.iter(|| {
                let mut planner =
                    DStarPlanner::with_defaults(GridStrategy::with_defaults(map.bounds()));
                black_box(walk(&mut planner, &map, target, limit))
            })
        });

        group.bench_with_input(BenchmarkId::new("bfs_walk", size), &size, |b, _| {
            b.iter(|| {
                let mut planner = BfsPlanner::new(GridStrategy::with_defaults(map.bounds()));
                black_box(walk(&mut planner, &map, target, limit))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_propagation, bench_repair, bench_exploration);
criterion_main!(benches);
