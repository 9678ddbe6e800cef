//! Test utilities for Marga planners.
//!
//! Map builders, planner constructors and walking helpers shared by the
//! integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use marga::core::{GridCoord, Terrain};
use marga::network::NullBroadcast;
use marga::pathfinding::{
    Connectivity, DStarPlanner, GridStrategy, Navigator, Senses, Strategy, StrategyConfig,
};
use marga::world::TileMap;
use marga::KnowledgeStore;

/// Parse an ASCII map, panicking on malformed input.
pub fn map(ascii: &str) -> TileMap {
    TileMap::from_ascii(ascii).expect("valid test map")
}

/// A one-row corridor of grass.
pub fn corridor(len: usize) -> TileMap {
    map(&".".repeat(len))
}

/// Strategy covering exactly the map.
pub fn strategy(map: &TileMap, connectivity: Connectivity) -> GridStrategy {
    GridStrategy::new(
        map.bounds(),
        StrategyConfig {
            connectivity,
            ..Default::default()
        },
    )
    .expect("valid strategy")
}

/// D* planner for `map` with default settings.
pub fn dstar(map: &TileMap, connectivity: Connectivity) -> DStarPlanner<GridStrategy> {
    DStarPlanner::with_defaults(strategy(map, connectivity))
}

/// Feed every tile of `map` to the planner, then drain.
pub fn learn_all(planner: &mut DStarPlanner<GridStrategy>, map: &TileMap) {
    for pos in map.bounds().iter() {
        if let Some(terrain) = map.get(pos) {
            planner.on_discovered(pos, terrain);
        }
    }
    planner.drain();
}

/// Walk a navigator from `start` until arrival, a zero step or `max_steps`.
///
/// Returns the visited cells, `start` included.
pub fn walk<N: Navigator>(
    navigator: &mut N,
    map: &TileMap,
    start: GridCoord,
    target: GridCoord,
    max_steps: usize,
) -> Vec<GridCoord> {
    let senses = Senses::new(map, &NullBroadcast);
    let mut trail = vec![start];
    let mut position = start;

    for _ in 0..max_steps {
        if position == target {
            break;
        }

        let step = navigator.step_toward(position, target, &senses);
        if step == GridCoord::ZERO {
            break;
        }

        assert!(
            position.is_adjacent(&(position + step)),
            "non-adjacent step {} from {}",
            step,
            position
        );
        position = position + step;
        assert!(map.is_passable(position), "walked onto {}", position);
        trail.push(position);
    }

    trail
}

/// Minimum number of moves between two cells on a fully known map.
pub fn shortest_steps(
    map: &TileMap,
    start: GridCoord,
    goal: GridCoord,
    connectivity: Connectivity,
) -> Option<usize> {
    let strategy = strategy(map, connectivity);
    let mut depth = HashMap::from([(start, 0usize)]);
    let mut queue = VecDeque::from([start]);

    while let Some(pos) = queue.pop_front() {
        if pos == goal {
            return depth.get(&pos).copied();
        }
        let d = depth[&pos];
        for n in strategy.neighbors(pos) {
            if map.is_passable(n) && !depth.contains_key(&n) {
                depth.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }

    None
}

/// Panic if following `next` from any stored cell loops.
pub fn assert_acyclic(store: &KnowledgeStore) {
    for (pos, _) in store.iter() {
        assert!(
            store.path_from(pos).is_some(),
            "next pointers from {} loop",
            pos
        );
    }
}

/// Panic if a stored cell points at an obstacle.
pub fn assert_no_pointer_into_obstacles(store: &KnowledgeStore) {
    for (pos, knowledge) in store.iter() {
        if let Some(next) = knowledge.next {
            assert!(
                !store.get(next).obstacle,
                "{} points at obstacle {}",
                pos,
                next
            );
        }
    }
}

/// Count cells of one terrain kind in the store's sensed knowledge.
pub fn sensed(store: &KnowledgeStore, terrain: Terrain) -> usize {
    store
        .iter()
        .filter(|(_, k)| k.terrain == Some(terrain))
        .count()
}
