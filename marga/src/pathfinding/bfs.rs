//! Breadth-first planner.
//!
//! Floods the whole expansion horizon from the target every time the target
//! changes, querying the oracle for each frontier cell. No incremental
//! repair and no colony sharing; kept as a baseline for the D* planner.
//!
//! A flood that could not sense some cell is redone on the next step for
//! as long as the agent's own cell has no successor.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::core::{CellKnowledge, GridCoord, KnowledgeUpdate};
use crate::knowledge::KnowledgeStore;
use crate::world::{TerrainOracle, sense};

use super::strategy::Strategy;
use super::{Navigator, NavigatorKind, Senses};

/// Breadth-first planner for one agent.
pub struct BfsPlanner<S: Strategy> {
    strategy: S,
    store: KnowledgeStore,
    target: Option<GridCoord>,
    incomplete: bool,
}

impl<S: Strategy> BfsPlanner<S> {
    /// Create a new BFS planner
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            store: KnowledgeStore::new(),
            target: None,
            incomplete: false,
        }
    }

    /// Current target
    pub fn target(&self) -> Option<GridCoord> {
        self.target
    }

    /// Read access to the search tree
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Rebuild the search tree for `target`.
    ///
    /// The flood starts at the target and stops as soon as `position` is
    /// reached. Returns the number of cells visited. Nothing is built when
    /// the target itself is impassable or unknown; an unknown target is not
    /// adopted, so the next call senses it again.
    ///
    /// Setting the same target again is a no-op, unless the last flood left
    /// cells unsensed and `position` still has no successor.
    pub fn update_target(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        oracle: &dyn TerrainOracle,
    ) -> usize {
        if self.target == Some(target)
            && !(self.incomplete && self.store.get(position).next.is_none())
        {
            return 0;
        }

        self.store = KnowledgeStore::new();
        self.target = None;
        self.incomplete = false;

        let Some(terrain) = sense(oracle, target) else {
            debug!("[Bfs] target {} unknown", target);
            return 0;
        };
        self.target = Some(target);
        let seed = KnowledgeUpdate::new().sensed(terrain);
        if terrain.is_obstacle() {
            self.store.put(target, seed.apply(CellKnowledge::default()));
            debug!("[Bfs] target {} is impassable", target);
            return 0;
        }
        self.store
            .put(target, seed.cost(0.0).apply(CellKnowledge::default()));

        let mut queue = VecDeque::from([target]);
        let mut marks = HashSet::from([target]);
        let mut visited = 0;

        while let Some(pos) = queue.pop_front() {
            visited += 1;
            if pos == position {
                break;
            }

            let cost = self.store.get(pos).cost;
            for p in self.strategy.neighbors(pos) {
                if !self.strategy.shall_expand(p) || !marks.insert(p) {
                    continue;
                }

                let Some(terrain) = sense(oracle, p) else {
                    self.incomplete = true;
                    continue;
                };

                let mut update = KnowledgeUpdate::new().sensed(terrain);
                if terrain.is_passable() {
                    update = update
                        .next(Some(pos))
                        .cost(cost + self.strategy.heuristic(p, pos));
                    queue.push_back(p);
                }
                self.store.put(p, update.apply(self.store.get(p)));
            }
        }

        debug!(
            "[Bfs] target {}: flooded {} cells, {} known{}",
            target,
            visited,
            self.store.len(),
            if self.incomplete { ", some unsensed" } else { "" }
        );
        visited
    }

    /// Plan one step from `position` toward `target`.
    pub fn step_toward(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        oracle: &dyn TerrainOracle,
    ) -> GridCoord {
        if position == target {
            return GridCoord::ZERO;
        }

        self.update_target(position, target, oracle);

        self.store
            .get(position)
            .next
            .map(|next| next - position)
            .unwrap_or(GridCoord::ZERO)
    }
}

impl<S: Strategy> Navigator for BfsPlanner<S> {
    fn step_toward(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        senses: &Senses<'_>,
    ) -> GridCoord {
        BfsPlanner::step_toward(self, position, target, senses.oracle)
    }

    fn knowledge(&self, pos: GridCoord) -> CellKnowledge {
        self.store.get(pos)
    }

    fn target(&self) -> Option<GridCoord> {
        self.target
    }

    fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Bfs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::core::Terrain;
    use crate::pathfinding::strategy::{Connectivity, GridStrategy, StrategyConfig};
    use crate::world::{OracleError, TileMap};

    /// Map whose query number `fail_at` (0-based) times out once.
    struct Unreliable {
        map: TileMap,
        fail_at: usize,
        calls: AtomicUsize,
    }

    impl Unreliable {
        fn new(map: TileMap, fail_at: usize) -> Self {
            Self {
                map,
                fail_at,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TerrainOracle for Unreliable {
        fn query_terrain(&self, pos: GridCoord) -> Result<Option<Terrain>, OracleError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == self.fail_at {
                return Err(OracleError::Timeout(pos));
            }
            self.map.query_terrain(pos)
        }
    }

    fn planner_for(map: &TileMap) -> BfsPlanner<GridStrategy> {
        let strategy = GridStrategy::new(
            map.bounds(),
            StrategyConfig {
                connectivity: Connectivity::Four,
                ..Default::default()
            },
        )
        .unwrap();
        BfsPlanner::new(strategy)
    }

    #[test]
    fn test_path_around_water() {
        let map = TileMap::from_ascii(
            "
            .~.
            .~.
            ...
            ",
        )
        .unwrap();
        let mut planner = planner_for(&map);
        let target = GridCoord::new(2, 0);
        let mut position = GridCoord::ZERO;

        for _ in 0..10 {
            if position == target {
                break;
            }
            let step = planner.step_toward(position, target, &map);
            assert_ne!(step, GridCoord::ZERO);
            position = position + step;
            assert!(map.is_passable(position));
        }

        assert_eq!(position, target);
        assert_eq!(planner.knowledge(GridCoord::new(1, 0)).next, None);
    }

    #[test]
    fn test_unreachable_target() {
        let map = TileMap::from_ascii(
            "
            ..~.
            ..~.
            ",
        )
        .unwrap();
        let mut planner = planner_for(&map);
        let step = planner.step_toward(GridCoord::ZERO, GridCoord::new(3, 0), &map);
        assert_eq!(step, GridCoord::ZERO);
        assert_eq!(planner.target(), Some(GridCoord::new(3, 0)));
    }

    #[test]
    fn test_water_target_builds_nothing() {
        let map = TileMap::from_ascii("..~").unwrap();
        let mut planner = planner_for(&map);
        assert_eq!(planner.update_target(GridCoord::ZERO, GridCoord::new(2, 0), &map), 0);
        assert!(planner.knowledge(GridCoord::new(2, 0)).obstacle);
        assert_eq!(planner.store().len(), 1);
    }

    #[test]
    fn test_same_target_does_not_reflood() {
        let map = TileMap::from_ascii("....").unwrap();
        let mut planner = planner_for(&map);
        assert!(planner.update_target(GridCoord::ZERO, GridCoord::new(3, 0), &map) > 0);
        assert_eq!(planner.update_target(GridCoord::ZERO, GridCoord::new(3, 0), &map), 0);
        assert_eq!(planner.knowledge(GridCoord::ZERO).cost, 3.0);
    }

    #[test]
    fn test_failed_target_query_is_retried() {
        let oracle = Unreliable::new(TileMap::from_ascii(".....").unwrap(), 0);
        let mut planner = planner_for(&oracle.map);
        let target = GridCoord::new(4, 0);

        let step = planner.step_toward(GridCoord::ZERO, target, &oracle);
        assert_eq!(step, GridCoord::ZERO);
        assert_eq!(planner.target(), None);

        let step = planner.step_toward(GridCoord::ZERO, target, &oracle);
        assert_eq!(step, GridCoord::new(1, 0));
        assert_eq!(planner.target(), Some(target));
    }

    #[test]
    fn test_failed_neighbor_query_refloods() {
        // Query 0 is the target, query 1 its only in-bounds neighbor
        let oracle = Unreliable::new(TileMap::from_ascii(".....").unwrap(), 1);
        let mut planner = planner_for(&oracle.map);
        let target = GridCoord::new(4, 0);

        let step = planner.step_toward(GridCoord::ZERO, target, &oracle);
        assert_eq!(step, GridCoord::ZERO);
        assert_eq!(planner.knowledge(GridCoord::ZERO).next, None);

        let step = planner.step_toward(GridCoord::ZERO, target, &oracle);
        assert_eq!(step, GridCoord::new(1, 0));
        assert_eq!(planner.knowledge(GridCoord::ZERO).cost, 4.0);

        // Complete flood: asking again does not touch the oracle
        let calls = oracle.calls.load(Ordering::SeqCst);
        assert_eq!(planner.update_target(GridCoord::ZERO, target, &oracle), 0);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), calls);
    }
}
