//! D* planner implementation.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::core::{CellKnowledge, GridCoord, KnowledgeUpdate, Terrain};
use crate::knowledge::KnowledgeStore;
use crate::network::Broadcast;
use crate::pathfinding::strategy::Strategy;
use crate::pathfinding::{Navigator, NavigatorKind, Senses};
use crate::queue::DynamicQueue;
use crate::world::sense;

use super::types::{DStarConfig, DrainStats, PlannerStats};

/// Lifelong D* planner for one agent.
///
/// Costs are distances *to* the target: the target seeds the queue at cost
/// zero and propagation flows outward, so every cell's `next` points one
/// step closer to the target. Newly sensed obstacles only repair the cells
/// that routed through them.
pub struct DStarPlanner<S: Strategy> {
    strategy: S,
    config: DStarConfig,
    store: KnowledgeStore,
    queue: DynamicQueue<GridCoord>,
    target: Option<GridCoord>,
    stats: PlannerStats,
}

impl<S: Strategy> DStarPlanner<S> {
    /// Create a new D* planner
    pub fn new(strategy: S, config: DStarConfig) -> Self {
        Self {
            strategy,
            config,
            store: KnowledgeStore::new(),
            queue: DynamicQueue::new(),
            target: None,
            stats: PlannerStats::default(),
        }
    }

    /// Create with default configuration
    pub fn with_defaults(strategy: S) -> Self {
        Self::new(strategy, DStarConfig::default())
    }

    /// Strategy in use
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Configuration in use
    pub fn config(&self) -> &DStarConfig {
        &self.config
    }

    /// Current target
    pub fn target(&self) -> Option<GridCoord> {
        self.target
    }

    /// Current belief about `pos`
    pub fn knowledge(&self, pos: GridCoord) -> CellKnowledge {
        self.store.get(pos)
    }

    /// Read access to the knowledge store
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Lifetime counters
    pub fn stats(&self) -> &PlannerStats {
        &self.stats
    }

    /// Cells waiting for expansion
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Believed path from `pos` to the target, `pos` included.
    ///
    /// `None` if no path is known.
    pub fn path(&self, pos: GridCoord) -> Option<Vec<GridCoord>> {
        let path = self.store.path_from(pos)?;
        match path.last() {
            Some(last) if Some(*last) == self.target && self.store.get(pos).is_reachable() => {
                Some(path)
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Knowledge updates
    // ------------------------------------------------------------------

    /// Merge `update` into the stored knowledge of `pos`.
    ///
    /// Queue keys are derived from `min_cost`, so any change to it re-keys
    /// the queue.
    fn update_cell(&mut self, pos: GridCoord, update: KnowledgeUpdate) -> CellKnowledge {
        let old = self.store.get(pos);
        let new = update.apply(old);
        self.store.put(pos, new);

        if old.min_cost != new.min_cost && !self.queue.is_empty() {
            let store = &self.store;
            self.queue.update_costs(|p| store.get(*p).min_cost);
        }

        new
    }

    /// Queue `pos` at its `min_cost`, unless it is already queued there.
    fn enqueue(&mut self, pos: GridCoord) {
        let key = self.store.get(pos).min_cost;
        if !self.queue.search(key).contains(&pos) {
            self.queue.add(pos, key);
        }
    }

    /// Neighbors inside the expansion horizon and not known to be obstacles.
    ///
    /// Cells beyond the horizon are never expanded, so they must not carry
    /// costs that other cells could route through.
    fn surroundings(&self, pos: GridCoord) -> Vec<GridCoord> {
        self.strategy
            .neighbors(pos)
            .into_iter()
            .filter(|p| self.strategy.shall_expand(*p) && !self.store.get(*p).obstacle)
            .collect()
    }

    // ------------------------------------------------------------------
    // Target & reset
    // ------------------------------------------------------------------

    /// Switch to a new target.
    ///
    /// Every non-obstacle cell loses its cost and successor (sensed terrain
    /// is kept), pending work is dropped and the target is seeded at cost
    /// zero. Setting the current target again is a no-op.
    pub fn update_target(&mut self, target: GridCoord) {
        if self.target == Some(target) {
            return;
        }

        debug!(
            "[DStar] target {} -> {}, resetting {} cells",
            self.target.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
            target,
            self.store.len()
        );

        for (_, knowledge) in self.store.iter_mut() {
            if !knowledge.obstacle {
                *knowledge = knowledge.invalidated();
            }
        }
        self.queue.clear();
        self.target = Some(target);
        self.stats.target_changes += 1;

        if self.store.get(target).obstacle {
            debug!("[DStar] target {} is a known obstacle", target);
            return;
        }

        self.update_cell(target, KnowledgeUpdate::new().next(None).cost(0.0));
        self.enqueue(target);
    }

    // ------------------------------------------------------------------
    // Sensing
    // ------------------------------------------------------------------

    /// Sense every undetected cell `look(origin)` returns.
    ///
    /// Found terrain goes through [`Self::on_discovered`] and is published to
    /// the colony. Cells the oracle cannot answer for stay undetected and
    /// are retried on a later call. Returns the number of cells sensed.
    pub fn detect(&mut self, origin: GridCoord, senses: &Senses<'_>) -> usize {
        let mut found = 0;

        for pos in self.strategy.look(origin) {
            if self.store.get(pos).detected {
                continue;
            }

            if let Some(terrain) = sense(senses.oracle, pos) {
                self.on_discovered(pos, terrain);
                senses.network.publish(pos, terrain);
                found += 1;
            }
        }

        if found > 0 {
            trace!("[DStar] detect around {}: {} new cells", origin, found);
        }
        self.stats.detections += found;
        found
    }

    /// Apply every pending colony update. Returns how many changed anything.
    pub fn apply_broadcasts(&mut self, network: &dyn Broadcast) -> usize {
        let mut applied = 0;

        for update in network.receive() {
            let known = self.store.get(update.pos);
            if known.detected && known.terrain == Some(update.terrain) {
                continue;
            }

            self.on_discovered(update.pos, update.terrain);
            applied += 1;
        }

        if applied > 0 {
            trace!("[DStar] applied {} colony updates", applied);
        }
        self.stats.broadcasts_applied += applied;
        applied
    }

    /// Record sensed terrain for `pos` and queue the repairs it implies.
    ///
    /// Without a target only the terrain is recorded.
    pub fn on_discovered(&mut self, pos: GridCoord, terrain: Terrain) {
        let data = self.store.get(pos);
        let sensed = KnowledgeUpdate::new().sensed(terrain);

        if self.target.is_none() {
            self.update_cell(pos, sensed);
            return;
        }

        if terrain.is_obstacle() {
            self.update_cell(pos, sensed.cost(f32::INFINITY).min_cost(f32::INFINITY));

            // Cells routed through here lose their path; min_cost stays so
            // they come out of the queue as raising
            for p in self.surroundings(pos) {
                if self.store.get(p).next == Some(pos) {
                    self.update_cell(p, KnowledgeUpdate::new().cost(f32::INFINITY));
                    self.enqueue(p);
                }
            }
        } else {
            self.update_cell(pos, sensed);

            let cost = self.evaluate(pos, data.next);
            if cost != data.cost {
                self.update_cell(pos, KnowledgeUpdate::new().cost(cost));
                self.enqueue(pos);
            }
        }
    }

    // ------------------------------------------------------------------
    // Propagation
    // ------------------------------------------------------------------

    /// Expand queued cells until the queue is empty.
    ///
    /// Stops early once `max_expansions` cells were expanded; the remaining
    /// cells stay queued and the next drain picks them up. At least one
    /// cell is expanded per call.
    pub fn drain(&mut self) -> DrainStats {
        let mut stats = DrainStats::default();
        let budget = self.config.max_expansions.max(1);

        while !self.queue.is_empty() {
            if stats.expansions >= budget {
                warn!(
                    "[DStar] drain hit {} expansions, deferring {} queued cells (next key {:?})",
                    budget,
                    self.queue.len(),
                    self.queue.peek_key()
                );
                stats.exhausted = true;
                break;
            }

            let Some(pos) = self.queue.pop() else {
                break;
            };
            if self.store.get(pos).obstacle || !self.strategy.shall_expand(pos) {
                continue;
            }

            stats.expansions += 1;
            let raising = self.is_raising(pos);
            if raising {
                stats.raised += 1;
            } else {
                stats.lowered += 1;
            }

            trace!(
                "[DStar] expand {} cost={:.2} raising={}",
                pos,
                self.store.get(pos).cost,
                raising
            );

            for q in self.surroundings(pos) {
                let known = self.store.get(q);
                let cost = self.evaluate(q, Some(pos));

                if raising {
                    if known.next == Some(pos) {
                        self.update_cell(q, KnowledgeUpdate::new().cost(cost));
                        self.enqueue(q);
                    } else if cost < known.cost {
                        // Settle pos at its current cost and let it propagate
                        // as lowering on its next pop
                        let data = self.store.get(pos);
                        if data.is_raising() {
                            self.update_cell(pos, KnowledgeUpdate::new().min_cost(data.cost));
                            stats.settled += 1;
                        }
                        self.enqueue(pos);
                    }
                } else if cost < known.cost {
                    self.update_cell(q, KnowledgeUpdate::new().next(Some(pos)).cost(cost));
                    self.enqueue(q);
                }
            }
        }

        self.stats.record_drain(&stats);
        debug!(
            "[DStar] drain: {} expansions ({} raising, {} lowering, {} settled){}",
            stats.expansions,
            stats.raised,
            stats.lowered,
            stats.settled,
            if stats.exhausted { ", exhausted" } else { "" }
        );

        stats
    }

    /// Cost of reaching the target from `pos` through `by`.
    ///
    /// Infinite unless following `next` from `by` reaches the target
    /// through finite-cost cells without passing `pos` or looping.
    pub fn evaluate(&self, pos: GridCoord, by: Option<GridCoord>) -> f32 {
        let Some(by) = by else {
            return if self.target == Some(pos) {
                0.0
            } else {
                f32::INFINITY
            };
        };

        let mut visited = HashSet::new();
        let mut cursor = Some(by);
        let mut last = by;

        while let Some(current) = cursor {
            if current == pos || !visited.insert(current) {
                return f32::INFINITY;
            }

            let knowledge = self.store.get(current);
            if !knowledge.is_reachable() {
                return f32::INFINITY;
            }

            last = current;
            cursor = knowledge.next;
        }

        if self.target != Some(last) {
            return f32::INFINITY;
        }

        self.store.get(by).cost + self.strategy.heuristic(pos, by)
    }

    /// Try to re-derive a rising cell's cost from its best neighbor.
    ///
    /// Returns whether `pos` is still rising afterward.
    pub fn is_raising(&mut self, pos: GridCoord) -> bool {
        let mut data = self.store.get(pos);

        if data.is_raising() {
            for p in self.surroundings(pos) {
                let cost = self.evaluate(pos, Some(p));
                if cost < data.cost {
                    data.next = Some(p);
                    data.cost = cost;
                }
            }
        }

        let data = self.update_cell(pos, KnowledgeUpdate::new().next(data.next).cost(data.cost));
        data.is_raising()
    }

    // ------------------------------------------------------------------
    // Move extraction
    // ------------------------------------------------------------------

    /// Displacement from `position` to its successor, zero if none.
    pub fn next_move(&self, position: GridCoord) -> GridCoord {
        self.store
            .get(position)
            .next
            .map(|next| next - position)
            .unwrap_or(GridCoord::ZERO)
    }

    /// Plan one step from `position` toward `target`.
    ///
    /// Senses around the next hop and repairs until sensing adds no more
    /// work, then returns the single-step displacement (zero when arrived
    /// or when no path is known).
    pub fn step_toward(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        senses: &Senses<'_>,
    ) -> GridCoord {
        if position == target {
            return GridCoord::ZERO;
        }

        self.update_target(target);

        loop {
            self.apply_broadcasts(senses.network);

            let origin = self.store.get(position).next.unwrap_or(position);
            self.detect(origin, senses);

            if self.queue.is_empty() {
                break;
            }
            self.drain();
        }

        self.next_move(position)
    }
}

impl<S: Strategy> Navigator for DStarPlanner<S> {
    fn step_toward(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        senses: &Senses<'_>,
    ) -> GridCoord {
        DStarPlanner::step_toward(self, position, target, senses)
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
        NavigatorKind::DStar
    }
}
