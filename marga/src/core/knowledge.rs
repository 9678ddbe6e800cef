//! Per-cell planner beliefs.

use serde::{Deserialize, Serialize};

use super::{GridCoord, Terrain};

/// What an agent currently believes about one cell.
///
/// Cells that were never touched read as [`CellKnowledge::default`]:
/// unknown terrain, infinite cost, no successor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellKnowledge {
    /// Successor on the cheapest known path toward the target.
    pub next: Option<GridCoord>,
    /// Estimated path cost from this cell to the target.
    pub cost: f32,
    /// Lowest cost held since the last reset; the queue key.
    pub min_cost: f32,
    /// Confirmed impassable.
    pub obstacle: bool,
    /// Sensed terrain, if any.
    pub terrain: Option<Terrain>,
    /// Sensed at least once.
    pub detected: bool,
}

impl Default for CellKnowledge {
    fn default() -> Self {
        Self {
            next: None,
            cost: f32::INFINITY,
            min_cost: f32::INFINITY,
            obstacle: false,
            terrain: None,
            detected: false,
        }
    }
}

impl CellKnowledge {
    /// Cost went up since it was last settled and must be re-derived.
    #[inline]
    pub fn is_raising(&self) -> bool {
        self.cost > self.min_cost
    }

    /// A finite path to the target is known.
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    /// Drop path information, keeping what was sensed.
    pub fn invalidated(self) -> Self {
        Self {
            next: None,
            cost: f32::INFINITY,
            min_cost: f32::INFINITY,
            ..self
        }
    }

    /// Single character for debug dumps.
    pub fn as_char(&self) -> char {
        if self.obstacle {
            '#'
        } else if let Some(terrain) = self.terrain {
            terrain.as_char()
        } else {
            '?'
        }
    }
}

/// Partial update merged into an existing [`CellKnowledge`].
///
/// Fields left as `None` keep their current value. Applying an update
/// keeps the record consistent: `min_cost` never exceeds `cost`, and an
/// infinite cost clears `next`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KnowledgeUpdate {
    /// New successor (`Some(None)` clears it)
    pub next: Option<Option<GridCoord>>,
    /// New cost
    pub cost: Option<f32>,
    /// New queue key
    pub min_cost: Option<f32>,
    /// New obstacle flag
    pub obstacle: Option<bool>,
    /// New terrain
    pub terrain: Option<Terrain>,
    /// New detection flag
    pub detected: Option<bool>,
}

impl KnowledgeUpdate {
    /// Empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the successor
    pub fn next(mut self, next: Option<GridCoord>) -> Self {
        self.next = Some(next);
        self
    }

    /// Set the cost
    pub fn cost(mut self, cost: f32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Set the queue key
    pub fn min_cost(mut self, min_cost: f32) -> Self {
        self.min_cost = Some(min_cost);
        self
    }

    /// Record a sensed terrain: detected, terrain and obstacle flag at once.
    pub fn sensed(mut self, terrain: Terrain) -> Self {
        self.detected = Some(true);
        self.terrain = Some(terrain);
        self.obstacle = Some(terrain.is_obstacle());
        self
    }

    /// Merge into `old`, enforcing the record invariants.
    pub fn apply(&self, old: CellKnowledge) -> CellKnowledge {
        let mut res = CellKnowledge {
            next: self.next.unwrap_or(old.next),
            cost: self.cost.unwrap_or(old.cost),
            min_cost: self.min_cost.unwrap_or(old.min_cost),
            obstacle: self.obstacle.unwrap_or(old.obstacle),
            terrain: self.terrain.or(old.terrain),
            detected: self.detected.unwrap_or(old.detected),
        };

        res.min_cost = res.min_cost.min(res.cost);
        if res.cost == f32::INFINITY {
            res.next = None;
        }

        res
    }
}
