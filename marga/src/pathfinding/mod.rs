//! Incremental pathfinding for partially known worlds.
//!
//! Planners keep a per-agent [`KnowledgeStore`] of costs and successor
//! pointers toward the current target, sense terrain through a
//! [`TerrainOracle`] as they move and share what they find over a
//! [`Broadcast`] port.
//!
//! - [`DStarPlanner`]: lifelong D* repair, only re-derives what changed
//! - [`BfsPlanner`]: full breadth-first flood on every target change
//!
//! Both implement [`Navigator`], which is all an [`Ant`](crate::Ant) needs.

pub mod bfs;
pub mod dstar;
pub mod strategy;

pub use bfs::BfsPlanner;
pub use dstar::{DStarConfig, DStarPlanner, DrainStats, PlannerStats};
pub use strategy::{
    Connectivity, GridStrategy, MAX_LOOK_RADIUS, Strategy, StrategyConfig, StrategyError,
};

use serde::{Deserialize, Serialize};

use crate::core::{CellKnowledge, GridCoord};
use crate::knowledge::KnowledgeStore;
use crate::network::Broadcast;
use crate::world::TerrainOracle;

/// External collaborators one planning call may use.
#[derive(Clone, Copy)]
pub struct Senses<'a> {
    /// Ground truth terrain queries
    pub oracle: &'a dyn TerrainOracle,
    /// Colony broadcast port
    pub network: &'a dyn Broadcast,
}

impl<'a> Senses<'a> {
    /// Bundle an oracle and a broadcast port
    pub fn new(oracle: &'a dyn TerrainOracle, network: &'a dyn Broadcast) -> Self {
        Self { oracle, network }
    }
}

/// Planner family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigatorKind {
    /// [`DStarPlanner`]
    #[default]
    DStar,
    /// [`BfsPlanner`]
    Bfs,
}

impl std::fmt::Display for NavigatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigatorKind::DStar => write!(f, "dstar"),
            NavigatorKind::Bfs => write!(f, "bfs"),
        }
    }
}

/// Common contract of every planner.
pub trait Navigator: Send {
    /// Plan from `position` toward `target` and return the next single-step
    /// displacement. [`GridCoord::ZERO`] means arrived or no known path.
    fn step_toward(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        senses: &Senses<'_>,
    ) -> GridCoord;

    /// Current belief about `pos`
    fn knowledge(&self, pos: GridCoord) -> CellKnowledge;

    /// Target the current knowledge was computed for
    fn target(&self) -> Option<GridCoord>;

    /// Read access to the whole store
    fn store(&self) -> &KnowledgeStore;

    /// Planner family
    fn kind(&self) -> NavigatorKind;
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn step_toward(
        &mut self,
        position: GridCoord,
        target: GridCoord,
        senses: &Senses<'_>,
    ) -> GridCoord {
        (**self).step_toward(position, target, senses)
    }

    fn knowledge(&self, pos: GridCoord) -> CellKnowledge {
        (**self).knowledge(pos)
    }

    fn target(&self) -> Option<GridCoord> {
        (**self).target()
    }

    fn store(&self) -> &KnowledgeStore {
        (**self).store()
    }

    fn kind(&self) -> NavigatorKind {
        (**self).kind()
    }
}

/// Build a boxed planner of the requested kind around `strategy`.
pub fn navigator<S: Strategy + 'static>(
    kind: NavigatorKind,
    strategy: S,
    config: DStarConfig,
) -> Box<dyn Navigator> {
    match kind {
        NavigatorKind::DStar => Box::new(DStarPlanner::new(strategy, config)),
        NavigatorKind::Bfs => Box::new(BfsPlanner::new(strategy)),
    }
}
