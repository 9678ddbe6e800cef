//! Autonomous agents.
//!
//! An [`Ant`] couples a [`Navigator`] with its senses (a shared terrain
//! oracle and a colony port) and keeps track of where it is.

use std::sync::Arc;

use log::{debug, info};

use crate::core::{CellKnowledge, GridCoord};
use crate::network::Broadcast;
use crate::pathfinding::{Navigator, Senses};
use crate::world::{TerrainOracle, sense};

/// How a [`Ant::walk_to`] call ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Reached the target
    Arrived {
        /// Moves made
        steps: usize,
    },
    /// No known path, or the planned move was refused
    Stuck {
        /// Moves made before getting stuck
        steps: usize,
    },
    /// Step budget used up before arrival
    OutOfSteps {
        /// Moves made
        steps: usize,
    },
}

impl WalkOutcome {
    /// Moves made during the walk
    pub fn steps(&self) -> usize {
        match *self {
            WalkOutcome::Arrived { steps }
            | WalkOutcome::Stuck { steps }
            | WalkOutcome::OutOfSteps { steps } => steps,
        }
    }

    /// Whether the target was reached
    pub fn arrived(&self) -> bool {
        matches!(self, WalkOutcome::Arrived { .. })
    }
}

/// One ant of the colony.
pub struct Ant {
    name: String,
    position: GridCoord,
    navigator: Box<dyn Navigator>,
    oracle: Arc<dyn TerrainOracle>,
    network: Box<dyn Broadcast>,
    trail: Vec<GridCoord>,
}

impl Ant {
    /// Create an ant standing at `position`
    pub fn new(
        name: impl Into<String>,
        position: GridCoord,
        navigator: Box<dyn Navigator>,
        oracle: Arc<dyn TerrainOracle>,
        network: Box<dyn Broadcast>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            navigator,
            oracle,
            network,
            trail: vec![position],
        }
    }

    /// Ant name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cell
    pub fn position(&self) -> GridCoord {
        self.position
    }

    /// Cells visited, starting cell included
    pub fn trail(&self) -> &[GridCoord] {
        &self.trail
    }

    /// Moves made so far
    pub fn steps(&self) -> usize {
        self.trail.len() - 1
    }

    /// The planner driving this ant
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Current belief about `pos`
    pub fn knowledge(&self, pos: GridCoord) -> CellKnowledge {
        self.navigator.knowledge(pos)
    }

    /// Target the ant is planning for
    pub fn target(&self) -> Option<GridCoord> {
        self.navigator.target()
    }

    /// Next single-step displacement toward `target`
    pub fn step_toward(&mut self, target: GridCoord) -> GridCoord {
        let senses = Senses::new(self.oracle.as_ref(), self.network.as_ref());
        self.navigator.step_toward(self.position, target, &senses)
    }

    /// Move by `displacement`.
    ///
    /// Only single steps onto passable cells are accepted. Returns whether
    /// the ant moved.
    pub fn advance(&mut self, displacement: GridCoord) -> bool {
        if displacement == GridCoord::ZERO {
            return false;
        }

        let destination = self.position + displacement;
        if !self.position.is_adjacent(&destination) {
            debug!("[Ant] {} refused jump {}", self.name, displacement);
            return false;
        }

        match sense(self.oracle.as_ref(), destination) {
            Some(terrain) if terrain.is_passable() => {
                self.position = destination;
                self.trail.push(destination);
                true
            }
            _ => {
                debug!("[Ant] {} refused move onto {}", self.name, destination);
                false
            }
        }
    }

    /// Step and advance until arrival, a dead end, or `max_steps` moves.
    pub fn walk_to(&mut self, target: GridCoord, max_steps: usize) -> WalkOutcome {
        self.walk_until(target, max_steps, |_| false)
    }

    /// [`Self::walk_to`] with an external stop condition.
    ///
    /// `stop` sees the ant before the first move and after every move. When
    /// it returns `true` the walk ends as [`WalkOutcome::OutOfSteps`], unless
    /// the ant has already arrived.
    pub fn walk_until(
        &mut self,
        target: GridCoord,
        max_steps: usize,
        mut stop: impl FnMut(&Ant) -> bool,
    ) -> WalkOutcome {
        let start = self.steps();

        let outcome = loop {
            let steps = self.steps() - start;
            let stopped = stop(self);
            if self.position == target {
                break WalkOutcome::Arrived { steps };
            }
            if steps >= max_steps || stopped {
                break WalkOutcome::OutOfSteps { steps };
            }

            let displacement = self.step_toward(target);
            if !self.advance(displacement) {
                break WalkOutcome::Stuck { steps };
            }
        };

        info!(
            "[Ant] {} walk to {} ended at {}: {:?}",
            self.name, target, self.position, outcome
        );
        outcome
    }
}

impl std::fmt::Debug for Ant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ant")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("kind", &self.navigator.kind())
            .field("target", &self.navigator.target())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridBounds, Terrain};
    use crate::network::NullBroadcast;
    use crate::pathfinding::{DStarPlanner, GridStrategy};
    use crate::world::TileMap;

    fn ant_on(map: TileMap, start: GridCoord) -> Ant {
        let strategy = GridStrategy::with_defaults(map.bounds());
        Ant::new(
            "test",
            start,
            Box::new(DStarPlanner::with_defaults(strategy)),
            Arc::new(map),
            Box::new(NullBroadcast),
        )
    }

    #[test]
    fn test_advance_rules() {
        let map = TileMap::from_ascii(
            "
            .~.
            ...
            ",
        )
        .unwrap();
        let mut ant = ant_on(map, GridCoord::ZERO);

        assert!(!ant.advance(GridCoord::ZERO));
        assert!(!ant.advance(GridCoord::new(1, 0)));
        assert!(!ant.advance(GridCoord::new(2, 0)));
        assert!(!ant.advance(GridCoord::new(-1, 0)));
        assert!(ant.advance(GridCoord::new(1, 1)));
        assert_eq!(ant.position(), GridCoord::new(1, 1));
        assert_eq!(ant.steps(), 1);
    }

    #[test]
    fn test_walk_to_arrives() {
        let map = TileMap::from_ascii(
            "
            ......
            .~~~~.
            ......
            ",
        )
        .unwrap();
        let mut ant = ant_on(map, GridCoord::new(0, 1));
        let outcome = ant.walk_to(GridCoord::new(5, 1), 50);

        assert!(outcome.arrived());
        assert_eq!(ant.position(), GridCoord::new(5, 1));
        assert_eq!(ant.trail().first(), Some(&GridCoord::new(0, 1)));
        assert!(ant.trail().iter().all(|p| p.y != 1 || p.x == 0 || p.x == 5));
    }

    #[test]
    fn test_walk_to_walled_off_target() {
        let map = TileMap::from_ascii(
            "
            ..~.
            ..~.
            ",
        )
        .unwrap();
        let mut ant = ant_on(map, GridCoord::ZERO);
        let outcome = ant.walk_to(GridCoord::new(3, 0), 50);

        assert!(matches!(outcome, WalkOutcome::Stuck { .. }));
        assert!(ant.position().x < 2);
    }

    #[test]
    fn test_walk_to_step_budget() {
        let map = TileMap::filled(GridBounds::from_size(10, 1), Terrain::Grass);
        let mut ant = ant_on(map, GridCoord::ZERO);
        assert_eq!(
            ant.walk_to(GridCoord::new(9, 0), 3),
            WalkOutcome::OutOfSteps { steps: 3 }
        );
        assert_eq!(ant.position(), GridCoord::new(3, 0));
    }

    #[test]
    fn test_walk_until_stops_on_request() {
        let map = TileMap::filled(GridBounds::from_size(10, 1), Terrain::Grass);
        let mut ant = ant_on(map, GridCoord::ZERO);
        let mut seen = Vec::new();

        let outcome = ant.walk_until(GridCoord::new(9, 0), 50, |ant| {
            seen.push(ant.position());
            ant.steps() == 2
        });

        assert_eq!(outcome, WalkOutcome::OutOfSteps { steps: 2 });
        assert_eq!(ant.position(), GridCoord::new(2, 0));
        assert_eq!(seen, ant.trail());
    }

    #[test]
    fn test_walk_until_sees_arriving_move() {
        let map = TileMap::filled(GridBounds::from_size(4, 1), Terrain::Grass);
        let mut ant = ant_on(map, GridCoord::ZERO);
        let mut calls = 0;

        // Stopping on the final cell does not undo the arrival
        let outcome = ant.walk_until(GridCoord::new(3, 0), 50, |ant| {
            calls += 1;
            ant.position() == GridCoord::new(3, 0)
        });

        assert_eq!(outcome, WalkOutcome::Arrived { steps: 3 });
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_walk_until_stopped_before_first_move() {
        let map = TileMap::filled(GridBounds::from_size(4, 1), Terrain::Grass);
        let mut ant = ant_on(map, GridCoord::ZERO);

        let outcome = ant.walk_until(GridCoord::new(3, 0), 50, |_| true);

        assert_eq!(outcome, WalkOutcome::OutOfSteps { steps: 0 });
        assert_eq!(ant.trail(), &[GridCoord::ZERO]);
    }
}
