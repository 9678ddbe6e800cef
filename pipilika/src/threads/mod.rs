//! One thread per ant.
//!
//! Every ant gets its own planner and a port on the colony network. Threads
//! report back over a single channel when their walk ends.

mod ant;

pub use ant::AntThread;

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Receiver;
use marga::network::ColonyNetwork;
use marga::pathfinding::navigator;
use marga::world::TileMap;
use marga::Ant;

use crate::config::PipilikaConfig;
use crate::error::{PipilikaError, Result};
use crate::shared::{AntReport, SharedState};

/// Thread handles for the colony.
pub struct ColonyHandles {
    /// (ant name, handle)
    pub ants: Vec<(String, JoinHandle<()>)>,
    /// Final reports, one per ant
    pub reports: Receiver<AntReport>,
}

impl ColonyHandles {
    /// Whether every ant thread has exited
    pub fn all_finished(&self) -> bool {
        self.ants.iter().all(|(_, handle)| handle.is_finished())
    }
}

/// Spawn one thread per configured ant.
pub fn spawn_colony(
    config: &PipilikaConfig,
    world: Arc<TileMap>,
    network: &ColonyNetwork,
    shared_state: Arc<SharedState>,
) -> Result<ColonyHandles> {
    let (report_tx, report_rx) = crossbeam_channel::unbounded::<AntReport>();
    let strategy = config.grid_strategy()?;
    let tick = Duration::from_millis(config.simulation.tick_ms);

    let mut ants = Vec::with_capacity(config.ants.len());
    for ant_config in &config.ants {
        let ant = Ant::new(
            ant_config.name.clone(),
            ant_config.start,
            navigator(
                ant_config.kind,
                strategy.clone(),
                config.planner.to_dstar_config(),
            ),
            world.clone(),
            Box::new(network.join(ant_config.name.clone())),
        );

        let ant_thread = AntThread::new(
            ant,
            config.target,
            config.simulation.max_steps,
            tick,
            Arc::clone(&shared_state),
            report_tx.clone(),
        );

        let handle = thread::Builder::new()
            .name(format!("ant-{}", ant_config.name))
            .spawn(move || ant_thread.run())
            .map_err(|e| {
                PipilikaError::Thread(format!("Failed to spawn {}: {}", ant_config.name, e))
            })?;
        ants.push((ant_config.name.clone(), handle));
    }

    Ok(ColonyHandles {
        ants,
        reports: report_rx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AntConfig;
    use marga::core::GridCoord;
    use marga::pathfinding::NavigatorKind;

    const POND: &str = "
        ..........
        ...~~~~...
        ...~~~~...
        ..........
    ";

    fn pond_config(ants: Vec<AntConfig>) -> PipilikaConfig {
        let mut config = PipilikaConfig {
            target: GridCoord::new(9, 1),
            ants,
            ..Default::default()
        };
        config.world.width = 10;
        config.world.height = 4;
        config
    }

    fn ant(name: &str, x: i32, y: i32, kind: NavigatorKind) -> AntConfig {
        AntConfig {
            name: name.to_string(),
            start: GridCoord::new(x, y),
            kind,
        }
    }

    #[test]
    fn test_colony_reaches_target() {
        let world = Arc::new(TileMap::from_ascii(POND).unwrap());
        let config = pond_config(vec![
            ant("a", 0, 0, NavigatorKind::DStar),
            ant("b", 0, 3, NavigatorKind::DStar),
            ant("c", 5, 0, NavigatorKind::Bfs),
        ]);
        config.validate().unwrap();

        let network = ColonyNetwork::new();
        let shared = Arc::new(SharedState::new());
        let handles = spawn_colony(&config, world, &network, Arc::clone(&shared)).unwrap();

        let mut reports: Vec<AntReport> = (0..3).map(|_| handles.reports.recv().unwrap()).collect();
        for (_, handle) in handles.ants {
            handle.join().unwrap();
        }
        reports.sort_by(|a, b| a.name.cmp(&b.name));

        for report in &reports {
            assert!(report.outcome.arrived(), "{} {:?}", report.name, report.outcome);
            assert_eq!(report.position(), Some(config.target));
            assert!(report.detected > 0);
        }
        assert_eq!(reports[2].kind, NavigatorKind::Bfs);
        assert_eq!(shared.arrivals(), 3);
        assert_eq!(shared.finished(), 3);
        assert_eq!(shared.arrival_order().len(), 3);

        let moves: usize = reports.iter().map(|r| r.outcome.steps()).sum();
        assert_eq!(shared.total_steps(), moves as u64);
        assert!(network.is_empty());
    }

    #[test]
    fn test_step_budget_stops_ants() {
        let world = Arc::new(TileMap::from_ascii(POND).unwrap());
        let mut config = pond_config(vec![ant("slow", 0, 3, NavigatorKind::DStar)]);
        config.simulation.max_steps = 2;

        let network = ColonyNetwork::new();
        let shared = Arc::new(SharedState::new());
        let handles = spawn_colony(&config, world, &network, Arc::clone(&shared)).unwrap();

        let report = handles.reports.recv().unwrap();
        assert_eq!(report.outcome, marga::WalkOutcome::OutOfSteps { steps: 2 });
        assert_eq!(report.trail.len(), 3);
        assert_eq!(shared.arrivals(), 0);
    }

    #[test]
    fn test_shutdown_interrupts_walk() {
        let world = Arc::new(TileMap::from_ascii(POND).unwrap());
        let config = pond_config(vec![ant("idle", 0, 3, NavigatorKind::DStar)]);

        let network = ColonyNetwork::new();
        let shared = Arc::new(SharedState::new());
        shared.signal_shutdown();
        let handles = spawn_colony(&config, world, &network, Arc::clone(&shared)).unwrap();

        let report = handles.reports.recv().unwrap();
        assert_eq!(report.outcome, marga::WalkOutcome::OutOfSteps { steps: 0 });
        assert_eq!(shared.finished(), 1);
    }
}
