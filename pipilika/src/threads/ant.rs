//! Ant thread: walks one ant toward the colony target.
//!
//! Each move plans with the ant's own navigator, which senses the world and
//! picks up broadcasts from the rest of the colony along the way.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use marga::core::GridCoord;
use marga::{Ant, WalkOutcome};
use tracing::{debug, info, warn};

use crate::shared::{AntReport, SharedState};

/// Ant thread state and logic.
pub struct AntThread {
    ant: Ant,
    target: GridCoord,
    max_steps: usize,
    tick: Duration,
    shared_state: Arc<SharedState>,
    reports: Sender<AntReport>,
}

impl AntThread {
    /// Create a new ant thread.
    pub fn new(
        ant: Ant,
        target: GridCoord,
        max_steps: usize,
        tick: Duration,
        shared_state: Arc<SharedState>,
        reports: Sender<AntReport>,
    ) -> Self {
        Self {
            ant,
            target,
            max_steps,
            tick,
            shared_state,
            reports,
        }
    }

    /// Run until arrival, a dead end, the move budget, or shutdown.
    pub fn run(mut self) {
        info!(
            "Ant {} ({}) leaving {} for {}",
            self.ant.name(),
            self.ant.navigator().kind(),
            self.ant.position(),
            self.target
        );

        let outcome = self.walk();
        self.shared_state
            .record_finish(self.ant.name(), outcome.arrived());

        let store = self.ant.navigator().store();
        let report = AntReport {
            name: self.ant.name().to_string(),
            kind: self.ant.navigator().kind(),
            outcome,
            trail: self.ant.trail().to_vec(),
            detected: store.detected_count(),
            obstacles: store.obstacle_count(),
        };

        info!(
            "Ant {} finished at {}: {:?}",
            report.name,
            self.ant.position(),
            report.outcome
        );

        if self.reports.send(report).is_err() {
            warn!("Ant {}: report channel closed", self.ant.name());
        }
    }

    /// Walk with the ant, counting moves and pacing them by `tick`.
    fn walk(&mut self) -> WalkOutcome {
        let shared_state = &self.shared_state;
        let tick = self.tick;
        let mut counted = self.ant.steps();

        let outcome = self.ant.walk_until(self.target, self.max_steps, |ant| {
            if ant.steps() > counted {
                counted = ant.steps();
                shared_state.record_step();
                if !tick.is_zero() {
                    std::thread::sleep(tick);
                }
            }
            shared_state.should_shutdown()
        });

        if self.shared_state.should_shutdown() && !outcome.arrived() {
            debug!(
                "Ant {} interrupted after {} moves",
                self.ant.name(),
                outcome.steps()
            );
        }
        outcome
    }
}
