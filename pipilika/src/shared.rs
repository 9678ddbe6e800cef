//! Shared state for the ant threads.
//!
//! Every ant thread holds an `Arc<SharedState>`. The main thread uses it to
//! signal shutdown and to watch progress while waiting for reports.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use marga::WalkOutcome;
use marga::core::GridCoord;
use marga::pathfinding::NavigatorKind;
use parking_lot::Mutex;

/// Shared state between all threads.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Shutdown signal for graceful termination
    shutdown: AtomicBool,

    /// Ants that reached the target
    arrivals: AtomicU32,

    /// Ants whose walk ended, whatever the outcome
    finished: AtomicU32,

    /// Moves made by all ants
    total_steps: AtomicU64,

    /// Names in arrival order
    arrival_order: Mutex<Vec<String>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal shutdown.
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Check if shutdown is signaled.
    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Count one move.
    pub fn record_step(&self) {
        self.total_steps.fetch_add(1, Ordering::Relaxed);
    }

    /// Moves made by all ants so far.
    pub fn total_steps(&self) -> u64 {
        self.total_steps.load(Ordering::Relaxed)
    }

    /// Record the end of an ant's walk.
    pub fn record_finish(&self, name: &str, arrived: bool) {
        if arrived {
            self.arrival_order.lock().push(name.to_string());
            self.arrivals.fetch_add(1, Ordering::AcqRel);
        }
        self.finished.fetch_add(1, Ordering::AcqRel);
    }

    /// Ants that reached the target.
    pub fn arrivals(&self) -> u32 {
        self.arrivals.load(Ordering::Acquire)
    }

    /// Ants that stopped walking.
    pub fn finished(&self) -> u32 {
        self.finished.load(Ordering::Acquire)
    }

    /// Names of arrived ants, first arrival first.
    pub fn arrival_order(&self) -> Vec<String> {
        self.arrival_order.lock().clone()
    }
}

/// Final state of one ant, sent from its thread to the main thread.
#[derive(Clone, Debug)]
pub struct AntReport {
    pub name: String,
    pub kind: NavigatorKind,
    pub outcome: WalkOutcome,
    /// Cells visited, start included
    pub trail: Vec<GridCoord>,
    /// Cells the ant holds sensed terrain for
    pub detected: usize,
    /// Cells the ant believes impassable
    pub obstacles: usize,
}

impl AntReport {
    /// Where the ant ended up
    pub fn position(&self) -> Option<GridCoord> {
        self.trail.last().copied()
    }
}
