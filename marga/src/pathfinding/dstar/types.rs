//! D* planner types.

/// D* planner configuration
#[derive(Clone, Debug, PartialEq)]
pub struct DStarConfig {
    /// Maximum cells expanded in one drain cycle; the rest waits for the next
    /// cycle
    pub max_expansions: usize,
}

impl Default for DStarConfig {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
        }
    }
}

impl DStarConfig {
    /// Override the expansion budget
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

/// Outcome of one drain cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// Cells expanded (obstacles and cells outside the horizon excluded)
    pub expansions: usize,
    /// Expansions of cells whose cost was rising
    pub raised: usize,
    /// Expansions of cells whose cost was settled or falling
    pub lowered: usize,
    /// Raising cells settled at their current cost (`min_cost` lifted)
    pub settled: usize,
    /// Budget ran out with work still queued
    pub exhausted: bool,
}

/// Counters accumulated over a planner's lifetime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlannerStats {
    /// Drain cycles run
    pub drains: usize,
    /// Total cells expanded
    pub expansions: usize,
    /// Total raising expansions
    pub raised: usize,
    /// Total lowering expansions
    pub lowered: usize,
    /// Total raising cells settled at their current cost
    pub settled: usize,
    /// Drain cycles cut short by the budget
    pub exhausted_drains: usize,
    /// Target changes (each one resets cost knowledge)
    pub target_changes: usize,
    /// Cells sensed through the oracle
    pub detections: usize,
    /// Colony updates applied
    pub broadcasts_applied: usize,
}

impl PlannerStats {
    pub(super) fn record_drain(&mut self, drain: &DrainStats) {
        self.drains += 1;
        self.expansions += drain.expansions;
        self.raised += drain.raised;
        self.lowered += drain.lowered;
        self.settled += drain.settled;
        if drain.exhausted {
            self.exhausted_drains += 1;
        }
    }
}
