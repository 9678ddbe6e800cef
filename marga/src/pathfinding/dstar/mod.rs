//! D* lifelong planning.
//!
//! Each cell holds a `cost` (estimated distance to the target) and a
//! `min_cost` (lowest cost since the last reset, used as queue key):
//! - `cost > min_cost`: raising, the cell's path got worse and dependents
//!   must be re-derived
//! - otherwise lowering, improvements propagate directly
//!
//! Successor chains are walked with a visited set on every evaluation so
//! a cell can never adopt a predecessor that routes back through itself.

mod planner;
mod types;

pub use planner::DStarPlanner;
pub use types::{DStarConfig, DrainStats, PlannerStats};
