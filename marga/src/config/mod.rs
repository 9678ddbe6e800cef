//! Configuration loading for Marga.
//!
//! All settings live in one YAML file with defaults for every field.
//!
//! ```rust,ignore
//! use marga::config::MargaConfig;
//!
//! // Load from default path (configs/marga.yaml), or built-in defaults
//! let config = MargaConfig::load_default()?;
//!
//! let world = config.generate_world()?;
//! let strategy = config.grid_strategy()?;
//! let planner = DStarPlanner::new(strategy, config.dstar_config());
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! planner:
//!   max_expansions: 100000
//! strategy:
//!   connectivity: eight   # or four
//!   diagonal_cost: 1.4142135
//!   look_radius: 1
//! world:
//!   width: 64
//!   height: 64
//!   seed: 42
//!   biomes: { grass: 6.0, sand: 2.0, rock: 1.0, water: 2.0 }
//! ```

mod defaults;
mod error;
mod marga;
mod sections;

pub use error::ConfigLoadError;
pub use marga::MargaConfig;

pub use sections::{PlannerSection, StrategySection, WorldSection};
