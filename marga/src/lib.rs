//! # Marga: Incremental Pathfinding for Exploring Agents
//!
//! Agents ("ants") walk toward a goal cell on a grid whose terrain they
//! discover as they go. Each ant keeps its own belief about the world and
//! repairs its plan incrementally when it senses something new, instead of
//! replanning from scratch.
//!
//! ## Features
//!
//! - **Lifelong D\***: raising/lowering cost repair over a dynamic-key queue
//! - **Partial observability**: unknown cells are assumed passable until sensed
//! - **Cycle-safe**: successor chains are validated on every evaluation
//! - **Colony sharing**: ants broadcast what they sense to each other
//! - **BFS baseline**: full-replan planner behind the same [`Navigator`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use marga::core::GridCoord;
//! use marga::network::NullBroadcast;
//! use marga::pathfinding::{DStarPlanner, GridStrategy};
//! use marga::world::TileMap;
//! use marga::Ant;
//!
//! let map = TileMap::from_ascii(
//!     "
//!     ......
//!     .~~~~.
//!     ......
//!     ",
//! )
//! .unwrap();
//!
//! let planner = DStarPlanner::with_defaults(GridStrategy::with_defaults(map.bounds()));
//! let mut ant = Ant::new(
//!     "scout",
//!     GridCoord::new(0, 1),
//!     Box::new(planner),
//!     Arc::new(map),
//!     Box::new(NullBroadcast),
//! );
//!
//! let outcome = ant.walk_to(GridCoord::new(5, 1), 100);
//! println!("{:?} after {} steps", outcome, outcome.steps());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Coordinates, terrain, per-cell knowledge
//! - [`knowledge`]: Sparse per-agent knowledge store
//! - [`queue`]: Priority queue with bulk re-keying
//! - [`pathfinding`]: Strategies, D* and BFS planners, the [`Navigator`] trait
//! - [`world`]: Terrain oracles, ASCII maps, seeded world generation
//! - [`network`]: Colony broadcast of sensed terrain
//! - [`agent`]: The [`Ant`] tying a planner to its senses
//! - [`config`]: YAML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   target change ──► reset + seed target ──► queue
//!                                               │
//!   oracle / colony ──► on_discovered ─────────►│
//!                                               ▼
//!                                        drain (raise/lower)
//!                                               │
//!                                               ▼
//!                               store: next pointers ──► next move
//! ```

#![warn(missing_docs)]

pub mod agent;
pub mod config;
pub mod core;
pub mod knowledge;
pub mod network;
pub mod pathfinding;
pub mod queue;
pub mod world;

// Re-export main types at crate root
pub use agent::{Ant, WalkOutcome};
pub use config::{ConfigLoadError, MargaConfig};
pub use knowledge::KnowledgeStore;
pub use network::{Broadcast, ColonyNetwork, ColonyPort, MapUpdate, NullBroadcast};
pub use pathfinding::{
    BfsPlanner, DStarConfig, DStarPlanner, GridStrategy, Navigator, NavigatorKind, Senses,
    Strategy,
};
pub use queue::DynamicQueue;
pub use world::{RandomGenerator, TerrainOracle, TileMap};
