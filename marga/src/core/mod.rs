//! Core types for the marga library.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`GridCoord`]: Integer cell indices, also used as single-step displacements
//! - [`GridBounds`]: Inclusive rectangle of cells (world extent, expansion horizon)
//!
//! ### Cells
//! - [`Terrain`]: Biome reported by the terrain oracle (Grass, Sand, Rock, Water)
//! - [`CellKnowledge`]: An agent's belief about one cell (cost, successor, sensing flags)
//! - [`KnowledgeUpdate`]: Partial update merged into a [`CellKnowledge`]

mod knowledge;
mod point;
mod terrain;

pub use knowledge::{CellKnowledge, KnowledgeUpdate};
pub use point::{GridBounds, GridCoord};
pub use terrain::Terrain;
