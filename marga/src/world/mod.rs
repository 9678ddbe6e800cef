//! Ground truth worlds and the terrain oracle interface.
//!
//! - [`TerrainOracle`]: what planners query when sensing a cell
//! - [`TileMap`]: bounded dense map, parsable from ASCII
//! - [`RandomGenerator`]: seeded biome generator producing tile maps
//!
//! ## ASCII maps
//!
//! ```text
//! ....~~....      .  grass
//! ....~~..::      :  sand
//! ^^......::      ^  rock
//! ^^...~~~..      ~  water (impassable)
//! ```

mod generator;
mod oracle;
mod tile_map;

pub use generator::RandomGenerator;
pub use oracle::{OracleError, TerrainOracle, sense};
pub use tile_map::TileMap;

use thiserror::Error;

use crate::core::{GridCoord, Terrain};

/// Errors building a world.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// ASCII map has no rows or no columns
    #[error("map is empty")]
    EmptyMap,

    /// ASCII row width differs from the first row
    #[error("row {row} does not have the expected width {expected}")]
    RaggedRow {
        /// Offending row index
        row: usize,
        /// Width of the first row
        expected: usize,
    },

    /// Unrecognized character in an ASCII map
    #[error("unknown tile '{tile}' at {pos}")]
    UnknownTile {
        /// Character found
        tile: char,
        /// Where it was found
        pos: GridCoord,
    },

    /// Biome table has no positive frequency
    #[error("biome table has no positive frequency")]
    NoBiomes,

    /// Biome frequency is NaN or infinite
    #[error("invalid frequency {frequency} for {terrain:?}")]
    InvalidFrequency {
        /// Biome concerned
        terrain: Terrain,
        /// Rejected value
        frequency: f32,
    },

    /// Named biome does not exist
    #[error("unknown biome '{0}'")]
    UnknownBiome(String),
}
