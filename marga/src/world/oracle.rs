//! Terrain oracle: where agents learn what a cell actually is.

use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::core::{GridBounds, GridCoord, Terrain};

/// Failure to answer a terrain query.
///
/// Planners treat every failure exactly like "terrain unknown": the cell
/// stays undetected and is queried again on a later detection pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// Query did not complete in time
    #[error("terrain query timed out at {0}")]
    Timeout(GridCoord),
}

/// Source of ground truth terrain.
///
/// Queries are side-effect free and idempotent. `Ok(None)` means the cell
/// does not exist (outside the world) or is not known to the source.
pub trait TerrainOracle: Send + Sync {
    /// Terrain at `pos`, if any.
    fn query_terrain(&self, pos: GridCoord) -> Result<Option<Terrain>, OracleError>;

    /// Extent of the world, if finite.
    fn bounds(&self) -> Option<GridBounds> {
        None
    }
}

impl<T: TerrainOracle + ?Sized> TerrainOracle for Arc<T> {
    fn query_terrain(&self, pos: GridCoord) -> Result<Option<Terrain>, OracleError> {
        (**self).query_terrain(pos)
    }

    fn bounds(&self) -> Option<GridBounds> {
        (**self).bounds()
    }
}

impl<T: TerrainOracle + ?Sized> TerrainOracle for &T {
    fn query_terrain(&self, pos: GridCoord) -> Result<Option<Terrain>, OracleError> {
        (**self).query_terrain(pos)
    }

    fn bounds(&self) -> Option<GridBounds> {
        (**self).bounds()
    }
}

/// Query `oracle`, folding failures into "unknown".
pub fn sense(oracle: &dyn TerrainOracle, pos: GridCoord) -> Option<Terrain> {
    match oracle.query_terrain(pos) {
        Ok(terrain) => terrain,
        Err(e) => {
            warn!("[Oracle] query at {} failed, treating as unknown: {}", pos, e);
            None
        }
    }
}
