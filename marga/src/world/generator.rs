//! Deterministic random world generation.
//!
//! Every tile draws from its own PRNG seeded by `(seed, x, y)`, so a tile's
//! terrain does not depend on the generated extent or on generation order.
//! The draw is mapped through the cumulative biome frequency table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{GridBounds, GridCoord, Terrain};

use super::WorldError;
use super::oracle::{OracleError, TerrainOracle};
use super::tile_map::TileMap;

/// Seeded biome generator.
#[derive(Clone, Debug)]
pub struct RandomGenerator {
    seed: u64,
    /// (terrain, cumulative probability), strictly increasing, last = 1.0
    cumulated: Vec<(Terrain, f32)>,
}

impl RandomGenerator {
    /// Build from relative biome frequencies.
    ///
    /// Frequencies need not sum to one; non-positive entries are skipped.
    pub fn new(seed: u64, frequencies: &[(Terrain, f32)]) -> Result<Self, WorldError> {
        let mut cumulated = Vec::with_capacity(frequencies.len());
        let mut sum = 0.0;

        for &(terrain, frequency) in frequencies {
            if !frequency.is_finite() {
                return Err(WorldError::InvalidFrequency { terrain, frequency });
            }
            if frequency > 0.0 {
                sum += frequency;
                cumulated.push((terrain, sum));
            }
        }

        if cumulated.is_empty() {
            return Err(WorldError::NoBiomes);
        }

        for entry in &mut cumulated {
            entry.1 /= sum;
        }

        Ok(Self { seed, cumulated })
    }

    /// Seed in use
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Terrain of a single tile.
    pub fn terrain_at(&self, pos: GridCoord) -> Terrain {
        let mut rng = StdRng::seed_from_u64(tile_seed(self.seed, pos));
        let draw: f32 = rng.random();

        self.cumulated
            .iter()
            .find(|(_, cumulative)| draw < *cumulative)
            .or(self.cumulated.last())
            .map(|(terrain, _)| *terrain)
            .unwrap_or(Terrain::Grass)
    }

    /// Generate every tile inside `bounds`.
    pub fn generate(&self, bounds: GridBounds) -> TileMap {
        let mut map = TileMap::filled(bounds, Terrain::Grass);
        for pos in bounds.iter() {
            map.set(pos, self.terrain_at(pos));
        }
        map
    }
}

impl TerrainOracle for RandomGenerator {
    fn query_terrain(&self, pos: GridCoord) -> Result<Option<Terrain>, OracleError> {
        Ok(Some(self.terrain_at(pos)))
    }
}

/// Mix the world seed with a tile position (splitmix64 finalizer).
fn tile_seed(seed: u64, pos: GridCoord) -> u64 {
    let mut z = seed
        ^ (pos.x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (pos.y as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F).rotate_left(32);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
