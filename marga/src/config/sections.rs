//! Configuration sections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{GridBounds, Terrain};
use crate::pathfinding::{Connectivity, DStarConfig, StrategyConfig};
use crate::world::{RandomGenerator, WorldError};

use super::defaults;

/// D* planner section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Expansion budget per drain cycle
    #[serde(default = "defaults::max_expansions")]
    pub max_expansions: usize,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            max_expansions: defaults::max_expansions(),
        }
    }
}

impl PlannerSection {
    /// Convert to DStarConfig
    pub fn to_dstar_config(&self) -> DStarConfig {
        DStarConfig {
            max_expansions: self.max_expansions,
        }
    }
}

/// Movement and sensing section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategySection {
    /// "four" or "eight"
    #[serde(default)]
    pub connectivity: Connectivity,

    /// Diagonal step cost
    #[serde(default = "defaults::diagonal_cost")]
    pub diagonal_cost: f32,

    /// Sensing radius around the next hop (cells)
    #[serde(default = "defaults::look_radius")]
    pub look_radius: u32,
}

impl Default for StrategySection {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::default(),
            diagonal_cost: defaults::diagonal_cost(),
            look_radius: defaults::look_radius(),
        }
    }
}

impl StrategySection {
    /// Convert to StrategyConfig
    pub fn to_strategy_config(&self) -> StrategyConfig {
        StrategyConfig {
            connectivity: self.connectivity,
            diagonal_cost: self.diagonal_cost,
            look_radius: self.look_radius,
        }
    }
}

/// Generated world section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSection {
    /// World width (cells)
    #[serde(default = "defaults::world_size")]
    pub width: usize,

    /// World height (cells)
    #[serde(default = "defaults::world_size")]
    pub height: usize,

    /// Generator seed
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Relative biome frequencies by name
    #[serde(default = "defaults::biomes")]
    pub biomes: BTreeMap<String, f32>,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: defaults::world_size(),
            height: defaults::world_size(),
            seed: defaults::seed(),
            biomes: defaults::biomes(),
        }
    }
}

impl WorldSection {
    /// World extent, anchored at the origin
    pub fn bounds(&self) -> GridBounds {
        GridBounds::from_size(self.width, self.height)
    }

    /// Biome table with names resolved
    pub fn frequencies(&self) -> Result<Vec<(Terrain, f32)>, WorldError> {
        self.biomes
            .iter()
            .map(|(name, frequency)| {
                Terrain::from_name(name)
                    .map(|terrain| (terrain, *frequency))
                    .ok_or_else(|| WorldError::UnknownBiome(name.clone()))
            })
            .collect()
    }

    /// Build the generator, optionally overriding the seed
    pub fn to_generator(&self, seed: Option<u64>) -> Result<RandomGenerator, WorldError> {
        RandomGenerator::new(seed.unwrap_or(self.seed), &self.frequencies()?)
    }
}
