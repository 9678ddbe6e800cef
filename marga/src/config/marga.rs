//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pathfinding::{DStarConfig, GridStrategy};
use crate::world::{RandomGenerator, TileMap};

use super::error::ConfigLoadError;
use super::sections::{PlannerSection, StrategySection, WorldSection};

/// Full Marga configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct MargaConfig {
    /// D* planner settings
    #[serde(default)]
    pub planner: PlannerSection,

    /// Movement and sensing settings
    #[serde(default)]
    pub strategy: StrategySection,

    /// Generated world settings
    #[serde(default)]
    pub world: WorldSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/marga.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/marga.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Get the D* planner config
    pub fn dstar_config(&self) -> DStarConfig {
        self.planner.to_dstar_config()
    }

    /// Build the ant strategy for the configured world
    pub fn grid_strategy(&self) -> Result<GridStrategy, ConfigLoadError> {
        Ok(GridStrategy::new(
            self.world.bounds(),
            self.strategy.to_strategy_config(),
        )?)
    }

    /// Build the world generator
    pub fn generator(&self) -> Result<RandomGenerator, ConfigLoadError> {
        Ok(self.world.to_generator(None)?)
    }

    /// Generate the configured world
    pub fn generate_world(&self) -> Result<TileMap, ConfigLoadError> {
        Ok(self.generator()?.generate(self.world.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Terrain;
    use crate::pathfinding::Connectivity;

    #[test]
    fn test_default_config() {
        let config = MargaConfig::default();
        assert_eq!(config.planner.max_expansions, 100_000);
        assert_eq!(config.strategy.connectivity, Connectivity::Eight);
        assert_eq!(config.strategy.look_radius, 1);
        assert_eq!(config.world.width, 64);
        assert_eq!(config.world.biomes.len(), 4);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = MargaConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = MargaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = MargaConfig::from_yaml(
            "
strategy:
  connectivity: four
world:
  width: 10
  biomes:
    grass: 1.0
",
        )
        .unwrap();

        assert_eq!(config.strategy.connectivity, Connectivity::Four);
        assert_eq!(config.strategy.look_radius, 1);
        assert_eq!(config.world.width, 10);
        assert_eq!(config.world.height, 64);
        assert_eq!(config.planner.max_expansions, 100_000);

        let world = config.generate_world().unwrap();
        assert_eq!(world.count(Terrain::Grass), 10 * 64);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            MargaConfig::from_yaml("planner: [1, 2]"),
            Err(ConfigLoadError::Parse(_))
        ));

        let config = MargaConfig::from_yaml("world:\n  biomes:\n    lava: 1.0\n").unwrap();
        assert!(matches!(config.generator(), Err(ConfigLoadError::Invalid(_))));

        let config = MargaConfig::from_yaml("strategy:\n  diagonal_cost: -1.0\n").unwrap();
        assert!(matches!(config.grid_strategy(), Err(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut config = MargaConfig::default();
        config.world.seed = 99;
        config.planner.max_expansions = 500;

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), config.to_yaml().unwrap()).unwrap();

        let loaded = MargaConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.dstar_config().max_expansions, 500);
    }

    #[test]
    fn test_load_missing_file() {
        let result = MargaConfig::load(Path::new("/nonexistent/marga.yaml"));
        assert!(matches!(result, Err(ConfigLoadError::Io(_))));
    }
}
