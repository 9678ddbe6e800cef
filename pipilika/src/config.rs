//! Configuration loading for Pipilika

use std::collections::HashSet;
use std::path::Path;

use marga::config::{PlannerSection, StrategySection, WorldSection};
use marga::core::GridCoord;
use marga::pathfinding::{GridStrategy, NavigatorKind};
use serde::Deserialize;

use crate::error::{PipilikaError, Result};

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct PipilikaConfig {
    /// Cell every ant walks toward
    #[serde(default = "default_target")]
    pub target: GridCoord,

    #[serde(default)]
    pub world: WorldSection,

    #[serde(default)]
    pub planner: PlannerSection,

    #[serde(default)]
    pub strategy: StrategySection,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default = "default_ants")]
    pub ants: Vec<AntConfig>,
}

/// One ant of the colony
#[derive(Clone, Debug, Deserialize)]
pub struct AntConfig {
    pub name: String,

    /// Starting cell
    pub start: GridCoord,

    /// Planner driving the ant (default: dstar)
    #[serde(default)]
    pub kind: NavigatorKind,
}

/// Simulation pacing
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    /// Moves allowed per ant (default: 2000)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Pause between moves in milliseconds (default: 0)
    #[serde(default)]
    pub tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            tick_ms: 0,
        }
    }
}

// Default value functions
fn default_target() -> GridCoord {
    GridCoord::new(63, 63)
}
fn default_max_steps() -> usize {
    2000
}
fn default_ants() -> Vec<AntConfig> {
    vec![AntConfig {
        name: "scout".to_string(),
        start: GridCoord::ZERO,
        kind: NavigatorKind::DStar,
    }]
}

impl Default for PipilikaConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            world: WorldSection::default(),
            planner: PlannerSection::default(),
            strategy: StrategySection::default(),
            simulation: SimulationConfig::default(),
            ants: default_ants(),
        }
    }
}

impl PipilikaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipilikaError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PipilikaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that ants and target fit the world.
    pub fn validate(&self) -> Result<()> {
        let bounds = self.world.bounds();

        if self.ants.is_empty() {
            return Err(PipilikaError::Config("no ants configured".into()));
        }
        if !bounds.contains(self.target) {
            return Err(PipilikaError::Config(format!(
                "target {} outside the {}x{} world",
                self.target, self.world.width, self.world.height
            )));
        }

        let mut names = HashSet::new();
        for ant in &self.ants {
            if !names.insert(ant.name.as_str()) {
                return Err(PipilikaError::Config(format!(
                    "duplicate ant name '{}'",
                    ant.name
                )));
            }
            if !bounds.contains(ant.start) {
                return Err(PipilikaError::Config(format!(
                    "ant '{}' starts at {} outside the world",
                    ant.name, ant.start
                )));
            }
        }

        Ok(())
    }

    /// Strategy shared by every ant, covering the whole world
    pub fn grid_strategy(&self) -> Result<GridStrategy> {
        Ok(GridStrategy::new(
            self.world.bounds(),
            self.strategy.to_strategy_config(),
        )?)
    }
}
