//! Configuration loading errors.

use thiserror::Error;

use crate::pathfinding::StrategyError;
use crate::world::WorldError;

/// Config load error
#[derive(Error, Debug, Clone)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Values parsed but describe an unusable world or strategy
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<WorldError> for ConfigLoadError {
    fn from(e: WorldError) -> Self {
        ConfigLoadError::Invalid(e.to_string())
    }
}

impl From<StrategyError> for ConfigLoadError {
    fn from(e: StrategyError) -> Self {
        ConfigLoadError::Invalid(e.to_string())
    }
}
