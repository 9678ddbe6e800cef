//! Error types for Pipilika

use marga::ConfigLoadError;
use marga::pathfinding::StrategyError;
use marga::world::WorldError;
use thiserror::Error;

/// Pipilika error type
#[derive(Error, Debug)]
pub enum PipilikaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("World error: {0}")]
    World(String),

    #[error("Thread error: {0}")]
    Thread(String),
}

impl From<toml::de::Error> for PipilikaError {
    fn from(e: toml::de::Error) -> Self {
        PipilikaError::Config(e.to_string())
    }
}

impl From<ConfigLoadError> for PipilikaError {
    fn from(e: ConfigLoadError) -> Self {
        PipilikaError::Config(e.to_string())
    }
}

impl From<StrategyError> for PipilikaError {
    fn from(e: StrategyError) -> Self {
        PipilikaError::Config(e.to_string())
    }
}

impl From<WorldError> for PipilikaError {
    fn from(e: WorldError) -> Self {
        PipilikaError::World(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipilikaError>;
