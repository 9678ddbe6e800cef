//! Agent strategy hooks.
//!
//! A [`Strategy`] supplies the policy parts of planning that differ per
//! agent kind: movement connectivity, step cost, how far the agent sees,
//! and which cells are worth expanding at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GridBounds, GridCoord};

/// Largest accepted look radius (cells sensed per detection pass grow with its square)
pub const MAX_LOOK_RADIUS: u32 = 16;

/// Strategy construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    /// Diagonal step cost must be finite and positive
    #[error("diagonal cost must be finite and positive, got {0}")]
    InvalidDiagonalCost(f32),

    /// Look radius above [`MAX_LOOK_RADIUS`]
    #[error("look radius {radius} exceeds maximum {max}")]
    LookRadiusTooLarge {
        /// Requested radius
        radius: u32,
        /// Accepted maximum
        max: u32,
    },
}

/// Policy hooks consumed by the planners.
pub trait Strategy: Send {
    /// Cost of moving between two adjacent cells. Must be `>= 0`.
    fn heuristic(&self, from: GridCoord, to: GridCoord) -> f32;

    /// Should the planner propagate through `pos`?
    fn shall_expand(&self, pos: GridCoord) -> bool;

    /// Cells sensed when detecting around `origin`.
    fn look(&self, origin: GridCoord) -> Vec<GridCoord>;

    /// Adjacent cells reachable in one move, ignoring obstacles.
    fn neighbors(&self, pos: GridCoord) -> Vec<GridCoord>;
}

/// Grid movement connectivity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Cardinal moves only
    Four,
    /// Cardinal and diagonal moves
    #[default]
    Eight,
}

/// [`GridStrategy`] configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Allowed moves
    pub connectivity: Connectivity,
    /// Cost of a diagonal step (sqrt(2) ≈ 1.414)
    pub diagonal_cost: f32,
    /// Chebyshev radius sensed around the next hop
    pub look_radius: u32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            diagonal_cost: std::f32::consts::SQRT_2,
            look_radius: 1,
        }
    }
}

/// Standard ant strategy on a bounded world.
///
/// Expansion stops at the world bounds; the agent senses every cell within
/// `look_radius` of the next hop.
#[derive(Clone, Debug)]
pub struct GridStrategy {
    bounds: GridBounds,
    config: StrategyConfig,
}

impl GridStrategy {
    /// Create a strategy for a world of the given extent.
    pub fn new(bounds: GridBounds, config: StrategyConfig) -> Result<Self, StrategyError> {
        if !config.diagonal_cost.is_finite() || config.diagonal_cost <= 0.0 {
            return Err(StrategyError::InvalidDiagonalCost(config.diagonal_cost));
        }
        if config.look_radius > MAX_LOOK_RADIUS {
            return Err(StrategyError::LookRadiusTooLarge {
                radius: config.look_radius,
                max: MAX_LOOK_RADIUS,
            });
        }

        Ok(Self { bounds, config })
    }

    /// Create with default configuration
    pub fn with_defaults(bounds: GridBounds) -> Self {
        Self {
            bounds,
            config: StrategyConfig::default(),
        }
    }

    /// Expansion horizon
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Configuration in use
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }
}

impl Strategy for GridStrategy {
    /// Octile distance on 8-connected grids, manhattan on 4-connected ones.
    fn heuristic(&self, from: GridCoord, to: GridCoord) -> f32 {
        let dx = (from.x - to.x).abs() as f32;
        let dy = (from.y - to.y).abs() as f32;

        match self.config.connectivity {
            Connectivity::Eight => {
                let min = dx.min(dy);
                let max = dx.max(dy);
                min * self.config.diagonal_cost + (max - min)
            }
            Connectivity::Four => dx + dy,
        }
    }

    fn shall_expand(&self, pos: GridCoord) -> bool {
        self.bounds.contains(pos)
    }

    fn look(&self, origin: GridCoord) -> Vec<GridCoord> {
        let r = self.config.look_radius as i32;
        let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
        cells.push(origin);

        for dy in -r..=r {
            for dx in -r..=r {
                if dx != 0 || dy != 0 {
                    cells.push(origin + GridCoord::new(dx, dy));
                }
            }
        }

        cells
    }

    fn neighbors(&self, pos: GridCoord) -> Vec<GridCoord> {
        match self.config.connectivity {
            Connectivity::Eight => pos.neighbors_8().to_vec(),
            Connectivity::Four => pos.neighbors_4().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(connectivity: Connectivity) -> GridStrategy {
        GridStrategy::new(
            GridBounds::from_size(10, 10),
            StrategyConfig {
                connectivity,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_octile_heuristic() {
        let s = strategy(Connectivity::Eight);
        let h = s.heuristic(GridCoord::new(0, 0), GridCoord::new(1, 1));
        assert!((h - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert_eq!(s.heuristic(GridCoord::new(0, 0), GridCoord::new(0, 1)), 1.0);
        let h = s.heuristic(GridCoord::new(0, 0), GridCoord::new(3, 1));
        assert!((h - (2.0 + std::f32::consts::SQRT_2)).abs() < 1e-6);
    }

    #[test]
    fn test_manhattan_heuristic() {
        let s = strategy(Connectivity::Four);
        assert_eq!(s.heuristic(GridCoord::new(0, 0), GridCoord::new(2, 3)), 5.0);
        assert_eq!(s.neighbors(GridCoord::new(5, 5)).len(), 4);
    }

    #[test]
    fn test_shall_expand_respects_bounds() {
        let s = strategy(Connectivity::Eight);
        assert!(s.shall_expand(GridCoord::new(0, 0)));
        assert!(s.shall_expand(GridCoord::new(9, 9)));
        assert!(!s.shall_expand(GridCoord::new(10, 0)));
        assert!(!s.shall_expand(GridCoord::new(0, -1)));
    }

    #[test]
    fn test_look_radius() {
        let s = strategy(Connectivity::Eight);
        let cells = s.look(GridCoord::new(4, 4));
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], GridCoord::new(4, 4));

        let wide = GridStrategy::new(
            GridBounds::from_size(10, 10),
            StrategyConfig {
                look_radius: 2,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(wide.look(GridCoord::ZERO).len(), 25);
    }

    #[test]
    fn test_rejects_bad_config() {
        let bounds = GridBounds::from_size(4, 4);
        for bad in [-1.0, 0.0, f32::NAN, f32::INFINITY] {
            let config = StrategyConfig {
                diagonal_cost: bad,
                ..Default::default()
            };
            assert!(matches!(
                GridStrategy::new(bounds, config),
                Err(StrategyError::InvalidDiagonalCost(_))
            ));
        }

        let config = StrategyConfig {
            look_radius: MAX_LOOK_RADIUS + 1,
            ..Default::default()
        };
        assert!(matches!(
            GridStrategy::new(bounds, config),
            Err(StrategyError::LookRadiusTooLarge { .. })
        ));
    }
}
