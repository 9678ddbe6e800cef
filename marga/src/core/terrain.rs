//! Terrain (biome) types reported by the terrain oracle.

use serde::{Deserialize, Serialize};

/// Terrain found on a cell once it has been sensed.
///
/// Only [`Terrain::Water`] blocks movement; every other biome is walkable
/// at the same step cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Open grassland
    Grass,
    /// Sand dunes
    Sand,
    /// Bare rock
    Rock,
    /// Lakes and rivers - impassable for ants
    Water,
}

impl Terrain {
    /// All terrain kinds, in generator order.
    pub const ALL: [Terrain; 4] = [Terrain::Grass, Terrain::Sand, Terrain::Rock, Terrain::Water];

    /// Is this terrain impassable?
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, Terrain::Water)
    }

    /// Can an ant walk on this terrain?
    #[inline]
    pub fn is_passable(self) -> bool {
        !self.is_obstacle()
    }

    /// Lowercase biome name
    pub fn name(self) -> &'static str {
        match self {
            Terrain::Grass => "grass",
            Terrain::Sand => "sand",
            Terrain::Rock => "rock",
            Terrain::Water => "water",
        }
    }

    /// Parse a lowercase biome name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Single character representation for ASCII maps
    pub fn as_char(self) -> char {
        match self {
            Terrain::Grass => '.',
            Terrain::Sand => ':',
            Terrain::Rock => '^',
            Terrain::Water => '~',
        }
    }

    /// Inverse of [`Terrain::as_char`]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Terrain::Grass),
            ':' => Some(Terrain::Sand),
            '^' => Some(Terrain::Rock),
            '~' => Some(Terrain::Water),
            _ => None,
        }
    }
}
