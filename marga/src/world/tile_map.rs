//! Dense, bounded terrain map.

use crate::core::{GridBounds, GridCoord, Terrain};

use super::WorldError;
use super::oracle::{OracleError, TerrainOracle};

/// Terrain for every cell of a rectangular world.
///
/// Row-major storage, row `y` holds cells `(min.x..=max.x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    bounds: GridBounds,
    tiles: Vec<Terrain>,
}

impl TileMap {
    /// Create a map filled with one terrain.
    pub fn filled(bounds: GridBounds, terrain: Terrain) -> Self {
        Self {
            bounds,
            tiles: vec![terrain; bounds.area()],
        }
    }

    /// Parse an ASCII map (see [`Terrain::from_char`]).
    ///
    /// Line `i` becomes row `y = i`, column `j` becomes `x = j`. Blank
    /// lines and surrounding whitespace are ignored; all rows must have
    /// the same width.
    pub fn from_ascii(text: &str) -> Result<Self, WorldError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(WorldError::EmptyMap);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(WorldError::RaggedRow { row: y, expected: width });
            }
            for (x, c) in row.chars().enumerate() {
                let terrain = Terrain::from_char(c).ok_or(WorldError::UnknownTile {
                    tile: c,
                    pos: GridCoord::new(x as i32, y as i32),
                })?;
                tiles.push(terrain);
            }
        }

        Ok(Self {
            bounds: GridBounds::from_size(width, height),
            tiles,
        })
    }

    /// Render as ASCII, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.bounds.height());
        for row in self.tiles.chunks(self.bounds.width()) {
            out.extend(row.iter().map(|t| t.as_char()));
            out.push('\n');
        }
        out
    }

    #[inline]
    fn index(&self, pos: GridCoord) -> Option<usize> {
        if !self.bounds.contains(pos) {
            return None;
        }
        let dx = (pos.x - self.bounds.min.x) as usize;
        let dy = (pos.y - self.bounds.min.y) as usize;
        Some(dy * self.bounds.width() + dx)
    }

    /// Map extent
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Terrain at `pos`, `None` outside the map.
    pub fn get(&self, pos: GridCoord) -> Option<Terrain> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Overwrite one tile. Returns false if `pos` is outside the map.
    pub fn set(&mut self, pos: GridCoord, terrain: Terrain) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.tiles[i] = terrain;
                true
            }
            None => false,
        }
    }

    /// Inside the map and not an obstacle.
    pub fn is_passable(&self, pos: GridCoord) -> bool {
        self.get(pos).is_some_and(Terrain::is_passable)
    }

    /// Number of tiles of one terrain kind
    pub fn count(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| **t == terrain).count()
    }
}

impl TerrainOracle for TileMap {
    fn query_terrain(&self, pos: GridCoord) -> Result<Option<Terrain>, OracleError> {
        Ok(self.get(pos))
    }

    fn bounds(&self) -> Option<GridBounds> {
        Some(self.bounds)
    }
}
