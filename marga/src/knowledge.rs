//! Sparse per-agent cell knowledge store.
//!
//! Cells are created lazily: reading a coordinate that was never written
//! yields the unknown default without inserting anything. The store is
//! owned by a single planner; outside readers get [`KnowledgeStore::snapshot`]
//! or shared references only.

use std::collections::{HashMap, HashSet};

use crate::core::{CellKnowledge, GridCoord};

/// Coordinate-keyed map of [`CellKnowledge`].
#[derive(Clone, Debug, Default)]
pub struct KnowledgeStore {
    cells: HashMap<GridCoord, CellKnowledge>,
}

impl KnowledgeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge about `pos`, or the unknown default.
    #[inline]
    pub fn get(&self, pos: GridCoord) -> CellKnowledge {
        self.cells.get(&pos).copied().unwrap_or_default()
    }

    /// Overwrite the knowledge about `pos`.
    #[inline]
    pub fn put(&mut self, pos: GridCoord, knowledge: CellKnowledge) {
        self.cells.insert(pos, knowledge);
    }

    /// Iterate over every stored cell (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &CellKnowledge)> {
        self.cells.iter().map(|(pos, k)| (*pos, k))
    }

    /// Mutable iteration, used by bulk resets.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GridCoord, &mut CellKnowledge)> {
        self.cells.iter_mut().map(|(pos, k)| (*pos, k))
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of sensed cells
    pub fn detected_count(&self) -> usize {
        self.cells.values().filter(|k| k.detected).count()
    }

    /// Number of cells known to be impassable
    pub fn obstacle_count(&self) -> usize {
        self.cells.values().filter(|k| k.obstacle).count()
    }

    /// Immutable copy for renderers and tests.
    pub fn snapshot(&self) -> HashMap<GridCoord, CellKnowledge> {
        self.cells.clone()
    }

    /// Follow `next` pointers from `pos`.
    ///
    /// The returned path starts with `pos` and ends at the first cell without
    /// a successor. Returns `None` if the walk revisits a cell.
    pub fn path_from(&self, pos: GridCoord) -> Option<Vec<GridCoord>> {
        let mut path = vec![pos];
        let mut visited = HashSet::from([pos]);
        let mut current = pos;

        while let Some(next) = self.get(current).next {
            if !visited.insert(next) {
                return None;
            }
            path.push(next);
            current = next;
        }

        Some(path)
    }
}
