use std::collections::BTreeSet;

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, GridSpec};

/// Cells to mark, row-major ordered and free of duplicates.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deref, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightSet(BTreeSet<Cell>);

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the cell was newly added.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.0.insert(cell)
    }

    pub fn is_within(&self, spec: &GridSpec) -> bool {
        self.0.iter().all(|cell| spec.contains(cell))
    }

    /// Mirror every cell top-to-bottom within `spec`.
    pub fn flip_rows(&self, spec: &GridSpec) -> HighlightSet {
        self.0.iter().map(|c| Cell::new(spec.rows - 1 - c.row, c.column)).collect()
    }

    /// Mirror every cell left-to-right within `spec`.
    pub fn flip_columns(&self, spec: &GridSpec) -> HighlightSet {
        self.0.iter().map(|c| Cell::new(c.row, spec.columns - 1 - c.column)).collect()
    }
}

impl FromIterator<Cell> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        HighlightSet(iter.into_iter().collect())
    }
}

impl IntoIterator for HighlightSet {
    type Item = Cell;
    type IntoIter = std::collections::btree_set::IntoIter<Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a Cell;
    type IntoIter = std::collections::btree_set::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<Cell> for HighlightSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}
