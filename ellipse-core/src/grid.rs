use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::error::GridError;

/// Dimensions of a grid of unit cells; both are always ≥ 1.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[display(fmt = "{}x{}", rows, columns)]
pub struct GridSpec {
    pub rows: usize,
    pub columns: usize,
}

impl GridSpec {
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        Ok(GridSpec {
            rows: positive("rows", rows)?,
            columns: positive("columns", columns)?,
        })
    }

    /// Build from untyped numeric input (e.g. JS numbers), truncating fractions.
    pub fn from_f64(rows: f64, columns: f64) -> Result<Self, GridError> {
        Ok(GridSpec {
            rows: finite("rows", rows)?,
            columns: finite("columns", columns)?,
        })
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    pub fn num_cells(&self) -> usize {
        self.rows * self.columns
    }
}

fn positive(name: &str, value: usize) -> Result<usize, GridError> {
    if value == 0 {
        Err(GridError::InvalidDimension { name: name.to_string(), value: value.to_string() })
    } else {
        Ok(value)
    }
}

fn finite(name: &str, value: f64) -> Result<usize, GridError> {
    if !value.is_finite() || value < 1. {
        Err(GridError::InvalidDimension { name: name.to_string(), value: value.to_string() })
    } else {
        Ok(value.trunc() as usize)
    }
}

/// A 0-indexed grid cell. Displays as `"{row}-{column}"`, the id renderers give it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Tsify)]
#[display(fmt = "{}-{}", row, column)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(row: usize, column: usize) -> Self {
        Cell { row, column }
    }
}

/// Row-major R×C storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub spec: GridSpec,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(spec: GridSpec, fill: T) -> Self {
        Grid { spec, cells: vec![fill; spec.num_cells()] }
    }
}

impl<T> Grid<T> {
    fn index(&self, cell: &Cell) -> Option<usize> {
        self.spec.contains(cell).then(|| cell.row * self.spec.columns + cell.column)
    }

    pub fn get(&self, cell: &Cell) -> Option<&T> {
        self.index(cell).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, cell: &Cell) -> Option<&mut T> {
        self.index(cell).map(move |idx| &mut self.cells[idx])
    }

    /// Returns `false` (and leaves the grid untouched) if `cell` is out of bounds.
    pub fn set(&mut self, cell: &Cell, value: T) -> bool {
        match self.get_mut(cell) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.spec.columns)
    }

    /// All cells with their values, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let columns = self.spec.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, value)| (Cell::new(idx / columns, idx % columns), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spec_rejects_zero() {
        assert_eq!(
            GridSpec::new(0, 3),
            Err(GridError::InvalidDimension { name: "rows".to_string(), value: "0".to_string() })
        );
        assert_eq!(
            GridSpec::new(3, 0),
            Err(GridError::InvalidDimension { name: "columns".to_string(), value: "0".to_string() })
        );
        assert_eq!(GridSpec::new(4, 10), Ok(GridSpec { rows: 4, columns: 10 }));
    }

    #[test]
    fn test_grid_spec_from_f64() {
        assert_eq!(GridSpec::from_f64(4.9, 10.), Ok(GridSpec { rows: 4, columns: 10 }));
        assert!(GridSpec::from_f64(f64::NAN, 3.).is_err());
        assert!(GridSpec::from_f64(3., f64::INFINITY).is_err());
        assert!(GridSpec::from_f64(-2., 3.).is_err());
        assert!(GridSpec::from_f64(0.5, 3.).is_err());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(3, 12).to_string(), "3-12");
        assert_eq!(GridSpec { rows: 4, columns: 10 }.to_string(), "4x10");
    }

    #[test]
    fn test_grid_bounds() {
        let spec = GridSpec::new(2, 3).unwrap();
        let mut grid = Grid::new(spec, false);
        assert!(grid.set(&Cell::new(1, 2), true));
        assert!(!grid.set(&Cell::new(2, 0), true));
        assert!(!grid.set(&Cell::new(0, 3), true));
        assert_eq!(grid.get(&Cell::new(1, 2)), Some(&true));
        assert_eq!(grid.get(&Cell::new(0, 0)), Some(&false));
        assert_eq!(grid.get(&Cell::new(0, 3)), None);

        let rows: Vec<&[bool]> = grid.rows().collect();
        assert_eq!(rows, vec![&[false, false, false][..], &[false, false, true][..]]);

        let marked: Vec<Cell> = grid.iter().filter(|(_, v)| **v).map(|(c, _)| c).collect();
        assert_eq!(marked, vec![Cell::new(1, 2)]);
    }
}
