use serde::{Deserialize, Serialize};

use crate::{
    boundary::{BoundaryFn, Rounding},
    error::EllipseError,
    grid::{Cell, GridSpec},
};

/// Which grid dimension the ellipse's major axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Major axis along the rows (`rows ≥ columns`): major indices select rows.
    Vertical,
    /// Major axis along the columns: major indices select columns.
    Horizontal,
}

impl Orientation {
    /// Map a (major, minor) position back to grid coordinates.
    pub fn cell(&self, major: usize, minor: usize) -> Cell {
        match self {
            Orientation::Vertical => Cell::new(major, minor),
            Orientation::Horizontal => Cell::new(minor, major),
        }
    }
}

/// The ellipse inscribed in a grid, with its axes normalized to (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EllipseSpec {
    pub major: usize,
    pub minor: usize,
    pub orientation: Orientation,
}

impl From<GridSpec> for EllipseSpec {
    fn from(GridSpec { rows, columns }: GridSpec) -> Self {
        if rows >= columns {
            EllipseSpec { major: rows, minor: columns, orientation: Orientation::Vertical }
        } else {
            EllipseSpec { major: columns, minor: rows, orientation: Orientation::Horizontal }
        }
    }
}

impl EllipseSpec {
    /// Center in (major, minor) coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.major as f64 / 2., self.minor as f64 / 2.)
    }

    pub fn boundary(&self, rounding: Rounding) -> Result<BoundaryFn, EllipseError> {
        BoundaryFn::with_rounding(self.major, self.minor, rounding)
    }
}
