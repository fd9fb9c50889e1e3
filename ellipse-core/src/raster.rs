//! Turns a [`GridSpec`] into the [`HighlightSet`] of cells on (or inside) its inscribed ellipse.
//!
//! Rasterization works in normalized (major, minor) coordinates and maps back to grid
//! cells through [`Orientation::cell`], so tall and wide grids share one code path.
//!
//! Boundary offsets are evaluated on the lattice lines `0..=major` of the major axis. Line
//! `i` separates major cells `i - 1` and `i`, and contributes to both (when they exist).
//! On the minor axis an offset `y` is the line the boundary crosses; the cell just inside
//! it is `y - 1`, and its mirror image is `minor - y`.

use std::ops::RangeInclusive;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    boundary::{BoundaryFn, Rounding},
    ellipse::EllipseSpec,
    error::EllipseError,
    grid::GridSpec,
    highlight::HighlightSet,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Mark every cell between the two boundary cells, not just the boundary.
    pub fill_interior: bool,
    pub rounding: Rounding,
}

impl RasterConfig {
    pub fn filled() -> Self {
        RasterConfig { fill_interior: true, ..Default::default() }
    }
}

/// The two boundary cells (on the minor axis) at one lattice line of the major axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub index: usize,
    pub near: usize,
    pub far: usize,
}

impl Band {
    pub fn new(boundary: &BoundaryFn, index: usize) -> Self {
        let y = boundary.offset(index);
        Band {
            index,
            near: y.saturating_sub(1),
            far: boundary.minor() - y,
        }
    }

    /// Inclusive run between the boundary cells; `near` and `far` swap order at the tips of
    /// even-minor ellipses.
    pub fn span(&self) -> RangeInclusive<usize> {
        self.near.min(self.far)..=self.near.max(self.far)
    }

    /// Major-axis cells bordering this lattice line, clipped to `[0, major)`.
    pub fn cells(&self, major: usize) -> impl Iterator<Item = usize> {
        let before = self.index.checked_sub(1);
        let after = (self.index < major).then_some(self.index);
        before.into_iter().chain(after)
    }
}

pub fn bands(boundary: &BoundaryFn) -> impl Iterator<Item = Band> + '_ {
    (0..=boundary.major()).map(move |index| Band::new(boundary, index))
}

pub fn rasterize(grid: GridSpec, config: &RasterConfig) -> Result<HighlightSet, EllipseError> {
    let ellipse = EllipseSpec::from(grid);
    let EllipseSpec { major, minor, orientation } = ellipse;
    let boundary = ellipse.boundary(config.rounding)?;
    debug!("rasterize {}: major {}, minor {}, {:?}, {:?}", grid, major, minor, orientation, config);

    let mut highlights = HighlightSet::new();
    for band in bands(&boundary) {
        let span = band.span();
        let minors: Vec<usize> = if config.fill_interior {
            span.collect()
        } else {
            vec![*span.start(), *span.end()]
        };
        for m in band.cells(major) {
            highlights.extend(minors.iter().map(|&n| orientation.cell(m, n)));
        }
    }
    debug!("rasterize {}: {} of {} cells highlighted", grid, highlights.len(), grid.num_cells());
    Ok(highlights)
}
