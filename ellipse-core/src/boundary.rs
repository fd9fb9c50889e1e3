//! Closed-form boundary of an axis-aligned ellipse inscribed in a `major × minor` box.

use serde::{Deserialize, Serialize};

use crate::error::EllipseError;

/// How a boundary height is snapped to the lattice.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Always away from the center, so the rasterized boundary errs outward.
    #[default]
    Ceil,
    /// Half away from zero.
    Nearest,
}

impl Rounding {
    pub fn apply(&self, v: f64) -> f64 {
        match self {
            Rounding::Ceil => v.ceil(),
            Rounding::Nearest => v.round(),
        }
    }
}

/// Maps an index `x ∈ [0, major]` along the major axis to the offset (from the
/// near edge of the minor axis) of the ellipse's far half at `x`.
///
/// The ellipse is centered at `(major/2, minor/2)`, so offsets range from
/// `minor/2` at the two tips up to `minor` at the middle.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFn {
    major: usize,
    minor: usize,
    half: f64,
    half_sq: f64,
    rounding: Rounding,
}

impl BoundaryFn {
    pub fn new(major: usize, minor: usize) -> Result<Self, EllipseError> {
        Self::with_rounding(major, minor, Rounding::default())
    }

    pub fn with_rounding(major: usize, minor: usize, rounding: Rounding) -> Result<Self, EllipseError> {
        if major == 0 || minor == 0 {
            return Err(EllipseError::Degenerate { major, minor });
        }
        let half = major as f64 / 2.;
        Ok(BoundaryFn {
            major,
            minor,
            half,
            half_sq: half * half,
            rounding,
        })
    }

    pub fn major(&self) -> usize {
        self.major
    }

    pub fn minor(&self) -> usize {
        self.minor
    }

    /// Half-chord of the circumscribing circle (radius `major/2`) at `x`; 0 outside `[0, major]`.
    pub fn height(&self, x: f64) -> f64 {
        let dx = x - self.half;
        let radicand = self.half_sq - dx * dx;
        if radicand >= 0. { radicand.sqrt() } else { 0. }
    }

    /// Unrounded boundary offset: the circle's half-chord squashed by `minor/major`, shifted to the center.
    pub fn y(&self, x: f64) -> f64 {
        let minor = self.minor as f64;
        minor * self.height(x) / self.major as f64 + minor / 2.
    }

    pub fn offset(&self, x: usize) -> usize {
        let y = self.rounding.apply(self.y(x as f64));
        (y as usize).min(self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate() {
        assert_eq!(BoundaryFn::new(0, 3), Err(EllipseError::Degenerate { major: 0, minor: 3 }));
        assert_eq!(BoundaryFn::new(0, 0), Err(EllipseError::Degenerate { major: 0, minor: 0 }));
        assert_eq!(BoundaryFn::new(5, 0), Err(EllipseError::Degenerate { major: 5, minor: 0 }));
    }

    #[test]
    fn test_circle_offsets() {
        let f = BoundaryFn::new(10, 10).unwrap();
        assert_eq!(f.offset(0), 5);
        assert_eq!(f.offset(5), 10);
        assert_eq!(f.offset(10), 5);
        // height(1) = √(25 - 16) = 3
        assert_relative_eq!(f.height(1.), 3., epsilon = 1e-12);
        assert_eq!(f.offset(1), 8);
        assert_eq!(f.offset(2), 9);
        assert_eq!(f.offset(3), 10);
    }

    #[test]
    fn test_wide_offsets() {
        let f = BoundaryFn::new(10, 4).unwrap();
        assert_eq!(f.offset(0), 2);
        assert_eq!(f.offset(5), 4);
        assert_relative_eq!(f.y(5.), 4., epsilon = 1e-12);
        // y(1) = 4·3/10 + 2 = 3.2
        assert_relative_eq!(f.y(1.), 3.2, epsilon = 1e-12);
        assert_eq!(f.offset(1), 4);
    }

    #[test]
    fn test_nearest_rounding() {
        let f = BoundaryFn::with_rounding(10, 4, Rounding::Nearest).unwrap();
        assert_eq!(f.offset(0), 2);
        assert_eq!(f.offset(1), 3);
        assert_eq!(f.offset(5), 4);
    }

    #[test]
    fn test_outside_domain_clamps() {
        let f = BoundaryFn::new(6, 3).unwrap();
        assert_eq!(f.height(-1.), 0.);
        assert_eq!(f.height(7.5), 0.);
        assert!(!f.y(100.).is_nan());
        assert_eq!(f.offset(100), 2);
    }

    #[test]
    fn test_symmetric() {
        for (major, minor) in [(1, 1), (2, 1), (7, 3), (10, 10), (13, 5), (40, 17)] {
            let f = BoundaryFn::new(major, minor).unwrap();
            for x in 0..=major {
                assert_eq!(f.offset(x), f.offset(major - x), "major {} minor {} x {}", major, minor, x);
            }
        }
    }

    #[test]
    fn test_monotonic_and_bounded() {
        for (major, minor) in [(1, 1), (5, 2), (9, 9), (16, 7), (31, 30)] {
            for rounding in [Rounding::Ceil, Rounding::Nearest] {
                let f = BoundaryFn::with_rounding(major, minor, rounding).unwrap();
                let mut prev = f.offset(0);
                for x in 1..=major / 2 {
                    let cur = f.offset(x);
                    assert!(cur >= prev, "{:?} major {} minor {}: offset({}) = {} < {}", rounding, major, minor, x, cur, prev);
                    prev = cur;
                }
                for x in 0..=major {
                    let y = f.offset(x);
                    assert!(y <= minor);
                    assert!(2 * y >= minor);
                }
            }
        }
    }
}
