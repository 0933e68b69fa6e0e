#![warn(missing_docs)]

//! Math types for the terracast heightfield kernel.
//!
//! Thin wrappers around nalgebra providing the domain types used by the
//! heightfield and raytrace crates: 3D points and vectors, unit directions,
//! 2D grid coordinates, and tolerance constants.

use nalgebra::{Unit, Vector2, Vector3};

/// A point in 3D world space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D world space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D space (fractional grid coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// An integer coordinate in a 2D cell grid: `(row, col)`.
///
/// Rows advance along world Z, columns along world X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Row index (Z axis).
    pub row: usize,
    /// Column index (X axis).
    pub col: usize,
}

impl GridCoord {
    /// Create a grid coordinate from row and column indices.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Tolerance below which a direction component counts as axis-parallel.
    pub parallel: f64,
}

impl Tolerance {
    /// Default kernel tolerances.
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        parallel: 1e-12,
    };

    /// Check if a scalar is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if a direction component is effectively parallel to an axis slab.
    pub fn is_parallel(&self, d: f64) -> bool {
        d.abs() < self.parallel
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_equality() {
        assert_eq!(GridCoord::new(2, 3), GridCoord { row: 2, col: 3 });
        assert_ne!(GridCoord::new(3, 2), GridCoord::new(2, 3));
    }

    #[test]
    fn test_tolerance_zero() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.is_zero(1e-12));
        assert!(!tol.is_zero(1e-6));
        assert!(tol.is_parallel(0.0));
        assert!(!tol.is_parallel(1e-9));
    }
}
