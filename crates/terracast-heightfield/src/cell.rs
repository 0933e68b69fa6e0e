//! A single quad patch of the heightfield mesh.

use std::fmt;

/// One cell of the heightfield: four corner elevations and their cached
/// maximum.
///
/// A cell represents the quad spanned by four adjacent samples, split into
/// the triangles `(top_left, top_right, bottom_left)` and
/// `(top_right, bottom_right, bottom_left)`. "Top" is the lower row index
/// (smaller Z), "left" the lower column index (smaller X).
///
/// Cells are immutable after construction, so the cached maximum can never
/// go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    top_left: f64,
    top_right: f64,
    bottom_left: f64,
    bottom_right: f64,
    max_height: f64,
}

impl Cell {
    /// Build a cell from its four corner elevations.
    pub fn new(top_left: f64, top_right: f64, bottom_left: f64, bottom_right: f64) -> Self {
        let max_height = top_left
            .max(top_right)
            .max(bottom_left)
            .max(bottom_right);
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            max_height,
        }
    }

    /// Corner at (row, col).
    pub fn top_left(&self) -> f64 {
        self.top_left
    }

    /// Corner at (row, col + 1).
    pub fn top_right(&self) -> f64 {
        self.top_right
    }

    /// Corner at (row + 1, col).
    pub fn bottom_left(&self) -> f64 {
        self.bottom_left
    }

    /// Corner at (row + 1, col + 1).
    pub fn bottom_right(&self) -> f64 {
        self.bottom_right
    }

    /// Maximum of the four corner elevations, used for traversal culling.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{:.2},{:.2},{:.2},{:.2} -> {:.2}}}",
            self.top_left, self.top_right, self.bottom_left, self.bottom_right, self.max_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_height_tracks_corners() {
        let cell = Cell::new(0.1, 0.9, 0.3, 0.5);
        assert_eq!(cell.max_height(), 0.9);

        // Flat cell
        let flat = Cell::new(0.4, 0.4, 0.4, 0.4);
        assert_eq!(flat.max_height(), 0.4);

        // Maximally divergent corners, max in each position
        assert_eq!(Cell::new(1.0, 0.0, 0.0, 0.0).max_height(), 1.0);
        assert_eq!(Cell::new(0.0, 1.0, 0.0, 0.0).max_height(), 1.0);
        assert_eq!(Cell::new(0.0, 0.0, 1.0, 0.0).max_height(), 1.0);
        assert_eq!(Cell::new(0.0, 0.0, 0.0, 1.0).max_height(), 1.0);
    }

    #[test]
    fn test_negative_elevations() {
        let cell = Cell::new(-2.0, -1.0, -3.0, -4.0);
        assert_eq!(cell.max_height(), -1.0);
    }
}
