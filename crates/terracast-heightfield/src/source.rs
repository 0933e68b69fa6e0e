//! External height-sample collaborators.

/// A rectangular grid of height samples, as supplied by an external
/// collaborator (image loader, procedural generator, test fixture).
///
/// Samples are addressed `(row, col)` with `row < sample_rows()` and
/// `col < sample_cols()`. Values are typically normalized intensities in
/// `[0, 1]` but raw elevations work too; the [`HeightMap`] scales them by
/// its vertical extent either way.
///
/// [`HeightMap`]: crate::HeightMap
pub trait HeightSource {
    /// Number of sample rows (Z axis).
    fn sample_rows(&self) -> usize;

    /// Number of sample columns (X axis).
    fn sample_cols(&self) -> usize;

    /// The sample at `(row, col)`. Callers stay in range.
    fn intensity_at(&self, row: usize, col: usize) -> f64;
}

/// An owned in-memory sample grid, row-major.
///
/// The simplest [`HeightSource`]; used by tests and the flat-field
/// constructor.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    samples: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl SampleGrid {
    /// Create a sample grid from row-major values.
    ///
    /// `samples.len()` must equal `rows * cols`.
    pub fn new(samples: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(samples.len(), rows * cols);
        Self {
            samples,
            rows,
            cols,
        }
    }

    /// A grid holding the same value everywhere.
    pub fn uniform(value: f64, rows: usize, cols: usize) -> Self {
        Self::new(vec![value; rows * cols], rows, cols)
    }
}

impl HeightSource for SampleGrid {
    fn sample_rows(&self) -> usize {
        self.rows
    }

    fn sample_cols(&self) -> usize {
        self.cols
    }

    fn intensity_at(&self, row: usize, col: usize) -> f64 {
        self.samples[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_grid_addressing() {
        let grid = SampleGrid::new(vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5], 2, 3);
        assert_eq!(grid.sample_rows(), 2);
        assert_eq!(grid.sample_cols(), 3);
        assert_eq!(grid.intensity_at(0, 0), 0.0);
        assert_eq!(grid.intensity_at(0, 2), 0.2);
        assert_eq!(grid.intensity_at(1, 0), 0.3);
        assert_eq!(grid.intensity_at(1, 2), 0.5);
    }

    #[test]
    fn test_uniform_grid() {
        let grid = SampleGrid::uniform(0.7, 3, 3);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(grid.intensity_at(row, col), 0.7);
            }
        }
    }
}
