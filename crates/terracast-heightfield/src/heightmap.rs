//! The heightfield grid and its coordinate queries.

use std::fmt;

use log::debug;
use terracast_math::{Dir3, GridCoord, Point2, Point3, Vec3};

use crate::{Aabb3, Cell, HeightFieldError, HeightSource, Material, SampleGrid};

/// A terrain surface as a dense grid of [`Cell`]s plus world placement.
///
/// A source of `R x C` samples yields an `(R-1) x (C-1)` cell grid: each
/// cell is bounded by four adjacent samples, so neighboring cells share an
/// edge and the mesh is continuous. Cells are stored in a flat row-major
/// buffer addressed `row * cols + col`.
///
/// World mapping: columns span `[position.x, position.x + width]`, rows span
/// `[position.z, position.z + depth]`, and a sample intensity `i` sits at
/// elevation `position.y + height * i`.
///
/// Everything is immutable after construction except [`set_position`], which
/// must not race with in-flight queries (configure, then query).
///
/// [`set_position`]: HeightMap::set_position
#[derive(Debug, Clone)]
pub struct HeightMap {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    width: f64,
    height: f64,
    depth: f64,
    width_ratio: f64,
    depth_ratio: f64,
    min_intensity: f64,
    max_intensity: f64,
    position: Point3,
    material: Material,
    aabb: Aabb3,
}

impl HeightMap {
    /// Build a heightfield from a sample source and placement parameters.
    ///
    /// `width`/`depth` are the world extents along X/Z; `height` scales
    /// sample intensity to elevation. The source must provide at least 2x2
    /// samples and all extents must be positive and finite.
    pub fn new(
        source: &dyn HeightSource,
        position: Point3,
        width: f64,
        height: f64,
        depth: f64,
        material: Material,
    ) -> Result<Self, HeightFieldError> {
        let sample_rows = source.sample_rows();
        let sample_cols = source.sample_cols();
        if sample_rows < 2 || sample_cols < 2 {
            return Err(HeightFieldError::SourceTooSmall {
                rows: sample_rows,
                cols: sample_cols,
            });
        }
        for (name, extent) in [("width", width), ("height", height), ("depth", depth)] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(HeightFieldError::BadExtent(name));
            }
        }

        let rows = sample_rows - 1;
        let cols = sample_cols - 1;
        let mut cells = Vec::with_capacity(rows * cols);
        let mut min_intensity = f64::INFINITY;
        let mut max_intensity = f64::NEG_INFINITY;
        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell::new(
                    source.intensity_at(row, col),
                    source.intensity_at(row, col + 1),
                    source.intensity_at(row + 1, col),
                    source.intensity_at(row + 1, col + 1),
                );
                min_intensity = min_intensity
                    .min(cell.top_left())
                    .min(cell.top_right())
                    .min(cell.bottom_left())
                    .min(cell.bottom_right());
                max_intensity = max_intensity.max(cell.max_height());
                cells.push(cell);
            }
        }

        let mut map = Self {
            cells,
            rows,
            cols,
            width,
            height,
            depth,
            width_ratio: cols as f64 / width,
            depth_ratio: rows as f64 / depth,
            min_intensity,
            max_intensity,
            position,
            material,
            aabb: Aabb3::empty(),
        };
        map.recompute_aabb();
        debug!(
            "built {}x{} cell heightfield, elevation range [{:.3}, {:.3}]",
            rows,
            cols,
            map.elevation(min_intensity),
            map.elevation(max_intensity),
        );
        Ok(map)
    }

    /// A heightfield with the same intensity everywhere; handy for tests.
    pub fn flat(
        intensity: f64,
        sample_rows: usize,
        sample_cols: usize,
        position: Point3,
        width: f64,
        height: f64,
        depth: f64,
        material: Material,
    ) -> Result<Self, HeightFieldError> {
        let source = SampleGrid::uniform(intensity, sample_rows, sample_cols);
        Self::new(&source, position, width, height, depth, material)
    }

    fn recompute_aabb(&mut self) {
        // The box must contain every triangle the grid can produce; corner
        // elevations are the extremes of the piecewise-linear surface.
        self.aabb = Aabb3::new(
            Point3::new(
                self.position.x,
                self.elevation(self.min_intensity),
                self.position.z,
            ),
            Point3::new(
                self.position.x + self.width,
                self.elevation(self.max_intensity),
                self.position.z + self.depth,
            ),
        );
    }

    /// World elevation of a sample intensity.
    #[inline]
    fn elevation(&self, intensity: f64) -> f64 {
        self.position.y + self.height * intensity
    }

    /// Number of cell rows (Z axis).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns (X axis).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// World extent along X.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical intensity-to-elevation scale.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// World extent along Z.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Cell columns per world unit along X.
    pub fn width_ratio(&self) -> f64 {
        self.width_ratio
    }

    /// Cell rows per world unit along Z.
    pub fn depth_ratio(&self) -> f64 {
        self.depth_ratio
    }

    /// World-space origin of the heightfield.
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Move the heightfield. Must happen before queries start, never during.
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
        self.recompute_aabb();
    }

    /// The material handle, returned unchanged.
    pub fn material(&self) -> Material {
        self.material
    }

    /// The precomputed bounding box.
    pub fn aabb(&self) -> &Aabb3 {
        &self.aabb
    }

    /// The cell at a grid index.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows()` or `col >= cols()`.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    /// Fractional grid coordinates of a world point: `x` is the column
    /// fraction, `y` the row fraction. Points outside the grid map to
    /// coordinates outside `[0, cols] x [0, rows]`.
    pub fn base_coordinates(&self, position: &Point3) -> Point2 {
        Point2::new(
            (position.x - self.position.x) * self.width_ratio,
            (position.z - self.position.z) * self.depth_ratio,
        )
    }

    /// Integer grid coordinates of a world point, or `None` if it lies
    /// outside the grid. Points on the far boundary fall into the last cell.
    pub fn int_base_coordinates(&self, position: &Point3) -> Option<GridCoord> {
        let base = self.base_coordinates(position);
        if base.x < 0.0 || base.y < 0.0 || base.x > self.cols as f64 || base.y > self.rows as f64 {
            return None;
        }
        Some(GridCoord::new(
            (base.y as usize).min(self.rows - 1),
            (base.x as usize).min(self.cols - 1),
        ))
    }

    /// The cell under a world point, or `None` outside the grid.
    pub fn cell_at(&self, position: &Point3) -> Option<&Cell> {
        self.int_base_coordinates(position)
            .map(|coord| self.cell(coord.row, coord.col))
    }

    /// World positions of a cell's corners: `[top_left, top_right,
    /// bottom_left, bottom_right]`.
    pub fn cell_corners(&self, row: usize, col: usize) -> [Point3; 4] {
        let cell = self.cell(row, col);
        let x0 = self.position.x + col as f64 / self.width_ratio;
        let x1 = self.position.x + (col + 1) as f64 / self.width_ratio;
        let z0 = self.position.z + row as f64 / self.depth_ratio;
        let z1 = self.position.z + (row + 1) as f64 / self.depth_ratio;
        [
            Point3::new(x0, self.elevation(cell.top_left()), z0),
            Point3::new(x1, self.elevation(cell.top_right()), z0),
            Point3::new(x0, self.elevation(cell.bottom_left()), z1),
            Point3::new(x1, self.elevation(cell.bottom_right()), z1),
        ]
    }

    /// World elevation of a cell's highest corner.
    pub fn cell_max_elevation(&self, row: usize, col: usize) -> f64 {
        self.elevation(self.cell(row, col).max_height())
    }

    /// Surface elevation under a world XZ position by bilinear interpolation
    /// of the containing cell's corners, or `None` outside the grid.
    pub fn sample_height(&self, world_x: f64, world_z: f64) -> Option<f64> {
        let probe = Point3::new(world_x, self.position.y, world_z);
        let coord = self.int_base_coordinates(&probe)?;
        let cell = self.cell(coord.row, coord.col);
        let base = self.base_coordinates(&probe);
        let fx = (base.x - coord.col as f64).clamp(0.0, 1.0);
        let fz = (base.y - coord.row as f64).clamp(0.0, 1.0);
        let top = cell.top_left() * (1.0 - fx) + cell.top_right() * fx;
        let bottom = cell.bottom_left() * (1.0 - fx) + cell.bottom_right() * fx;
        Some(self.elevation(top * (1.0 - fz) + bottom * fz))
    }

    /// Surface normal under a world XZ position via central difference of
    /// [`sample_height`], or `None` outside the grid.
    ///
    /// [`sample_height`]: HeightMap::sample_height
    pub fn sample_normal(&self, world_x: f64, world_z: f64) -> Option<Dir3> {
        let eps_x = 0.5 / self.width_ratio;
        let eps_z = 0.5 / self.depth_ratio;
        let clamp_x = |x: f64| {
            x.clamp(self.position.x, self.position.x + self.width)
        };
        let clamp_z = |z: f64| {
            z.clamp(self.position.z, self.position.z + self.depth)
        };
        self.sample_height(world_x, world_z)?;
        let x_neg = clamp_x(world_x - eps_x);
        let x_pos = clamp_x(world_x + eps_x);
        let z_neg = clamp_z(world_z - eps_z);
        let z_pos = clamp_z(world_z + eps_z);
        let dx = (self.sample_height(x_pos, world_z)? - self.sample_height(x_neg, world_z)?)
            / (x_pos - x_neg);
        let dz = (self.sample_height(world_x, z_pos)? - self.sample_height(world_x, z_neg)?)
            / (z_pos - z_neg);
        Some(Dir3::new_normalize(Vec3::new(-dx, 1.0, -dz)))
    }
}

impl fmt::Display for HeightMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "heightmap({}x{} cells, width={} height={} depth={})",
            self.rows, self.cols, self.width, self.height, self.depth
        )?;
        for row in 0..self.rows {
            write!(f, "  ")?;
            for col in 0..self.cols {
                write!(f, "{} ", self.cell(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
