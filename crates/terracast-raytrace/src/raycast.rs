//! Run-based grid traversal for the nearest ray-heightfield hit.

use terracast_heightfield::HeightMap;
use terracast_math::Tolerance;

use crate::intersect::{intersect_triangle, Triangle};
use crate::slab::intersect_bounds;
use crate::{Ray, RayHit};

const PARALLEL: f64 = Tolerance::DEFAULT.parallel;

/// Nearest-hit ray query against a geometric object.
pub trait Raycast {
    /// Find the nearest surface hit of `ray`, if any.
    ///
    /// Degenerate rays (zero-length or non-finite direction) and rays whose
    /// window misses the bounding volume report `None`; the query never
    /// fails in any other way.
    fn find_intersection(&self, ray: &Ray) -> Option<RayHit>;
}

impl Raycast for HeightMap {
    fn find_intersection(&self, ray: &Ray) -> Option<RayHit> {
        if ray.is_degenerate() {
            return None;
        }
        let (t_low, t_high) = intersect_bounds(ray, self.aabb())?;
        walk_grid(self, ray, t_low.max(0.0), t_high)
    }
}

/// Walk the cell grid row by row along the ray's XZ projection.
///
/// Each iteration handles one run: the contiguous span of columns the ray
/// crosses before leaving the current row. Runs are visited in increasing
/// distance along the ray, and cells within a run likewise, so the first
/// exact hit is the nearest.
fn walk_grid(map: &HeightMap, ray: &Ray, t_enter: f64, t_high: f64) -> Option<RayHit> {
    let entry = map.base_coordinates(&ray.at(t_enter));
    let gx0 = entry.x;
    let gz0 = entry.y;
    let dgx = ray.direction.x * map.width_ratio();
    let dgz = ray.direction.z * map.depth_ratio();

    // An infinite window means both horizontal slabs were parallel-inside;
    // the Y exit bounds the walk instead.
    let t_far = if t_high.is_finite() {
        t_high
    } else {
        let t1 = (map.aabb().min.y - ray.origin.y) / ray.direction.y;
        let t2 = (map.aabb().max.y - ray.origin.y) / ray.direction.y;
        t1.max(t2)
    };

    let rows = map.rows() as isize;
    let mut row = (gz0.floor() as isize).clamp(0, rows - 1);
    let row_step = if dgz > 0.0 { 1 } else { -1 };
    let mut t = t_enter;

    loop {
        // Where the ray's projection leaves the current row
        let t_exit = if dgz.abs() < PARALLEL {
            t_far
        } else {
            let boundary = if dgz > 0.0 { (row + 1) as f64 } else { row as f64 };
            (t_enter + (boundary - gz0) / dgz).min(t_far)
        };
        let t_end = t_exit.max(t);

        let gx_start = gx0 + (t - t_enter) * dgx;
        let gx_end = gx0 + (t_end - t_enter) * dgx;
        let y_start = ray.origin.y + t * ray.direction.y;
        let y_end = ray.origin.y + t_end * ray.direction.y;

        if let Some(hit) = check_run(map, ray, row as usize, gx_start, gx_end, y_start, y_end) {
            return Some(hit);
        }

        if t_end >= t_far {
            return None;
        }
        row += row_step;
        if row < 0 || row >= rows {
            return None;
        }
        t = t_end;
    }
}

/// Test one run of cells `[gx_start, gx_end]` at a fixed row.
///
/// First a conservative cull: if the ray's lowest height over the run never
/// dips below the tallest cell corner in the run, no triangle can be hit
/// and the whole run is skipped. Otherwise each cell gets its own height
/// cull (the ray's height is linear in the column fraction) before the
/// exact test.
fn check_run(
    map: &HeightMap,
    ray: &Ray,
    row: usize,
    gx_start: f64,
    gx_end: f64,
    y_start: f64,
    y_end: f64,
) -> Option<RayHit> {
    let cols = map.cols() as isize;
    let col_from = (gx_start.floor() as isize).clamp(0, cols - 1);
    let col_to = (gx_end.floor() as isize).clamp(0, cols - 1);
    let (col_lo, col_hi) = if col_from <= col_to {
        (col_from, col_to)
    } else {
        (col_to, col_from)
    };

    let run_min_y = y_start.min(y_end);
    let mut run_max = f64::NEG_INFINITY;
    for col in col_lo..=col_hi {
        run_max = run_max.max(map.cell_max_elevation(row, col as usize));
    }
    if run_min_y > run_max {
        return None;
    }

    let span = gx_end - gx_start;
    let slope = y_end - y_start;
    let col_step = if col_from <= col_to { 1 } else { -1 };
    let mut col = col_from;
    loop {
        // Ray height across this cell's share of the run
        let (y0, y1) = if span.abs() < PARALLEL {
            (y_start, y_end)
        } else {
            let a = ((col as f64 - gx_start) / span).clamp(0.0, 1.0);
            let b = (((col + 1) as f64 - gx_start) / span).clamp(0.0, 1.0);
            (y_start + a * slope, y_start + b * slope)
        };
        if y0.min(y1) <= map.cell_max_elevation(row, col as usize) {
            if let Some(hit) = check_cell(map, ray, row, col as usize) {
                return Some(hit);
            }
        }
        if col == col_to {
            return None;
        }
        col += col_step;
    }
}

/// Exact test against the two triangles of one cell; nearer hit wins.
fn check_cell(map: &HeightMap, ray: &Ray, row: usize, col: usize) -> Option<RayHit> {
    let [tl, tr, bl, br] = map.cell_corners(row, col);
    let first = intersect_triangle(ray, &Triangle::new(tl, tr, bl));
    let second = intersect_triangle(ray, &Triangle::new(tr, br, bl));
    let best = match (first, second) {
        (Some(a), Some(b)) => {
            if a.t <= b.t {
                Some(a)
            } else {
                Some(b)
            }
        }
        (a, b) => a.or(b),
    }?;
    Some(RayHit::new(best.t, ray.at(best.t), best.normal))
}
