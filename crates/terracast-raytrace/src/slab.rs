//! Slab test against the heightfield bounding box.

use terracast_heightfield::Aabb3;
use terracast_math::Tolerance;

use crate::Ray;

const PARALLEL: f64 = Tolerance::DEFAULT.parallel;

/// Intersect a ray with a heightfield bounding box using the slab method.
///
/// Returns `Some((t_low, t_high))` on a hit, where the range is the
/// parametric window in which the ray crosses the box's X/Z footprint. The
/// Y slab is checked last as a reject-only test: heightfields are bounded
/// tightly in Y, so it vetoes most grazing rays cheaply, but it never
/// narrows the returned range - the traversal wants the full horizontal
/// window and does its own fine Y culling per run.
///
/// Boundary comparisons are inclusive: a ray tangent to a face reports a
/// hit with `t_low == t_high`.
pub fn intersect_bounds(ray: &Ray, aabb: &Aabb3) -> Option<(f64, f64)> {
    let d = &ray.direction;
    let mut t_low = f64::NEG_INFINITY;
    let mut t_high = f64::INFINITY;

    if !slab_axis(ray.origin.x, d.x, aabb.min.x, aabb.max.x, &mut t_low, &mut t_high) {
        return None;
    }
    if !slab_axis(ray.origin.z, d.z, aabb.min.z, aabb.max.z, &mut t_low, &mut t_high) {
        return None;
    }
    // Box behind the origin, or the slabs never overlap
    if t_low > t_high || t_high < 0.0 {
        return None;
    }
    if !y_slab_overlaps(ray.origin.y, d.y, aabb.min.y, aabb.max.y, t_low, t_high) {
        return None;
    }
    Some((t_low, t_high))
}

/// Narrow `(t_low, t_high)` by one axis slab.
///
/// Returns false only when the ray is parallel to the slab and starts
/// outside it; in that case the range is left untouched.
fn slab_axis(
    origin: f64,
    direction: f64,
    min: f64,
    max: f64,
    t_low: &mut f64,
    t_high: &mut f64,
) -> bool {
    if direction.abs() < PARALLEL {
        return origin >= min && origin <= max;
    }
    let t1 = (min - origin) / direction;
    let t2 = (max - origin) / direction;
    let (t_near, t_far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
    *t_low = t_low.max(t_near);
    *t_high = t_high.min(t_far);
    true
}

/// Check whether the ray is inside the Y slab anywhere in `[t_low, t_high]`
/// without narrowing the range.
fn y_slab_overlaps(
    origin: f64,
    direction: f64,
    min: f64,
    max: f64,
    t_low: f64,
    t_high: f64,
) -> bool {
    if direction.abs() < PARALLEL {
        return origin >= min && origin <= max;
    }
    let t1 = (min - origin) / direction;
    let t2 = (max - origin) / direction;
    let (t_near, t_far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
    t_near <= t_high && t_far >= t_low.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terracast_math::{Point3, Vec3};

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_hit_from_outside() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let (t_low, t_high) = intersect_bounds(&ray, &unit_box()).unwrap();
        assert!((t_low - 5.0).abs() < 1e-10);
        assert!((t_high - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_origin_inside_brackets_zero() {
        // Origin strictly inside: the window must straddle t = 0
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.3));
        let (t_low, t_high) = intersect_bounds(&ray, &unit_box()).unwrap();
        assert!(t_low <= 0.0);
        assert!(t_high >= 0.0);
    }

    #[test]
    fn test_box_behind_origin() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(intersect_bounds(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_parallel_outside_slab() {
        // Parallel to the X slab, origin outside it
        let ray = Ray::new(Point3::new(2.0, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_bounds(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_y_slab_rejects_overpass() {
        // Crosses the XZ footprint but stays above the box the whole way
        let ray = Ray::new(Point3::new(-5.0, 2.0, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_bounds(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_y_slab_accepts_descending() {
        let ray = Ray::new(Point3::new(-1.0, 2.0, 0.5), Vec3::new(1.0, -1.0, 0.0));
        assert!(intersect_bounds(&ray, &unit_box()).is_some());
    }

    #[test]
    fn test_grazing_edge_is_hit() {
        // Tangent to the x = 0 face: the window degenerates to a point
        let ray = Ray::new(Point3::new(0.0, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let result = intersect_bounds(&ray, &unit_box());
        assert!(result.is_some());
    }

    #[test]
    fn test_diagonal_corner_graze() {
        // Touches the (1, y, 1) edge exactly
        let ray = Ray::new(Point3::new(2.0, 0.5, 0.0), Vec3::new(-1.0, 0.0, 1.0));
        let (t_low, t_high) = intersect_bounds(&ray, &unit_box()).unwrap();
        assert!((t_low - t_high).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_ray_unbounded_window() {
        // Both horizontal slabs are parallel-inside; the window is infinite
        // and the Y slab alone decides
        let ray = Ray::new(Point3::new(0.5, 5.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
        let (t_low, t_high) = intersect_bounds(&ray, &unit_box()).unwrap();
        assert!(t_low == f64::NEG_INFINITY);
        assert!(t_high == f64::INFINITY);

        let away = Ray::new(Point3::new(0.5, 5.0, 0.5), Vec3::new(0.0, 1.0, 0.0));
        assert!(intersect_bounds(&away, &unit_box()).is_none());
    }
}
