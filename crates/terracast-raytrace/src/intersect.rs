//! Exact ray-triangle intersection.

use terracast_math::{Dir3, Point3};

use crate::Ray;

/// Determinant threshold below which the ray counts as parallel to the
/// triangle plane.
const DET_EPSILON: f64 = 1e-12;

/// A triangle in 3D space.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,
    /// Second vertex.
    pub b: Point3,
    /// Third vertex.
    pub c: Point3,
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }
}

/// Result of a ray-triangle intersection.
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Parameter along the ray, in units of the direction's length.
    pub t: f64,
    /// Unit normal of the triangle, flipped to face the ray origin.
    pub normal: Dir3,
}

/// Intersect a ray with a triangle (Moller-Trumbore).
///
/// Solves `origin + t * direction = (1-u-v) * a + u * b + v * c` and
/// accepts the hit iff `t >= 0`, `u >= 0`, `v >= 0`, `u + v <= 1`, with
/// inclusive boundaries so shared cell edges belong to both triangles.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<TriangleHit> {
    let e1 = triangle.b - triangle.a;
    let e2 = triangle.c - triangle.a;

    let p = ray.direction.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() < DET_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - triangle.a;
    let u = s.dot(&p) * inv_det;
    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = s.cross(&e1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(&q) * inv_det;
    if t < 0.0 {
        return None;
    }

    let mut normal = e1.cross(&e2);
    if normal.dot(&ray.direction) > 0.0 {
        normal = -normal;
    }
    Some(TriangleHit {
        t,
        normal: Dir3::new_normalize(normal),
    })
}
