//! Ray representation and hit record.

use terracast_math::{Dir3, Point3, Vec3};

/// A ray in 3D space defined by origin and direction.
///
/// The direction is kept exactly as given, not normalized: the hit
/// parameter `t` is in units of the direction's length. A zero-length or
/// non-finite direction makes every query report "no hit" instead of
/// dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray; need not be unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// True if the ray cannot parameterize a line: zero-length or
    /// non-finite direction, or a non-finite origin.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let finite = self.origin.coords.iter().all(|c| c.is_finite())
            && self.direction.iter().all(|c| c.is_finite());
        !finite || self.direction.norm_squared() == 0.0
    }
}

/// Result of a ray-heightfield intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Parameter along the ray where the hit occurs.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Unit surface normal, oriented to face the ray origin.
    pub normal: Dir3,
}

impl RayHit {
    /// Create a new ray hit.
    pub fn new(t: f64, point: Point3, normal: Dir3) -> Self {
        Self { t, point, normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 2.0));
        let p = ray.at(1.5);
        assert!((p - Point3::new(1.0, 2.0, 6.0)).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_directions() {
        let origin = Point3::origin();
        assert!(Ray::new(origin, Vec3::zeros()).is_degenerate());
        assert!(Ray::new(origin, Vec3::new(f64::NAN, 1.0, 0.0)).is_degenerate());
        assert!(Ray::new(origin, Vec3::new(0.0, f64::INFINITY, 0.0)).is_degenerate());
        assert!(Ray::new(
            Point3::new(f64::NAN, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0)
        )
        .is_degenerate());
        assert!(!Ray::new(origin, Vec3::new(0.0, -1.0, 0.0)).is_degenerate());
    }
}
