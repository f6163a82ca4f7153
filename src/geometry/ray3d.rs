use crate::math::{Matrix4d, Vector3d};

use super::Plane;

/// A 3D ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3d {
    origin: Vector3d,
    direction: Vector3d,
}

impl Ray3d {
    /// Creates a ray; `direction` is normalized.
    #[must_use]
    pub fn new(origin: Vector3d, direction: Vector3d) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// The ray starting at `from` and heading through `to`.
    #[must_use]
    pub fn through(from: Vector3d, to: Vector3d) -> Self {
        Self::new(from, to - from)
    }

    #[must_use]
    pub fn origin(&self) -> Vector3d {
        self.origin
    }

    #[must_use]
    pub fn direction(&self) -> Vector3d {
        self.direction
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Vector3d {
        self.origin + self.direction * t
    }

    /// Closest point on the ray to `p`; clamps to the origin for points behind it.
    #[must_use]
    pub fn closest_point(&self, p: &Vector3d) -> Vector3d {
        let t = self.direction.dot(&(*p - self.origin)).max(0.0);
        self.point_at(t)
    }

    #[must_use]
    pub fn distance_to_point(&self, p: &Vector3d) -> f64 {
        self.closest_point(p).distance(p)
    }

    /// See [`Plane::get_intersection_ray`].
    #[must_use]
    pub fn get_intersection(&self, plane: &Plane) -> Option<Vector3d> {
        plane.get_intersection_ray(self)
    }

    /// Maps origin as a point and direction as a vector through `m`.
    #[must_use]
    pub fn transform(&self, m: &Matrix4d) -> Self {
        Self::new(m.mult_point(&self.origin), m.mult_direction(&self.direction))
    }
}
