use std::f64::consts::PI;

use crate::error::{GeometryError, Result};
use crate::math::scalar::{is_zero, DBL_EPSILON};
use crate::math::{Vector, Vector2d};

use crate::geometry::Ray2d;

/// A circle with a strictly positive radius, generic over the vector type.
///
/// Only distances are used, so any [`Vector`] works; for [`Vector3d`](crate::math::Vector3d)
/// this is a ball test rather than a planar circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle<V: Vector> {
    center: V,
    radius: f64,
}

impl<V: Vector> Circle<V> {
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if `radius` is zero,
    /// negative or NaN.
    pub fn new(center: V, radius: f64) -> Result<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius { radius }.into());
        }
        Ok(Self { center, radius })
    }

    #[must_use]
    pub fn center(&self) -> V {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    #[must_use]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Whether `point` is inside, or on the boundary within [`DBL_EPSILON`].
    #[must_use]
    pub fn contains(&self, point: &V) -> bool {
        self.center.distance(point) <= self.radius + DBL_EPSILON
    }

    /// Whether the circles overlap. Touching circles do not.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.center.distance(&other.center) < self.radius + other.radius
    }
}

impl Circle<Vector2d> {
    /// Where the line carrying `ray` enters the circle.
    ///
    /// Same conventions as [`Sphere`](super::Sphere): the nearer root is
    /// returned even behind the origin, and tangent rays miss. A ray with a
    /// zero direction has no line and misses.
    #[must_use]
    pub fn get_intersection(&self, ray: &Ray2d) -> Option<Vector2d> {
        if is_zero(ray.direction().length_squared()) {
            return None;
        }
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(&ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - 4.0 * c;
        if discriminant <= 0.0 {
            return None;
        }
        Some(ray.point_at((-b - discriminant.sqrt()) / 2.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Vector2i, Vector3d};
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vector2d {
        Vector2d::new(x, y)
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Circle::new(v(0.0, 0.0), 0.0).is_err());
        assert!(Circle::new(v(0.0, 0.0), -2.0).is_err());
    }

    #[test]
    fn measures() {
        let c = Circle::new(v(1.0, 1.0), 2.0).unwrap();
        assert_relative_eq!(c.area(), 4.0 * PI);
        assert_relative_eq!(c.circumference(), 4.0 * PI);
    }

    #[test]
    fn boundary_contained_touching_not_overlapping() {
        let a = Circle::new(v(0.0, 0.0), 1.0).unwrap();
        let b = Circle::new(v(2.0, 0.0), 1.0).unwrap();
        assert!(a.contains(&v(1.0, 0.0)));
        assert!(b.contains(&v(1.0, 0.0)));
        assert!(!a.contains(&v(1.1, 0.0)));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Circle::new(v(1.9, 0.0), 1.0).unwrap()));
    }

    #[test]
    fn generic_over_vector_types() {
        let grid = Circle::new(Vector2i::new(0, 0), 5.0).unwrap();
        assert!(grid.contains(&Vector2i::new(3, 4)));
        assert!(!grid.contains(&Vector2i::new(4, 4)));
        let ball = Circle::new(Vector3d::ORIGIN, 1.0).unwrap();
        assert!(ball.contains(&Vector3d::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn ray_entry() {
        let c = Circle::new(v(0.0, 0.0), 1.0).unwrap();
        let ray = Ray2d::new(v(-3.0, 0.0), v(1.0, 0.0));
        assert_eq!(c.get_intersection(&ray).unwrap(), v(-1.0, 0.0));
        let tangent = Ray2d::new(v(-3.0, 1.0), v(1.0, 0.0));
        assert!(c.get_intersection(&tangent).is_none());
    }

    #[test]
    fn zero_direction_ray_misses() {
        let c = Circle::new(v(0.0, 0.0), 1.0).unwrap();
        let stuck = Ray2d::new(v(0.2, 0.0), v(0.0, 0.0));
        assert!(c.get_intersection(&stuck).is_none());
    }
}
