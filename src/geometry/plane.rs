use crate::error::{GeometryError, Result};
use crate::math::scalar::is_zero;
use crate::math::Vector3d;

use super::{classify_segment, Ray3d, SegmentIntersection, Side};

/// An infinite plane through `point` with unit `normal`.
///
/// Signed distances are positive on the side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vector3d,
    normal: Vector3d,
}

impl Plane {
    /// Creates a plane; `normal` is normalized.
    ///
    /// A zero normal is kept as-is, which puts every point on the plane.
    #[must_use]
    pub fn new(point: Vector3d, normal: Vector3d) -> Self {
        Self {
            point,
            normal: normal.normalized(),
        }
    }

    /// The plane through three points, normal along `(b - a) × (c - a)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the points are collinear.
    pub fn from_points(a: &Vector3d, b: &Vector3d, c: &Vector3d) -> Result<Self> {
        let normal = (*b - *a).cross(&(*c - *a));
        if is_zero(normal.length_squared()) {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self::new(*a, normal))
    }

    #[must_use]
    pub fn point(&self) -> Vector3d {
        self.point
    }

    #[must_use]
    pub fn normal(&self) -> Vector3d {
        self.normal
    }

    #[must_use]
    pub fn signed_distance(&self, p: &Vector3d) -> f64 {
        self.normal.dot(&(*p - self.point))
    }

    #[must_use]
    pub fn distance(&self, p: &Vector3d) -> f64 {
        self.signed_distance(p).abs()
    }

    #[must_use]
    pub fn side(&self, p: &Vector3d) -> Side {
        Side::of(self.signed_distance(p))
    }

    /// Whether any part of the sphere at `center` with `radius` lies in front.
    #[must_use]
    pub fn is_in_front(&self, center: &Vector3d, radius: f64) -> bool {
        self.signed_distance(center) > -radius
    }

    #[must_use]
    pub fn project_point(&self, p: &Vector3d) -> Vector3d {
        *p - self.normal * self.signed_distance(p)
    }

    /// Where the line carrying `ray` meets this plane.
    ///
    /// The parameter is not sign-checked, so a plane behind the ray origin
    /// still yields a point. Returns `None` only when the ray is parallel.
    #[must_use]
    pub fn get_intersection_ray(&self, ray: &Ray3d) -> Option<Vector3d> {
        let denom = self.normal.dot(&ray.direction());
        if is_zero(denom) {
            return None;
        }
        let t = self.normal.dot(&(self.point - ray.origin())) / denom;
        Some(ray.point_at(t))
    }

    /// Classifies the segment `begin..end` against this plane.
    #[must_use]
    pub fn segment_intersection(&self, begin: &Vector3d, end: &Vector3d) -> SegmentIntersection<Vector3d> {
        classify_segment(
            *begin,
            *end,
            self.signed_distance(begin),
            self.signed_distance(end),
            |t| begin.interpolate(end, t),
        )
    }

    /// First shared point of the segment and the plane.
    ///
    /// For a segment lying in the plane this is `begin`.
    #[must_use]
    pub fn get_intersection(&self, begin: &Vector3d, end: &Vector3d) -> Option<Vector3d> {
        self.segment_intersection(begin, end).first_point()
    }

    #[must_use]
    pub fn has_intersection(&self, begin: &Vector3d, end: &Vector3d) -> bool {
        !self.segment_intersection(begin, end).is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Vector3d {
        Vector3d::new(x, y, z)
    }

    fn xy_plane() -> Plane {
        Plane::new(Vector3d::ORIGIN, Vector3d::UNIT_Z)
    }

    // ── Construction ──

    #[test]
    fn normal_is_normalized() {
        let plane = Plane::new(Vector3d::ORIGIN, p(0.0, 0.0, 7.0));
        assert_eq!(plane.normal(), Vector3d::UNIT_Z);
    }

    #[test]
    fn from_points_follows_winding() {
        let plane = Plane::from_points(&p(0.0, 0.0, 1.0), &p(1.0, 0.0, 1.0), &p(0.0, 1.0, 1.0)).unwrap();
        assert_eq!(plane.normal(), Vector3d::UNIT_Z);
        assert_relative_eq!(plane.signed_distance(&Vector3d::ORIGIN), -1.0);
    }

    #[test]
    fn from_collinear_points_fails() {
        let err = Plane::from_points(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(2.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, MathError::Geometry(GeometryError::ZeroVector)));
    }

    // ── Classification ──

    #[test]
    fn side_and_distance() {
        let plane = xy_plane();
        assert_eq!(plane.side(&p(1.0, 1.0, 2.0)), Side::Front);
        assert_eq!(plane.side(&p(1.0, 1.0, -2.0)), Side::Back);
        assert_eq!(plane.side(&p(1.0, 1.0, 0.0)), Side::On);
        assert_relative_eq!(plane.distance(&p(0.0, 0.0, -3.0)), 3.0);
        assert_eq!(plane.project_point(&p(4.0, 5.0, 6.0)), p(4.0, 5.0, 0.0));
    }

    #[test]
    fn sphere_in_front() {
        let plane = xy_plane();
        assert!(plane.is_in_front(&p(0.0, 0.0, -0.5), 1.0));
        assert!(!plane.is_in_front(&p(0.0, 0.0, -2.0), 1.0));
    }

    // ── Ray intersection ──

    #[test]
    fn ray_hit() {
        let ray = Ray3d::new(p(1.0, 2.0, 5.0), p(0.0, 0.0, -1.0));
        assert_eq!(xy_plane().get_intersection_ray(&ray).unwrap(), p(1.0, 2.0, 0.0));
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray3d::new(p(0.0, 0.0, 1.0), Vector3d::UNIT_X);
        assert!(xy_plane().get_intersection_ray(&ray).is_none());
    }

    // ── Segment intersection ──

    #[test]
    fn segment_through_plane() {
        let hit = xy_plane().get_intersection(&p(0.0, 0.0, -1.0), &p(0.0, 0.0, 1.0));
        assert_eq!(hit.unwrap(), Vector3d::ORIGIN);
    }

    #[test]
    fn oblique_crossing() {
        let hit = xy_plane().get_intersection(&p(0.0, 0.0, -1.0), &p(4.0, 0.0, 3.0));
        assert_eq!(hit.unwrap(), p(1.0, 0.0, 0.0));
    }

    #[test]
    fn segment_in_plane_is_coincident() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(3.0, 1.0, 0.0);
        assert_eq!(xy_plane().segment_intersection(&a, &b), SegmentIntersection::Coincident(a, b));
        assert_eq!(xy_plane().get_intersection(&a, &b).unwrap(), a);
    }

    #[test]
    fn segment_touching_plane() {
        let hit = xy_plane().segment_intersection(&p(0.0, 0.0, 2.0), &p(1.0, 1.0, 0.0));
        assert_eq!(hit, SegmentIntersection::Point(p(1.0, 1.0, 0.0)));
    }

    #[test]
    fn segment_above_plane() {
        assert!(!xy_plane().has_intersection(&p(0.0, 0.0, 1.0), &p(1.0, 0.0, 2.0)));
    }
}
