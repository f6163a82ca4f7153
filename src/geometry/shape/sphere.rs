use crate::error::{GeometryError, Result};
use crate::math::scalar::is_zero;
use crate::math::Vector3d;

use super::{unit_sphere_entry, Shape};
use crate::geometry::{Plane, Ray3d};

/// A sphere with a strictly positive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vector3d,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if `radius` is zero,
    /// negative or NaN.
    pub fn new(center: Vector3d, radius: f64) -> Result<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius { radius }.into());
        }
        Ok(Self { center, radius })
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether the two spheres overlap. Touching spheres do not.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.center.distance(&other.center) < self.radius + other.radius
    }

    /// The plane touching the sphere at the surface point nearest `point`.
    #[must_use]
    pub fn tangent_plane(&self, point: &Vector3d) -> Plane {
        let normal = self.normal_at(point);
        Plane::new(self.center + normal * self.radius, normal)
    }

    /// Smallest sphere enclosing the triangle `a`, `b`, `c`.
    ///
    /// For acute triangles this is the circumsphere. For obtuse and
    /// collinear inputs it is the sphere over the longest edge.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if all three points coincide.
    pub fn gen_minimum_bounding_sphere(a: &Vector3d, b: &Vector3d, c: &Vector3d) -> Result<Self> {
        let ab = *b - *a;
        let ac = *c - *a;
        let ab_ab = ab.dot(&ab);
        let ab_ac = ab.dot(&ac);
        let ac_ac = ac.dot(&ac);
        let d = 2.0 * (ab_ab * ac_ac - ab_ac * ab_ac);

        if is_zero(d) {
            tracing::trace!("collinear triangle, bounding the longest edge");
            let edges = [(a, b), (a, c), (b, c)];
            let (p, q) = edges
                .into_iter()
                .max_by(|x, y| x.0.distance_squared(x.1).total_cmp(&y.0.distance_squared(y.1)))
                .unwrap_or((a, b));
            return Self::over_edge(p, q);
        }

        // circumcenter = a + s * ab + t * ac
        let s = (ab_ab * ac_ac - ac_ac * ab_ac) / d;
        let t = (ac_ac * ab_ab - ab_ab * ab_ac) / d;
        if s <= 0.0 {
            Self::over_edge(a, c)
        } else if t <= 0.0 {
            Self::over_edge(a, b)
        } else if s + t >= 1.0 {
            Self::over_edge(b, c)
        } else {
            let center = *a + ab * s + ac * t;
            Self::new(center, center.distance(a))
        }
    }

    fn over_edge(p: &Vector3d, q: &Vector3d) -> Result<Self> {
        Self::new(p.interpolate(q, 0.5), p.distance(q) * 0.5)
    }

    /// A sphere enclosing every point, centered on their bounding box.
    ///
    /// Not minimal in general.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] for no points, and
    /// [`GeometryError::NonPositiveRadius`] when all points coincide.
    pub fn bounding_points(points: &[Vector3d]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(GeometryError::Empty("points"))?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        let center = min.interpolate(&max, 0.5);
        let radius = points
            .iter()
            .map(|p| center.distance(p))
            .fold(0.0_f64, f64::max);
        Self::new(center, radius)
    }
}

impl Shape for Sphere {
    fn center(&self) -> Vector3d {
        self.center
    }

    /// Boundary inclusive.
    fn contains(&self, point: &Vector3d) -> bool {
        self.center.distance(point) <= self.radius
    }

    fn get_intersection(&self, ray: &Ray3d) -> Option<Vector3d> {
        let origin = (ray.origin() - self.center) / self.radius;
        let direction = ray.direction() / self.radius;
        unit_sphere_entry(&origin, &direction).map(|t| ray.point_at(t))
    }

    fn normal_at(&self, point: &Vector3d) -> Vector3d {
        (*point - self.center).normalized()
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

    fn unit() -> Sphere {
        Sphere::new(Vector3d::ORIGIN, 1.0).unwrap()
    }

    // ── Construction ──

    #[test]
    fn rejects_non_positive_radius() {
        for r in [0.0, -1.0, f64::NAN] {
            let err = Sphere::new(Vector3d::ORIGIN, r).unwrap_err();
            assert!(matches!(err, MathError::Geometry(GeometryError::NonPositiveRadius { .. })));
        }
    }

    // ── Containment ──

    #[test]
    fn boundary_is_contained() {
        let s = Sphere::new(p(1.0, 1.0, 1.0), 2.0).unwrap();
        assert!(s.contains(&p(3.0, 1.0, 1.0)));
        assert!(!s.contains(&p(3.0 + 1e-9, 1.0, 1.0)));
    }

    #[test]
    fn touching_spheres_do_not_overlap() {
        let a = unit();
        let b = Sphere::new(p(2.0, 0.0, 0.0), 1.0).unwrap();
        let c = Sphere::new(p(1.5, 0.0, 0.0), 1.0).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    // ── Ray intersection ──

    #[test]
    fn ray_hits_near_side() {
        let ray = Ray3d::new(p(0.0, 0.0, 5.0), p(0.0, 0.0, -1.0));
        let hit = unit().get_intersection(&ray).unwrap();
        assert_relative_eq!(hit.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_from_inside_returns_entry_behind_origin() {
        let ray = Ray3d::new(Vector3d::ORIGIN, Vector3d::UNIT_X);
        assert_eq!(unit().get_intersection(&ray).unwrap(), p(-1.0, 0.0, 0.0));
    }

    #[test]
    fn tangent_ray_misses() {
        let ray = Ray3d::new(p(-5.0, 1.0, 0.0), Vector3d::UNIT_X);
        assert!(unit().get_intersection(&ray).is_none());
        let ray = Ray3d::new(p(-5.0, 3.0, 0.0), Vector3d::UNIT_X);
        assert!(unit().get_intersection(&ray).is_none());
    }

    #[test]
    fn normal_and_tangent_plane() {
        let s = Sphere::new(p(0.0, 0.0, 1.0), 2.0).unwrap();
        assert_eq!(s.normal_at(&p(0.0, 0.0, 7.0)), Vector3d::UNIT_Z);
        let plane = s.tangent_plane(&p(0.0, 0.0, 7.0));
        assert_eq!(plane.point(), p(0.0, 0.0, 3.0));
        assert_eq!(plane.normal(), Vector3d::UNIT_Z);
    }

    // ── Bounding spheres ──

    #[test]
    fn collinear_triangle_uses_longest_edge() {
        let s = Sphere::gen_minimum_bounding_sphere(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(s.center(), p(1.0, 0.0, 0.0));
        assert_relative_eq!(s.radius(), 1.0);
    }

    #[test]
    fn acute_triangle_uses_circumsphere() {
        let a = p(-1.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.5, 0.0);
        let s = Sphere::gen_minimum_bounding_sphere(&a, &b, &c).unwrap();
        // circumcenter (0, 5/12), radius 13/12
        assert_eq!(s.center(), p(0.0, 5.0 / 12.0, 0.0));
        assert_relative_eq!(s.radius(), 13.0 / 12.0, epsilon = 1e-12);
        for q in [a, b, c] {
            assert_relative_eq!(s.center().distance(&q), s.radius(), epsilon = 1e-12);
        }
    }

    #[test]
    fn obtuse_at_c_uses_edge_ab() {
        let s = Sphere::gen_minimum_bounding_sphere(&p(0.0, 0.0, 0.0), &p(4.0, 0.0, 0.0), &p(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(s.center(), p(2.0, 0.0, 0.0));
        assert_relative_eq!(s.radius(), 2.0);
    }

    #[test]
    fn obtuse_at_b_uses_edge_ac() {
        let s = Sphere::gen_minimum_bounding_sphere(&p(0.0, 0.0, 0.0), &p(1.0, 0.5, 0.0), &p(4.0, 0.0, 0.0)).unwrap();
        assert_eq!(s.center(), p(2.0, 0.0, 0.0));
        assert_relative_eq!(s.radius(), 2.0);
    }

    #[test]
    fn obtuse_at_a_uses_edge_bc() {
        let s = Sphere::gen_minimum_bounding_sphere(&p(1.0, 0.5, 0.0), &p(0.0, 0.0, 0.0), &p(4.0, 0.0, 0.0)).unwrap();
        assert_eq!(s.center(), p(2.0, 0.0, 0.0));
        assert_relative_eq!(s.radius(), 2.0);
    }

    #[test]
    fn coincident_points_fail() {
        let q = p(1.0, 1.0, 1.0);
        assert!(Sphere::gen_minimum_bounding_sphere(&q, &q, &q).is_err());
    }

    #[test]
    fn bounding_points_encloses_all() {
        let pts = [p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(1.0, 3.0, 0.0), p(1.0, 1.0, -1.0)];
        let s = Sphere::bounding_points(&pts).unwrap();
        assert_eq!(s.center(), p(1.0, 1.5, -0.5));
        assert!(pts.iter().all(|q| s.contains(q)));
        assert!(matches!(
            Sphere::bounding_points(&[]).unwrap_err(),
            MathError::Geometry(GeometryError::Empty(_))
        ));
    }
}
