use crate::error::{GeometryError, Result};
use crate::math::scalar::{is_zero, DBL_EPSILON};
use crate::math::{Matrix3d, Vector3d};

use super::Shape;
use crate::geometry::Ray3d;

/// A box, either axis-aligned or oriented by a 3×3 transform.
///
/// For an oriented box, the transform's columns are the box axes in model
/// space; its inverse is computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangularCylinder {
    center: Vector3d,
    half_extents: Vector3d,
    frame: Option<Frame>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    transform: Matrix3d,
    inverse: Matrix3d,
}

fn min_max(points: impl IntoIterator<Item = Vector3d>) -> Result<(Vector3d, Vector3d)> {
    let mut iter = points.into_iter();
    let first = iter.next().ok_or(GeometryError::Empty("points"))?;
    Ok(iter.fold((first, first), |(lo, hi), p| (lo.min(&p), hi.max(&p))))
}

impl RectangularCylinder {
    /// The axis-aligned box around `points`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] if `points` is empty.
    pub fn from_points(points: &[Vector3d]) -> Result<Self> {
        let (min, max) = min_max(points.iter().copied())?;
        Ok(Self {
            center: min.interpolate(&max, 0.5),
            half_extents: (max - min) * 0.5,
            frame: None,
        })
    }

    /// The box around `points` aligned with the columns of `transform`.
    ///
    /// Points are taken into the box frame before the min/max reduction.
    /// A singular `transform` has no box frame; the axis-aligned box from
    /// [`from_points`](Self::from_points) is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] if `points` is empty.
    pub fn from_points_oriented(points: &[Vector3d], transform: Matrix3d) -> Result<Self> {
        if is_zero(transform.determinant()) {
            tracing::debug!("singular box transform, falling back to an axis-aligned box");
            return Self::from_points(points);
        }
        let inverse = transform.invert();
        let (min, max) = min_max(points.iter().map(|p| inverse.mult_vector(p)))?;
        Ok(Self {
            center: transform.mult_vector(&min.interpolate(&max, 0.5)),
            half_extents: (max - min) * 0.5,
            frame: Some(Frame { transform, inverse }),
        })
    }

    /// Half the box size along each of its own axes.
    #[must_use]
    pub fn half_extents(&self) -> Vector3d {
        self.half_extents
    }

    /// The orienting transform, or `None` for an axis-aligned box.
    #[must_use]
    pub fn transform(&self) -> Option<Matrix3d> {
        self.frame.map(|f| f.transform)
    }

    fn offset_to_local(&self, v: &Vector3d) -> Vector3d {
        match &self.frame {
            Some(f) => f.inverse.mult_vector(v),
            None => *v,
        }
    }

    fn offset_to_model(&self, v: &Vector3d) -> Vector3d {
        match &self.frame {
            Some(f) => f.transform.mult_vector(v),
            None => *v,
        }
    }

    fn corner(&self, sx: f64, sy: f64, sz: f64) -> Vector3d {
        let h = self.half_extents;
        self.center + self.offset_to_model(&Vector3d::new(sx * h.x, sy * h.y, sz * h.z))
    }

    /// The four corners on the local `-z` face, counter-clockwise seen from `+z`.
    #[must_use]
    pub fn bottom_corners(&self) -> [Vector3d; 4] {
        [
            self.corner(-1.0, -1.0, -1.0),
            self.corner(1.0, -1.0, -1.0),
            self.corner(1.0, 1.0, -1.0),
            self.corner(-1.0, 1.0, -1.0),
        ]
    }

    /// Bottom corners followed by the matching top corners.
    #[must_use]
    pub fn corners(&self) -> [Vector3d; 8] {
        let bottom = self.bottom_corners();
        let rise = self.offset_to_model(&Vector3d::new(0.0, 0.0, 2.0 * self.half_extents.z));
        let top = bottom.map(|c| c + rise);
        [bottom[0], bottom[1], bottom[2], bottom[3], top[0], top[1], top[2], top[3]]
    }

    /// Extent of the box along the model-space `axis`.
    ///
    /// Only the bottom face is projected; the box is symmetric about its
    /// center, so the farthest bottom corner gives the half-span.
    #[must_use]
    pub fn get_span(&self, axis: &Vector3d) -> f64 {
        let axis = axis.normalized();
        let half = self
            .bottom_corners()
            .iter()
            .map(|c| (*c - self.center).dot(&axis).abs())
            .fold(0.0_f64, f64::max);
        2.0 * half
    }
}

impl Shape for RectangularCylinder {
    fn center(&self) -> Vector3d {
        self.center
    }

    fn contains(&self, point: &Vector3d) -> bool {
        let local = self.offset_to_local(&(*point - self.center));
        let h = self.half_extents;
        local.x.abs() <= h.x + DBL_EPSILON
            && local.y.abs() <= h.y + DBL_EPSILON
            && local.z.abs() <= h.z + DBL_EPSILON
    }

    /// Slab test in the box frame.
    fn get_intersection(&self, ray: &Ray3d) -> Option<Vector3d> {
        let origin = self.offset_to_local(&(ray.origin() - self.center)).to_array();
        let direction = self.offset_to_local(&ray.direction()).to_array();
        let half = self.half_extents.to_array();

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        for i in 0..3 {
            if is_zero(direction[i]) {
                if origin[i].abs() > half[i] {
                    return None;
                }
                continue;
            }
            let t0 = (-half[i] - origin[i]) / direction[i];
            let t1 = (half[i] - origin[i]) / direction[i];
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
            if t_near > t_far {
                return None;
            }
        }
        t_near.is_finite().then(|| ray.point_at(t_near))
    }

    /// Normal of the face whose slab `point` is deepest outside of (or nearest to).
    fn normal_at(&self, point: &Vector3d) -> Vector3d {
        let local = self.offset_to_local(&(*point - self.center)).to_array();
        let half = self.half_extents.to_array();
        let ratio = |i: usize| {
            if is_zero(half[i]) {
                f64::INFINITY
            } else {
                local[i].abs() / half[i]
            }
        };
        let axis = (0..3).max_by(|&a, &b| ratio(a).total_cmp(&ratio(b))).unwrap_or(2);
        let mut n = [0.0; 3];
        n[axis] = local[axis].signum();
        let n = Vector3d::new(n[0], n[1], n[2]);
        match &self.frame {
            Some(f) => f.inverse.transpose().mult_vector(&n).normalized(),
            None => n,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    fn p(x: f64, y: f64, z: f64) -> Vector3d {
        Vector3d::new(x, y, z)
    }

    /// Spans (0,0,0)..(4,2,2).
    fn aabb() -> RectangularCylinder {
        RectangularCylinder::from_points(&[p(0.0, 0.0, 0.0), p(4.0, 1.0, 2.0), p(1.0, 2.0, 1.0)]).unwrap()
    }

    /// 45 degrees about z.
    fn rotation() -> Matrix3d {
        Matrix3d::from_angle_axis(FRAC_PI_4, &Vector3d::UNIT_Z)
    }

    // ── Construction ──

    #[test]
    fn axis_aligned_bounds() {
        let b = aabb();
        assert_eq!(b.center(), p(2.0, 1.0, 1.0));
        assert_eq!(b.half_extents(), p(2.0, 1.0, 1.0));
        assert!(b.transform().is_none());
    }

    #[test]
    fn empty_points_fail() {
        let err = RectangularCylinder::from_points(&[]).unwrap_err();
        assert!(matches!(err, MathError::Geometry(GeometryError::Empty(_))));
        assert!(RectangularCylinder::from_points_oriented(&[], rotation()).is_err());
    }

    #[test]
    fn oriented_bounds_use_local_frame() {
        // a diamond in xy is a square in the rotated frame
        let s = std::f64::consts::SQRT_2;
        let pts = [p(s, 0.0, 0.0), p(0.0, s, 0.0), p(-s, 0.0, 1.0), p(0.0, -s, 1.0)];
        let b = RectangularCylinder::from_points_oriented(&pts, rotation()).unwrap();
        assert_eq!(b.center(), p(0.0, 0.0, 0.5));
        assert_eq!(b.half_extents(), p(1.0, 1.0, 0.5));
        for q in pts {
            assert!(b.contains(&q));
        }
        assert!(!b.contains(&p(1.0, 1.0, 0.5)));
    }

    #[test]
    fn singular_transform_falls_back_to_axis_aligned() {
        let pts = [p(10.0, 10.0, 10.0), p(12.0, 10.0, 10.0)];
        let flat = Matrix3d::from_scale(&p(1.0, 1.0, 0.0));
        let b = RectangularCylinder::from_points_oriented(&pts, flat).unwrap();
        assert!(b.transform().is_none());
        assert_eq!(b.center(), p(11.0, 10.0, 10.0));
        assert_eq!(b.half_extents(), p(1.0, 0.0, 0.0));
        assert!(b.contains(&p(10.5, 10.0, 10.0)));
        assert!(!b.contains(&p(-500.0, 7.0, 3.0)));
        assert!(RectangularCylinder::from_points_oriented(&[], flat).is_err());
    }

    // ── Corners and span ──

    #[test]
    fn corners_cover_both_faces() {
        let c = aabb().corners();
        assert_eq!(c[0], p(0.0, 0.0, 0.0));
        assert_eq!(c[2], p(4.0, 2.0, 0.0));
        assert_eq!(c[6], p(4.0, 2.0, 2.0));
        assert_eq!(c[7], p(0.0, 2.0, 2.0));
    }

    #[test]
    fn span_along_axes() {
        let b = aabb();
        assert_relative_eq!(b.get_span(&Vector3d::UNIT_X), 4.0);
        assert_relative_eq!(b.get_span(&p(0.0, 5.0, 0.0)), 2.0);
        assert_relative_eq!(b.get_span(&Vector3d::UNIT_Z), 2.0);
    }

    #[test]
    fn span_of_rotated_box() {
        let unit = [p(-0.5, -0.5, -0.5), p(0.5, 0.5, 0.5)];
        let pts = unit.map(|q| rotation().mult_vector(&q));
        let b = RectangularCylinder::from_points_oriented(&pts, rotation()).unwrap();
        assert_relative_eq!(b.get_span(&Vector3d::UNIT_X), std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    // ── Ray intersection ──

    #[test]
    fn ray_enters_near_face() {
        let ray = Ray3d::new(p(-5.0, 1.0, 1.0), Vector3d::UNIT_X);
        assert_eq!(aabb().get_intersection(&ray).unwrap(), p(0.0, 1.0, 1.0));
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        let ray = Ray3d::new(p(-5.0, 3.0, 1.0), Vector3d::UNIT_X);
        assert!(aabb().get_intersection(&ray).is_none());
    }

    #[test]
    fn diagonal_ray_misses_corner() {
        let ray = Ray3d::new(p(-1.0, 3.0, 1.0), p(1.0, 1.0, 0.0));
        assert!(aabb().get_intersection(&ray).is_none());
    }

    #[test]
    fn oriented_box_hit() {
        let pts = [p(-1.0, -1.0, -1.0), p(1.0, 1.0, 1.0)].map(|q| rotation().mult_vector(&q));
        let b = RectangularCylinder::from_points_oriented(&pts, rotation()).unwrap();
        let ray = Ray3d::new(p(-5.0, 0.0, 0.0), Vector3d::UNIT_X);
        let hit = b.get_intersection(&ray).unwrap();
        assert_relative_eq!(hit.x, -std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    // ── Normals ──

    #[test]
    fn face_normals() {
        let b = aabb();
        assert_eq!(b.normal_at(&p(4.0, 1.0, 1.0)), Vector3d::UNIT_X);
        assert_eq!(b.normal_at(&p(2.0, 1.0, 0.0)), -Vector3d::UNIT_Z);
    }
}
