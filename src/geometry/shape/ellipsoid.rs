use std::sync::OnceLock;

use crate::math::scalar::{approx_eq, is_zero};
use crate::math::{Matrix3d, Vector3d};

use super::{unit_sphere_entry, Shape};
use crate::geometry::{Plane, Ray3d};

/// An ellipsoid: the unit sphere mapped through a 3×3 transform, then moved to `center`.
///
/// The transform's columns are the local axes scaled by the radii. Its
/// inverse and the inverse-transpose used for normals are computed on first
/// use and cached; concurrent readers may both compute them, but only a
/// complete value is ever observed.
#[derive(Debug, Clone)]
pub struct Ellipsoid {
    center: Vector3d,
    transform: Matrix3d,
    inverse_transform: OnceLock<Matrix3d>,
    inverse_normal_transform: OnceLock<Matrix3d>,
}

impl Ellipsoid {
    /// Creates an ellipsoid from its three semi-axes.
    #[must_use]
    pub fn new(center: Vector3d, x_axis: Vector3d, y_axis: Vector3d, z_axis: Vector3d) -> Self {
        Self::from_transform(center, Matrix3d::from_axes(&x_axis, &y_axis, &z_axis))
    }

    /// An axis-aligned ellipsoid with the given radii.
    #[must_use]
    pub fn from_radii(center: Vector3d, a: f64, b: f64, c: f64) -> Self {
        Self::from_transform(center, Matrix3d::from_scale(&Vector3d::new(a, b, c)))
    }

    /// Uses `transform` as the local-to-model map around `center`.
    ///
    /// A singular transform is accepted, but the result is flat: its inverse
    /// is the zero matrix, it contains no point and no ray hits it.
    #[must_use]
    pub fn from_transform(center: Vector3d, transform: Matrix3d) -> Self {
        Self {
            center,
            transform,
            inverse_transform: OnceLock::new(),
            inverse_normal_transform: OnceLock::new(),
        }
    }

    /// Whether the transform is singular, flattening the ellipsoid.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        is_zero(self.transform.determinant())
    }

    #[must_use]
    pub fn transform(&self) -> Matrix3d {
        self.transform
    }

    #[must_use]
    pub fn inverse_transform(&self) -> Matrix3d {
        *self.inverse_transform.get_or_init(|| self.transform.invert())
    }

    /// Transpose of the inverse transform; maps local normals to model space.
    #[must_use]
    pub fn inverse_normal_transform(&self) -> Matrix3d {
        *self
            .inverse_normal_transform
            .get_or_init(|| self.inverse_transform().transpose())
    }

    #[must_use]
    pub fn x_axis(&self) -> Vector3d {
        let m = &self.transform;
        Vector3d::new(m.m00, m.m10, m.m20)
    }

    #[must_use]
    pub fn y_axis(&self) -> Vector3d {
        let m = &self.transform;
        Vector3d::new(m.m01, m.m11, m.m21)
    }

    #[must_use]
    pub fn z_axis(&self) -> Vector3d {
        let m = &self.transform;
        Vector3d::new(m.m02, m.m12, m.m22)
    }

    #[must_use]
    pub fn local_to_model(&self, p: &Vector3d) -> Vector3d {
        self.transform.mult_vector(p) + self.center
    }

    #[must_use]
    pub fn model_to_local(&self, p: &Vector3d) -> Vector3d {
        self.inverse_transform().mult_vector(&(*p - self.center))
    }

    #[must_use]
    pub fn direction_to_local(&self, d: &Vector3d) -> Vector3d {
        self.inverse_transform().mult_vector(d)
    }

    #[must_use]
    pub fn direction_to_model(&self, d: &Vector3d) -> Vector3d {
        self.transform.mult_vector(d)
    }

    /// Maps a model-space normal into local space. Not renormalized.
    #[must_use]
    pub fn normal_to_local(&self, n: &Vector3d) -> Vector3d {
        self.transform.transpose().mult_vector(n)
    }

    /// Maps a local-space normal into model space. Not renormalized.
    #[must_use]
    pub fn normal_to_model(&self, n: &Vector3d) -> Vector3d {
        self.inverse_normal_transform().mult_vector(n)
    }

    /// The plane touching the surface where the normal at `point` leaves it.
    ///
    /// `point` is expected to lie on the surface.
    #[must_use]
    pub fn tangent_plane(&self, point: &Vector3d) -> Plane {
        Plane::new(*point, self.normal_at(point))
    }

    /// Whether the three axes have equal length and form a right-handed frame.
    ///
    /// Compares the scaled cross product of the first two axes against the
    /// third, so only reliable for axes built orthogonal.
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        let (x, y, z) = (self.x_axis(), self.y_axis(), self.z_axis());
        let r = x.length();
        approx_eq(r, y.length()) && approx_eq(r, z.length()) && x.cross(&y) / r == z
    }
}

impl Shape for Ellipsoid {
    fn center(&self) -> Vector3d {
        self.center
    }

    fn contains(&self, point: &Vector3d) -> bool {
        !self.is_degenerate() && self.model_to_local(point).length_squared() <= 1.0
    }

    /// Solved against the unit sphere in local space. Affine maps keep the
    /// ray parameter, so the hit is read back off the model-space ray.
    fn get_intersection(&self, ray: &Ray3d) -> Option<Vector3d> {
        if self.is_degenerate() {
            return None;
        }
        let origin = self.model_to_local(&ray.origin());
        let direction = self.direction_to_local(&ray.direction());
        unit_sphere_entry(&origin, &direction).map(|t| ray.point_at(t))
    }

    fn normal_at(&self, point: &Vector3d) -> Vector3d {
        self.normal_to_model(&self.model_to_local(point)).normalized()
    }
}

impl PartialEq for Ellipsoid {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center && self.transform == other.transform
    }
}
