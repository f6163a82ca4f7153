use std::fmt;
use std::ops::{Add, Mul};

use crate::error::{GeometryError, Result};

use super::matrix::check_index;
use super::matrix3d::Matrix3d;
use super::scalar::{approx_eq, clamp, is_zero, DBL_LARGE_EPSILON, HALF_PI};
use super::vector3d::Vector3d;

/// A rotation quaternion `(x, y, z, w)`.
///
/// Operations assume unit norm but do not enforce it; matrix conversion
/// scales by the actual norm. Unlike vectors, quaternions are mutable in
/// place through the `*_local` methods and are single-writer values.
#[derive(Debug, Clone, Copy)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) {
        *self = Self::new(x, y, z, w);
    }

    pub fn load_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Rotation of `angle` radians about `axis` (normalized internally).
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: &Vector3d) -> Self {
        Self::from_angle_normal_axis(angle, &axis.normalized())
    }

    /// Rotation of `angle` radians about a unit `axis`.
    ///
    /// A zero axis yields the identity.
    #[must_use]
    pub fn from_angle_normal_axis(angle: f64, axis: &Vector3d) -> Self {
        if is_zero(axis.length_squared()) {
            return Self::IDENTITY;
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Builds a rotation from Euler angles in radians.
    ///
    /// Composed as `yaw * roll * pitch`: yaw about Y, roll about Z, pitch
    /// about X, so a rotated vector is pitched first and yawed last. The
    /// arguments are listed in X, Y, Z order.
    #[must_use]
    pub fn from_angles(x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        let (sin_z, cos_z) = (z_angle * 0.5).sin_cos();
        let (sin_y, cos_y) = (y_angle * 0.5).sin_cos();
        let (sin_x, cos_x) = (x_angle * 0.5).sin_cos();

        let cos_y_cos_z = cos_y * cos_z;
        let sin_y_sin_z = sin_y * sin_z;
        let cos_y_sin_z = cos_y * sin_z;
        let sin_y_cos_z = sin_y * cos_z;

        let mut q = Self::new(
            cos_y_cos_z * sin_x + sin_y_sin_z * cos_x,
            sin_y_cos_z * cos_x + cos_y_sin_z * sin_x,
            cos_y_sin_z * cos_x - sin_y_cos_z * sin_x,
            cos_y_cos_z * cos_x - sin_y_sin_z * sin_x,
        );
        q.normalize_local();
        q
    }

    /// Slice form of [`from_angles`](Self::from_angles).
    ///
    /// # Errors
    ///
    /// Returns an error if `angles` does not have exactly three elements.
    pub fn from_angles_slice(angles: &[f64]) -> Result<Self> {
        match angles {
            [x, y, z] => Ok(Self::from_angles(*x, *y, *z)),
            _ => Err(GeometryError::WrongLength {
                what: "Euler angle array",
                expected: 3,
                actual: angles.len(),
            }
            .into()),
        }
    }

    /// Euler angles `[x (pitch), y (yaw), z (roll)]` in radians, the inverse
    /// of [`from_angles`](Self::from_angles).
    ///
    /// Near the poles (`z` of plus or minus 90 degrees) the yaw and pitch
    /// are not independent; all rotation is then reported as yaw.
    #[must_use]
    pub fn to_angles(&self) -> [f64; 3] {
        let sqw = self.w * self.w;
        let sqx = self.x * self.x;
        let sqy = self.y * self.y;
        let sqz = self.z * self.z;
        // one for a unit quaternion, otherwise a correction factor
        let unit = sqx + sqy + sqz + sqw;
        let test = self.x * self.y + self.z * self.w;

        if test > 0.499 * unit {
            [0.0, 2.0 * self.x.atan2(self.w), HALF_PI]
        } else if test < -0.499 * unit {
            [0.0, -2.0 * self.x.atan2(self.w), -HALF_PI]
        } else {
            [
                (2.0 * self.x * self.w - 2.0 * self.y * self.z).atan2(-sqx + sqy - sqz + sqw),
                (2.0 * self.y * self.w - 2.0 * self.x * self.z).atan2(sqx - sqy - sqz + sqw),
                clamp(2.0 * test / unit, -1.0, 1.0).asin(),
            ]
        }
    }

    /// Rotation whose local axes are the given orthonormal vectors.
    #[must_use]
    pub fn from_axes(x_axis: &Vector3d, y_axis: &Vector3d, z_axis: &Vector3d) -> Self {
        Matrix3d::from_axes(x_axis, y_axis, z_axis).to_quaternion()
    }

    /// Slice form of [`from_axes`](Self::from_axes).
    ///
    /// # Errors
    ///
    /// Returns an error if `axes` does not have exactly three elements.
    pub fn from_axes_slice(axes: &[Vector3d]) -> Result<Self> {
        match axes {
            [x, y, z] => Ok(Self::from_axes(x, y, z)),
            _ => Err(GeometryError::WrongLength {
                what: "axis array",
                expected: 3,
                actual: axes.len(),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn from_rotation_matrix(matrix: &Matrix3d) -> Self {
        matrix.to_quaternion()
    }

    /// Rotation matrix for this quaternion, scaled to account for a
    /// non-unit norm. A zero quaternion yields the identity.
    #[must_use]
    pub fn to_rotation_matrix(&self) -> Matrix3d {
        let norm = self.norm();
        let s = if approx_eq(norm, 1.0) {
            2.0
        } else if norm > 0.0 {
            2.0 / norm
        } else {
            0.0
        };

        let xs = self.x * s;
        let ys = self.y * s;
        let zs = self.z * s;
        let xx = self.x * xs;
        let xy = self.x * ys;
        let xz = self.x * zs;
        let xw = self.w * xs;
        let yy = self.y * ys;
        let yz = self.y * zs;
        let yw = self.w * ys;
        let zz = self.z * zs;
        let zw = self.w * zs;

        Matrix3d::new(
            1.0 - (yy + zz),
            xy - zw,
            xz + yw,
            xy + zw,
            1.0 - (xx + zz),
            yz - xw,
            xz - yw,
            yz + xw,
            1.0 - (xx + yy),
        )
    }

    /// Column `index` of the rotation matrix, i.e. the rotated local axis.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than 2.
    pub fn rotation_column(&self, index: usize) -> Result<Vector3d> {
        check_index(0, index, 3)?;
        self.to_rotation_matrix().column(index)
    }

    /// Angle (radians) and unit axis of this rotation.
    ///
    /// The identity reports angle zero about +X.
    #[must_use]
    pub fn to_angle_axis(&self) -> (f64, Vector3d) {
        let sqr_length = self.x * self.x + self.y * self.y + self.z * self.z;
        if is_zero(sqr_length) {
            return (0.0, Vector3d::UNIT_X);
        }
        let angle = 2.0 * clamp(self.w, -1.0, 1.0).acos();
        let inv_length = 1.0 / sqr_length.sqrt();
        (
            angle,
            Vector3d::new(self.x * inv_length, self.y * inv_length, self.z * inv_length),
        )
    }

    /// Spherical linear interpolation from `start` to `end`.
    ///
    /// Takes the shorter arc, and falls back to linear interpolation of the
    /// components when the endpoints are nearly identical.
    #[must_use]
    pub fn slerp(start: &Self, end: &Self, t: f64) -> Self {
        if start == end {
            return *start;
        }

        let mut end = *end;
        let mut dot = start.dot(&end);
        if dot < 0.0 {
            end = end.negated();
            dot = -dot;
        }

        let (scale0, scale1) = if 1.0 - dot > DBL_LARGE_EPSILON {
            let theta = dot.acos();
            let inv_sin_theta = 1.0 / theta.sin();
            (
                ((1.0 - t) * theta).sin() * inv_sin_theta,
                (t * theta).sin() * inv_sin_theta,
            )
        } else {
            (1.0 - t, t)
        };

        Self::new(
            scale0 * start.x + scale1 * end.x,
            scale0 * start.y + scale1 * end.y,
            scale0 * start.z + scale1 * end.z,
            scale0 * start.w + scale1 * end.w,
        )
    }

    /// In-place `self = slerp(self, end, t)`.
    pub fn slerp_local(&mut self, end: &Self, t: f64) {
        *self = Self::slerp(self, end, t);
    }

    /// Normalized linear interpolation; cheaper than [`slerp`](Self::slerp)
    /// but not constant-speed.
    #[must_use]
    pub fn nlerp(&self, end: &Self, t: f64) -> Self {
        let end = if self.dot(end) < 0.0 { end.negated() } else { *end };
        let mut q = self.scale(1.0 - t) + end.scale(t);
        q.normalize_local();
        q
    }

    /// Hamilton product `self * other`.
    ///
    /// As a rotation, the result applies `other` first and then `self`.
    #[must_use]
    pub fn mult(&self, other: &Self) -> Self {
        Self::new(
            self.x * other.w + self.y * other.z - self.z * other.y + self.w * other.x,
            -self.x * other.z + self.y * other.w + self.z * other.x + self.w * other.y,
            self.x * other.y - self.y * other.x + self.z * other.w + self.w * other.z,
            -self.x * other.x - self.y * other.y - self.z * other.z + self.w * other.w,
        )
    }

    /// In-place `self = self * other`.
    pub fn mult_local(&mut self, other: &Self) {
        *self = self.mult(other);
    }

    /// Rotates `v` by this quaternion.
    #[must_use]
    pub fn mult_vector(&self, v: &Vector3d) -> Vector3d {
        let Self { x, y, z, w } = *self;
        Vector3d::new(
            w * w * v.x + 2.0 * y * w * v.z - 2.0 * z * w * v.y + x * x * v.x
                + 2.0 * y * x * v.y
                + 2.0 * z * x * v.z
                - z * z * v.x
                - y * y * v.x,
            2.0 * x * y * v.x + y * y * v.y + 2.0 * z * y * v.z + 2.0 * w * z * v.x - z * z * v.y
                + w * w * v.y
                - 2.0 * x * w * v.z
                - x * x * v.y,
            2.0 * x * z * v.x + 2.0 * y * z * v.y + z * z * v.z - 2.0 * w * y * v.x - y * y * v.z
                + 2.0 * w * x * v.y
                - x * x * v.z
                + w * w * v.z,
        )
    }

    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared magnitude.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.dot(self)
    }

    /// Scales to unit norm; a zero quaternion is left unchanged.
    pub fn normalize_local(&mut self) {
        let n = self.norm();
        if is_zero(n) {
            return;
        }
        *self = self.scale(1.0 / n.sqrt());
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize_local();
        q
    }

    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, or `None` for the zero quaternion.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let n = self.norm();
        if n > 0.0 {
            Some(self.conjugate().scale(1.0 / n))
        } else {
            None
        }
    }

    /// All four components negated; the same rotation as `self`.
    #[must_use]
    pub fn negated(&self) -> Self {
        self.scale(-1.0)
    }

    pub fn negate_local(&mut self) {
        *self = self.negated();
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.z, other.z)
            && approx_eq(self.w, other.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vector3d> for Quaternion {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        self.mult_vector(&rhs)
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}
