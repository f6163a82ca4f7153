use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};

use crate::error::{GeometryError, Result};

use super::quaternion::Quaternion;
use super::scalar::{approx_eq, clamp, is_zero};
use super::vector::Vector;
use super::vector2d::Vector2d;

/// An immutable 3D vector of `f64` components.
///
/// Components may be NaN after degenerate arithmetic; use
/// [`is_finite`](Self::is_finite) before relying on the result.
/// Equality is tolerance-based.
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a vector from a three-element slice.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::WrongLength`] if `values` does not have three elements.
    pub fn from_array(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(GeometryError::WrongLength {
                what: "Vector3d array",
                expected: 3,
                actual: values.len(),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Drops the Z component.
    #[must_use]
    pub fn xy(&self) -> Vector2d {
        Vector2d::new(self.x, self.y)
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Returns a unit-length copy of this vector.
    ///
    /// If the length is already one, or is zero, `self` is returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if is_zero(len - 1.0) || is_zero(len) {
            *self
        } else {
            *self / len
        }
    }

    /// Linear interpolation towards `other`; `fraction` is not clamped.
    #[must_use]
    pub fn interpolate(&self, other: &Self, fraction: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * fraction,
            self.y + (other.y - self.y) * fraction,
            self.z + (other.z - self.z) * fraction,
        )
    }

    /// Unsigned angle between two vectors of any length, in `[0, pi]`.
    ///
    /// Returns zero if either vector has zero length.
    #[must_use]
    pub fn angle_difference(&self, other: &Self) -> f64 {
        let denom = self.length() * other.length();
        if is_zero(denom) {
            return 0.0;
        }
        clamp(self.dot(other) / denom, -1.0, 1.0).acos()
    }

    /// Unsigned angle between two unit vectors, in `[0, pi]`.
    ///
    /// Both vectors must already be normalized; the result is wrong
    /// otherwise.
    #[must_use]
    pub fn angle_difference_unit(&self, other: &Self) -> f64 {
        clamp(self.dot(other), -1.0, 1.0).acos()
    }

    /// Signed angle from `self` to `other`, both unit vectors.
    ///
    /// The sign is positive when the rotation from `self` to `other` is
    /// counter-clockwise looking down `plane_normal`, negative otherwise.
    #[must_use]
    pub fn angle_unit(&self, other: &Self, plane_normal: &Self) -> f64 {
        let angle = self.angle_difference_unit(other);
        let turn = plane_normal.dot(&self.cross(other));
        if !is_zero(turn) && turn < 0.0 {
            -angle
        } else {
            angle
        }
    }

    /// Component of `self` along `onto`.
    #[must_use]
    pub fn project_onto(&self, onto: &Self) -> Self {
        let len_sq = onto.length_squared();
        if is_zero(len_sq) {
            return Self::ORIGIN;
        }
        *onto * (self.dot(onto) / len_sq)
    }

    /// Rotates this vector by a quaternion.
    #[must_use]
    pub fn rotate(&self, rotation: &Quaternion) -> Self {
        rotation.mult_vector(self)
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts spherical coordinates with Y as the vertical axis.
    ///
    /// `azimuth` is measured in the XZ plane from +X towards +Z, `elevation`
    /// from the XZ plane towards +Y.
    #[must_use]
    pub fn from_spherical_y_up(radius: f64, azimuth: f64, elevation: f64) -> Self {
        let horizontal = radius * elevation.cos();
        Self::new(
            horizontal * azimuth.cos(),
            radius * elevation.sin(),
            horizontal * azimuth.sin(),
        )
    }

    /// Inverse of [`from_spherical_y_up`](Self::from_spherical_y_up),
    /// returning `(radius, azimuth, elevation)`.
    #[must_use]
    pub fn to_spherical_y_up(&self) -> (f64, f64, f64) {
        let radius = self.length();
        if is_zero(radius) {
            return (0.0, 0.0, 0.0);
        }
        let azimuth = self.z.atan2(self.x);
        let elevation = clamp(self.y / radius, -1.0, 1.0).asin();
        (radius, azimuth, elevation)
    }

    /// Converts spherical coordinates with Z as the vertical axis.
    ///
    /// `azimuth` is measured in the XY plane from +X towards +Y, `elevation`
    /// from the XY plane towards +Z.
    #[must_use]
    pub fn from_spherical_z_up(radius: f64, azimuth: f64, elevation: f64) -> Self {
        let horizontal = radius * elevation.cos();
        Self::new(
            horizontal * azimuth.cos(),
            horizontal * azimuth.sin(),
            radius * elevation.sin(),
        )
    }

    /// Inverse of [`from_spherical_z_up`](Self::from_spherical_z_up),
    /// returning `(radius, azimuth, elevation)`.
    #[must_use]
    pub fn to_spherical_z_up(&self) -> (f64, f64, f64) {
        let radius = self.length();
        if is_zero(radius) {
            return (0.0, 0.0, 0.0);
        }
        let azimuth = self.y.atan2(self.x);
        let elevation = clamp(self.z / radius, -1.0, 1.0).asin();
        (radius, azimuth, elevation)
    }
}

impl Vector for Vector3d {
    fn dot(&self, other: &Self) -> f64 {
        Vector3d::dot(self, other)
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        Vector3d::distance_squared(self, other)
    }

    fn is_finite(&self) -> bool {
        Vector3d::is_finite(self)
    }
}

impl PartialEq for Vector3d {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl fmt::Display for Vector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vector3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vector3d {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn v(x: f64, y: f64, z: f64) -> Vector3d {
        Vector3d::new(x, y, z)
    }

    // ── arithmetic ──

    #[test]
    fn cross_of_unit_axes() {
        assert_eq!(Vector3d::UNIT_X.cross(&Vector3d::UNIT_Y), Vector3d::UNIT_Z);
        assert_eq!(Vector3d::UNIT_Y.cross(&Vector3d::UNIT_Z), Vector3d::UNIT_X);
        assert_eq!(Vector3d::UNIT_Y.cross(&Vector3d::UNIT_X), -Vector3d::UNIT_Z);
    }

    #[test]
    fn operators() {
        assert_eq!(v(1.0, 2.0, 3.0) + v(1.0, 1.0, 1.0), v(2.0, 3.0, 4.0));
        assert_eq!(v(1.0, 2.0, 3.0) - v(1.0, 1.0, 1.0), v(0.0, 1.0, 2.0));
        assert_eq!(v(1.0, 2.0, 3.0) * 2.0, v(2.0, 4.0, 6.0));
        assert_eq!(v(2.0, 4.0, 6.0) / 2.0, v(1.0, 2.0, 3.0));
    }

    #[test]
    fn tolerance_equality() {
        assert_eq!(v(1.0, 1.0, 1.0), v(1.0 + 1e-14, 1.0, 1.0 - 1e-14));
        assert_ne!(v(1.0, 1.0, 1.0), v(1.0 + 1e-6, 1.0, 1.0));
    }

    // ── normalization ──

    #[test]
    fn normalized_has_unit_length() {
        assert_relative_eq!(v(1.0, 2.0, 3.0).normalized().length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalized_is_idempotent() {
        let once = v(-3.0, 0.5, 9.0).normalized();
        assert_eq!(once.normalized(), once);
    }

    #[test]
    fn normalized_zero_is_unchanged() {
        let zero = Vector3d::ORIGIN.normalized();
        assert!(zero.is_finite());
        assert_eq!(zero, Vector3d::ORIGIN);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!v(f64::NAN, 0.0, 0.0).is_finite());
        assert!(v(1.0, 2.0, 3.0).is_finite());
    }

    // ── angles ──

    #[test]
    fn angle_difference_general() {
        assert_relative_eq!(v(2.0, 0.0, 0.0).angle_difference(&v(0.0, 5.0, 0.0)), FRAC_PI_2);
        assert_relative_eq!(v(1.0, 0.0, 0.0).angle_difference(&v(1.0, 1.0, 0.0)), FRAC_PI_4);
    }

    #[test]
    fn angle_difference_unit_clamps_noise() {
        let a = v(1.0, 0.0, 0.0);
        let b = v(1.0 + 1e-16, 0.0, 0.0);
        assert!(a.angle_difference_unit(&b).is_finite());
    }

    #[test]
    fn signed_angle_uses_plane_normal() {
        let x = Vector3d::UNIT_X;
        let y = Vector3d::UNIT_Y;
        assert_relative_eq!(x.angle_unit(&y, &Vector3d::UNIT_Z), FRAC_PI_2);
        assert_relative_eq!(x.angle_unit(&y, &-Vector3d::UNIT_Z), -FRAC_PI_2);
        assert_relative_eq!(y.angle_unit(&x, &Vector3d::UNIT_Z), -FRAC_PI_2);
    }

    #[test]
    fn signed_angle_of_opposite_vectors_is_positive() {
        // cross product leaves only rounding noise, which must not flip the sign
        let x = Vector3d::UNIT_X;
        let back = v(-1.0, -1e-14, 0.0).normalized();
        assert_relative_eq!(x.angle_unit(&back, &Vector3d::UNIT_Z), PI);
        assert_relative_eq!(x.angle_unit(&-x, &Vector3d::UNIT_Z), PI);
    }

    // ── interpolation ──

    #[test]
    fn interpolate_is_unclamped() {
        let a = v(0.0, 0.0, 0.0);
        let b = v(1.0, 2.0, 3.0);
        assert_eq!(a.interpolate(&b, 0.5), v(0.5, 1.0, 1.5));
        assert_eq!(a.interpolate(&b, -1.0), v(-1.0, -2.0, -3.0));
    }

    // ── spherical ──

    #[test]
    fn spherical_y_up_vertical_is_y() {
        let p = Vector3d::from_spherical_y_up(2.0, 0.0, FRAC_PI_2);
        assert_eq!(p, v(0.0, 2.0, 0.0));
    }

    #[test]
    fn spherical_z_up_vertical_is_z() {
        let p = Vector3d::from_spherical_z_up(2.0, 0.0, FRAC_PI_2);
        assert_eq!(p, v(0.0, 0.0, 2.0));
    }

    #[test]
    fn spherical_families_differ() {
        let y_up = Vector3d::from_spherical_y_up(1.0, FRAC_PI_2, 0.0);
        let z_up = Vector3d::from_spherical_z_up(1.0, FRAC_PI_2, 0.0);
        assert_eq!(y_up, v(0.0, 0.0, 1.0));
        assert_eq!(z_up, v(0.0, 1.0, 0.0));
    }

    #[test]
    fn spherical_roundtrip() {
        let p = v(1.0, -2.0, 0.5);
        let (r, az, el) = p.to_spherical_y_up();
        assert_eq!(Vector3d::from_spherical_y_up(r, az, el), p);
        let (r, az, el) = p.to_spherical_z_up();
        assert_eq!(Vector3d::from_spherical_z_up(r, az, el), p);
    }

    #[test]
    fn spherical_azimuth_behind() {
        let (_, az, _) = v(-1.0, 0.0, 0.0).to_spherical_z_up();
        assert_relative_eq!(az.abs(), PI);
    }

    #[test]
    fn projection() {
        assert_eq!(v(3.0, 4.0, 0.0).project_onto(&v(2.0, 0.0, 0.0)), v(3.0, 0.0, 0.0));
        assert_eq!(v(3.0, 4.0, 0.0).project_onto(&Vector3d::ORIGIN), Vector3d::ORIGIN);
    }
}
