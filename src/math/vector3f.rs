use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};

use super::scalar::{approx_eq_f32, clamp, FLT_EPSILON};
use super::vector::Vector;
use super::vector3d::Vector3d;

/// Single-precision 3D vector, used for vertex data handed to the renderer.
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        f64::from(self.x) * f64::from(other.x)
            + f64::from(self.y) * f64::from(other.y)
            + f64::from(self.z) * f64::from(other.z)
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
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        (*self - *other).dot(&(*self - *other))
    }

    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Unit-length copy; returned unchanged when the length is one or zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn normalized(&self) -> Self {
        let len = self.length() as f32;
        if (len - 1.0).abs() <= FLT_EPSILON || len.abs() <= FLT_EPSILON {
            *self
        } else {
            *self / len
        }
    }

    /// Linear interpolation towards `other`; `fraction` is not clamped.
    #[must_use]
    pub fn interpolate(&self, other: &Self, fraction: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * fraction,
            self.y + (other.y - self.y) * fraction,
            self.z + (other.z - self.z) * fraction,
        )
    }

    /// Unsigned angle between two vectors of any length.
    #[must_use]
    pub fn angle_difference(&self, other: &Self) -> f64 {
        let denom = self.length() * other.length();
        if denom <= f64::from(FLT_EPSILON) {
            return 0.0;
        }
        clamp(self.dot(other) / denom, -1.0, 1.0).acos()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[must_use]
    pub fn to_vector3d(&self) -> Vector3d {
        Vector3d::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Narrows a double-precision vector; precision beyond `f32` is lost.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_vector3d(v: &Vector3d) -> Self {
        Self::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

impl Vector for Vector3f {
    fn dot(&self, other: &Self) -> f64 {
        Vector3f::dot(self, other)
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        Vector3f::distance_squared(self, other)
    }

    fn is_finite(&self) -> bool {
        Vector3f::is_finite(self)
    }
}

impl From<Vector3f> for Vector3d {
    fn from(v: Vector3f) -> Self {
        v.to_vector3d()
    }
}

impl From<Vector3d> for Vector3f {
    fn from(v: Vector3d) -> Self {
        Self::from_vector3d(&v)
    }
}

impl PartialEq for Vector3f {
    fn eq(&self, other: &Self) -> bool {
        approx_eq_f32(self.x, other.x) && approx_eq_f32(self.y, other.y) && approx_eq_f32(self.z, other.z)
    }
}

impl fmt::Display for Vector3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vector3f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vector3f {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_unit_axes() {
        assert_eq!(Vector3f::UNIT_X.cross(&Vector3f::UNIT_Y), Vector3f::UNIT_Z);
    }

    #[test]
    fn normalize() {
        let n = Vector3f::new(0.0, 3.0, 4.0).normalized();
        assert_eq!(n, Vector3f::new(0.0, 0.6, 0.8));
        assert_eq!(Vector3f::ORIGIN.normalized(), Vector3f::ORIGIN);
    }

    #[test]
    fn pod_layout_is_three_floats() {
        let verts = [Vector3f::new(1.0, 2.0, 3.0), Vector3f::new(4.0, 5.0, 6.0)];
        let floats: &[f32] = bytemuck::cast_slice(&verts);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn widening_roundtrip() {
        let f = Vector3f::new(1.5, -2.25, 8.0);
        assert_eq!(Vector3f::from(Vector3d::from(f)), f);
    }
}
