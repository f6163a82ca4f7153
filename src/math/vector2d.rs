use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};

use crate::error::{GeometryError, Result};

use super::scalar::{approx_eq, clamp, is_zero};
use super::vector::Vector;

/// An immutable 2D vector of `f64` components.
///
/// Equality is tolerance-based (see [`scalar::approx_eq`](super::scalar::approx_eq)).
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vector2d {
    pub x: f64,
    pub y: f64,
}

impl Vector2d {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector from a two-element slice.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::WrongLength`] if `values` does not have two elements.
    pub fn from_array(values: &[f64]) -> Result<Self> {
        match values {
            [x, y] => Ok(Self::new(*x, *y)),
            _ => Err(GeometryError::WrongLength {
                what: "Vector2d array",
                expected: 2,
                actual: values.len(),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Perp-dot product (`self.x * other.y - self.y * other.x`).
    ///
    /// Positive when `other` is counter-clockwise from `self`.
    #[must_use]
    pub fn determinant(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The vector rotated 90 degrees counter-clockwise.
    #[must_use]
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
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
        dx * dx + dy * dy
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
        )
    }

    /// Heading of this vector, counter-clockwise from +X, in `(-pi, pi]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unsigned angle between the two vectors in `[0, pi]`.
    #[must_use]
    pub fn angle_difference(&self, other: &Self) -> f64 {
        let denom = self.length() * other.length();
        if is_zero(denom) {
            return 0.0;
        }
        clamp(self.dot(other) / denom, -1.0, 1.0).acos()
    }

    /// Rotates the vector counter-clockwise by `angle` radians.
    #[must_use]
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Vector for Vector2d {
    fn dot(&self, other: &Self) -> f64 {
        Vector2d::dot(self, other)
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        Vector2d::distance_squared(self, other)
    }

    fn is_finite(&self) -> bool {
        Vector2d::is_finite(self)
    }
}

impl PartialEq for Vector2d {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl fmt::Display for Vector2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2d {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
