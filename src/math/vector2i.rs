use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::vector::Vector;
use super::vector2d::Vector2d;

/// An immutable 2D vector of `i32` components, typically a pixel or grid
/// coordinate. Equality is exact.
///
/// Component arithmetic wraps on `i32` overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        f64::from(self.x) * f64::from(other.x) + f64::from(self.y) * f64::from(other.y)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Integer interpolation towards `other`, rounding to the nearest cell.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn interpolate(&self, other: &Self, fraction: f64) -> Self {
        let lerp = |a: i32, b: i32| {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * fraction).round() as i32
        };
        Self::new(lerp(self.x, other.x), lerp(self.y, other.y))
    }

    #[must_use]
    pub fn to_vector2d(&self) -> Vector2d {
        Vector2d::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Vector for Vector2i {
    fn dot(&self, other: &Self) -> f64 {
        Vector2i::dot(self, other)
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        Vector2i::distance_squared(self, other)
    }

    fn is_finite(&self) -> bool {
        true
    }
}

impl From<Vector2i> for Vector2d {
    fn from(v: Vector2i) -> Self {
        v.to_vector2d()
    }
}

impl fmt::Display for Vector2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for Vector2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl Mul<i32> for Vector2i {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x.wrapping_mul(rhs), self.y.wrapping_mul(rhs))
    }
}

impl Neg for Vector2i {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.x.wrapping_neg(), self.y.wrapping_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exact_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(Vector2i::new(1, 2));
        assert!(set.contains(&Vector2i::new(1, 2)));
        assert_ne!(Vector2i::new(1, 2), Vector2i::new(2, 1));
    }

    #[test]
    fn arithmetic_wraps_on_overflow() {
        assert_eq!(Vector2i::new(i32::MAX, 0) + Vector2i::new(1, 0), Vector2i::new(i32::MIN, 0));
        assert_eq!(Vector2i::new(0, i32::MIN) - Vector2i::new(0, 1), Vector2i::new(0, i32::MAX));
        assert_eq!(Vector2i::new(i32::MAX, 2) * 2, Vector2i::new(-2, 4));
        assert_eq!(-Vector2i::new(i32::MIN, 3), Vector2i::new(i32::MIN, -3));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Vector2i::new(1, 2) + Vector2i::new(3, 4), Vector2i::new(4, 6));
        assert_eq!(Vector2i::new(1, 2) - Vector2i::new(3, 4), Vector2i::new(-2, -2));
        assert_eq!(Vector2i::new(1, 2) * 3, Vector2i::new(3, 6));
    }

    #[test]
    fn distance() {
        assert!((Vector2i::new(0, 0).distance(&Vector2i::new(3, 4)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn interpolation_rounds() {
        assert_eq!(
            Vector2i::new(0, 0).interpolate(&Vector2i::new(3, 5), 0.5),
            Vector2i::new(2, 3)
        );
    }

    #[test]
    fn widens_to_double() {
        assert_eq!(Vector2d::from(Vector2i::new(3, -4)), Vector2d::new(3.0, -4.0));
    }
}
