//! Scalar tolerance utilities.
//!
//! Every floating-point equality, zero and sign test in the crate goes
//! through these functions. There are two tolerance tiers: [`DBL_EPSILON`]
//! for general equality and [`DBL_LARGE_EPSILON`] for deciding whether a
//! segment endpoint lies on a line or plane.

/// Tight tolerance used for generic equality and zero tests.
pub const DBL_EPSILON: f64 = 1e-12;

/// Loose tolerance used when classifying segment endpoints against a line
/// or plane.
pub const DBL_LARGE_EPSILON: f64 = 1e-9;

/// Distance of a unit-vector dot product from `±1` below which two
/// directions are treated as parallel when building a rotation between them.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Tolerance used for single-precision vector equality.
pub const FLT_EPSILON: f32 = 1e-6;

/// `2 * pi`.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// `pi / 2`.
pub const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;

/// Multiply degrees by this to get radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Multiply radians by this to get degrees.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Returns `true` if `value` is within [`DBL_EPSILON`] of zero.
#[must_use]
#[inline]
pub fn is_zero(value: f64) -> bool {
    is_zero_eps(value, DBL_EPSILON)
}

/// Returns `true` if `value` is within `epsilon` of zero.
#[must_use]
#[inline]
pub fn is_zero_eps(value: f64, epsilon: f64) -> bool {
    value.abs() <= epsilon
}

/// Returns `true` if `a` and `b` differ by at most [`DBL_EPSILON`].
#[must_use]
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_eps(a, b, DBL_EPSILON)
}

/// Returns `true` if `a` and `b` differ by at most `epsilon`.
#[must_use]
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
    is_zero_eps(a - b, epsilon)
}

/// Single-precision counterpart of [`approx_eq`], using [`FLT_EPSILON`].
#[must_use]
#[inline]
pub fn approx_eq_f32(a: f32, b: f32) -> bool {
    (a - b).abs() <= FLT_EPSILON
}

/// Element-wise tolerance comparison of two slices.
///
/// Slices of different length are never equal.
#[must_use]
pub fn equals(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y))
}

/// Returns `true` if `a` and `b` have the same sign.
///
/// Values within [`DBL_EPSILON`] of zero are treated as unsigned: two such
/// values match each other but never match a signed value.
#[must_use]
pub fn same_sign(a: f64, b: f64) -> bool {
    match (is_zero(a), is_zero(b)) {
        (true, true) => true,
        (false, false) => (a > 0.0) == (b > 0.0),
        _ => false,
    }
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`], this does not panic when `min > max`; `min` wins.
#[must_use]
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Converts degrees to radians.
#[must_use]
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

/// Converts radians to degrees.
#[must_use]
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}
