use std::ops::{Add, Mul};

use crate::error::Result;

use super::matrix::{check_index, check_len, extend_bytes, from_row_major, narrow, read_row_major, MajorOrder};
use super::scalar::{approx_eq, is_zero};
use super::vector2d::Vector2d;

/// A 2x2 matrix of `f64`.
///
/// `Default` is the identity. Arithmetic returns new values; the `*_local`
/// methods mutate in place for callers that want to avoid copies.
#[derive(Debug, Clone, Copy)]
pub struct Matrix2d {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
}

impl Default for Matrix2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2d {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a matrix from components in row-major order.
    #[must_use]
    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// Counter-clockwise rotation by `angle` radians.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    /// Creates a matrix whose columns are `x` and `y`.
    #[must_use]
    pub fn from_columns(x: &Vector2d, y: &Vector2d) -> Self {
        Self::new(x.x, y.x, x.y, y.y)
    }

    /// Reads four values in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have exactly four elements.
    pub fn from_array(values: &[f64], order: MajorOrder) -> Result<Self> {
        check_len("Matrix2d array", values, 4)?;
        Self::read_buffer(values, 0, order)
    }

    /// Reads four values starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short.
    pub fn read_buffer(buffer: &[f64], offset: usize, order: MajorOrder) -> Result<Self> {
        let [m00, m01, m10, m11] = read_row_major::<4>("Matrix2d buffer", buffer, offset, 2, order)?;
        Ok(Self::new(m00, m01, m10, m11))
    }

    /// Overwrites every component from `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have exactly four elements.
    pub fn set_array(&mut self, values: &[f64], order: MajorOrder) -> Result<()> {
        *self = Self::from_array(values, order)?;
        Ok(())
    }

    #[must_use]
    pub fn to_array(&self, order: MajorOrder) -> [f64; 4] {
        from_row_major([self.m00, self.m01, self.m10, self.m11], 2, order)
    }

    /// Appends the four components to `buffer`.
    pub fn fill_buffer(&self, buffer: &mut Vec<f64>, order: MajorOrder) {
        buffer.extend_from_slice(&self.to_array(order));
    }

    #[must_use]
    pub fn to_f32_array(&self, order: MajorOrder) -> [f32; 4] {
        narrow(self.to_array(order))
    }

    /// Appends the components as native-endian `f32` bytes.
    pub fn fill_byte_buffer(&self, out: &mut Vec<u8>, order: MajorOrder) {
        extend_bytes(out, &self.to_f32_array(order));
    }

    /// Returns the component at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is greater than 1.
    pub fn get(&self, row: usize, column: usize) -> Result<f64> {
        check_index(row, column, 2)?;
        Ok(self.to_array(MajorOrder::Row)[row * 2 + column])
    }

    /// Sets the component at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is greater than 1.
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        check_index(row, column, 2)?;
        match (row, column) {
            (0, 0) => self.m00 = value,
            (0, _) => self.m01 = value,
            (_, 0) => self.m10 = value,
            _ => self.m11 = value,
        }
        Ok(())
    }

    /// Returns column `index` (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than 1.
    pub fn column(&self, index: usize) -> Result<Vector2d> {
        check_index(0, index, 2)?;
        Ok(if index == 0 {
            Vector2d::new(self.m00, self.m10)
        } else {
            Vector2d::new(self.m01, self.m11)
        })
    }

    /// Returns row `index` (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than 1.
    pub fn row(&self, index: usize) -> Result<Vector2d> {
        check_index(index, 0, 2)?;
        Ok(if index == 0 {
            Vector2d::new(self.m00, self.m01)
        } else {
            Vector2d::new(self.m10, self.m11)
        })
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self::new(self.m11, -self.m01, -self.m10, self.m00)
    }

    /// Returns the inverse, or [`ZERO`](Self::ZERO) if the matrix is singular.
    #[must_use]
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if is_zero(det) {
            tracing::trace!("singular Matrix2d, returning zero matrix");
            return Self::ZERO;
        }
        self.adjoint().scale(1.0 / det)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(self.m00, self.m10, self.m01, self.m11)
    }

    #[must_use]
    pub fn scale(&self, scalar: f64) -> Self {
        Self::new(self.m00 * scalar, self.m01 * scalar, self.m10 * scalar, self.m11 * scalar)
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn mult(&self, other: &Self) -> Self {
        Self::new(
            self.m00 * other.m00 + self.m01 * other.m10,
            self.m00 * other.m01 + self.m01 * other.m11,
            self.m10 * other.m00 + self.m11 * other.m10,
            self.m10 * other.m01 + self.m11 * other.m11,
        )
    }

    #[must_use]
    pub fn mult_vector(&self, v: &Vector2d) -> Vector2d {
        Vector2d::new(self.m00 * v.x + self.m01 * v.y, self.m10 * v.x + self.m11 * v.y)
    }

    /// In-place `self = self * other`.
    pub fn mult_local(&mut self, other: &Self) {
        *self = self.mult(other);
    }

    /// In-place inversion; becomes [`ZERO`](Self::ZERO) if singular.
    pub fn invert_local(&mut self) {
        *self = self.invert();
    }

    pub fn transpose_local(&mut self) {
        std::mem::swap(&mut self.m01, &mut self.m10);
    }

    pub fn scale_local(&mut self, scalar: f64) {
        *self = self.scale(scalar);
    }

    pub fn load_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl PartialEq for Matrix2d {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.m00, other.m00)
            && approx_eq(self.m01, other.m01)
            && approx_eq(self.m10, other.m10)
            && approx_eq(self.m11, other.m11)
    }
}

impl Mul for Matrix2d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vector2d> for Matrix2d {
    type Output = Vector2d;

    fn mul(self, rhs: Vector2d) -> Vector2d {
        self.mult_vector(&rhs)
    }
}

impl Add for Matrix2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.m00 + rhs.m00,
            self.m01 + rhs.m01,
            self.m10 + rhs.m10,
            self.m11 + rhs.m11,
        )
    }
}
