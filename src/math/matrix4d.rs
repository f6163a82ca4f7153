use std::ops::{Add, Mul};

use crate::error::Result;

use super::matrix::{check_index, check_len, extend_bytes, from_row_major, narrow, read_row_major, MajorOrder};
use super::matrix3d::Matrix3d;
use super::quaternion::Quaternion;
use super::scalar::{approx_eq, is_zero};
use super::vector3d::Vector3d;

/// A 4x4 matrix of `f64`, normally an affine transform.
///
/// Rotation lives in the upper-left 3x3 block and translation in column 3,
/// so `get(3, 3)` is 1 for any affine transform (not enforced).
/// `Default` is the identity.
#[derive(Debug, Clone, Copy)]
pub struct Matrix4d {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m03: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m30: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
}

impl Default for Matrix4d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4d {
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    pub const ZERO: Self = Self::from_rows([[0.0; 4]; 4]);

    /// Creates a matrix from four rows.
    #[must_use]
    pub const fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let [[m00, m01, m02, m03], [m10, m11, m12, m13], [m20, m21, m22, m23], [m30, m31, m32, m33]] =
            rows;
        Self {
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        }
    }

    #[must_use]
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        [
            [self.m00, self.m01, self.m02, self.m03],
            [self.m10, self.m11, self.m12, self.m13],
            [self.m20, self.m21, self.m22, self.m23],
            [self.m30, self.m31, self.m32, self.m33],
        ]
    }

    fn from_flat(values: [f64; 16]) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&values[i * 4..i * 4 + 4]);
        }
        Self::from_rows(rows)
    }

    /// Affine transform with the given rotation/scale block and translation.
    #[must_use]
    pub fn from_rotation_translation(rotation: &Matrix3d, translation: &Vector3d) -> Self {
        Self::from_rows([
            [rotation.m00, rotation.m01, rotation.m02, translation.x],
            [rotation.m10, rotation.m11, rotation.m12, translation.y],
            [rotation.m20, rotation.m21, rotation.m22, translation.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[must_use]
    pub fn from_translation(translation: &Vector3d) -> Self {
        Self::from_rotation_translation(&Matrix3d::IDENTITY, translation)
    }

    #[must_use]
    pub fn from_scale(scale: &Vector3d) -> Self {
        Self::from_rotation_translation(&Matrix3d::from_scale(scale), &Vector3d::ORIGIN)
    }

    /// Pure rotation equivalent to `q`.
    #[must_use]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_rotation_translation(&q.to_rotation_matrix(), &Vector3d::ORIGIN)
    }

    /// Rotation of `angle` radians about `axis` (normalized internally).
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: &Vector3d) -> Self {
        Self::from_rotation_translation(&Matrix3d::from_angle_axis(angle, axis), &Vector3d::ORIGIN)
    }

    /// Reads sixteen values in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have exactly sixteen elements.
    pub fn from_array(values: &[f64], order: MajorOrder) -> Result<Self> {
        check_len("Matrix4d array", values, 16)?;
        Self::read_buffer(values, 0, order)
    }

    /// Reads sixteen values starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short.
    pub fn read_buffer(buffer: &[f64], offset: usize, order: MajorOrder) -> Result<Self> {
        let flat = read_row_major::<16>("Matrix4d buffer", buffer, offset, 4, order)?;
        Ok(Self::from_flat(flat))
    }

    /// Overwrites every component from `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have exactly sixteen elements.
    pub fn set_array(&mut self, values: &[f64], order: MajorOrder) -> Result<()> {
        *self = Self::from_array(values, order)?;
        Ok(())
    }

    #[must_use]
    pub fn to_array(&self, order: MajorOrder) -> [f64; 16] {
        let rows = self.to_rows();
        let flat = std::array::from_fn(|i| rows[i / 4][i % 4]);
        from_row_major(flat, 4, order)
    }

    /// Appends the sixteen components to `buffer`.
    pub fn fill_buffer(&self, buffer: &mut Vec<f64>, order: MajorOrder) {
        buffer.extend_from_slice(&self.to_array(order));
    }

    #[must_use]
    pub fn to_f32_array(&self, order: MajorOrder) -> [f32; 16] {
        narrow(self.to_array(order))
    }

    /// Appends the components as native-endian `f32` bytes, ready for a
    /// uniform buffer.
    pub fn fill_byte_buffer(&self, out: &mut Vec<u8>, order: MajorOrder) {
        extend_bytes(out, &self.to_f32_array(order));
    }

    /// Returns the component at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is greater than 3.
    pub fn get(&self, row: usize, column: usize) -> Result<f64> {
        check_index(row, column, 4)?;
        Ok(self.to_rows()[row][column])
    }

    /// Sets the component at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is greater than 3.
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        check_index(row, column, 4)?;
        let mut rows = self.to_rows();
        rows[row][column] = value;
        *self = Self::from_rows(rows);
        Ok(())
    }

    /// Returns column `index` as `[x, y, z, w]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than 3.
    pub fn column(&self, index: usize) -> Result<[f64; 4]> {
        check_index(0, index, 4)?;
        let rows = self.to_rows();
        Ok(std::array::from_fn(|r| rows[r][index]))
    }

    /// # Errors
    ///
    /// Returns an error if `index` is greater than 3.
    pub fn row(&self, index: usize) -> Result<[f64; 4]> {
        check_index(index, 0, 4)?;
        Ok(self.to_rows()[index])
    }

    /// The translation column.
    #[must_use]
    pub fn translation(&self) -> Vector3d {
        Vector3d::new(self.m03, self.m13, self.m23)
    }

    pub fn set_translation(&mut self, translation: &Vector3d) {
        self.m03 = translation.x;
        self.m13 = translation.y;
        self.m23 = translation.z;
    }

    /// The upper-left 3x3 block.
    #[must_use]
    pub fn rotation_matrix(&self) -> Matrix3d {
        Matrix3d::new(
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22,
        )
    }

    /// Quaternion for the rotation block; assumes it carries no scale.
    #[must_use]
    pub fn to_quaternion(&self) -> Quaternion {
        self.rotation_matrix().to_quaternion()
    }

    /// Closed-form 2x2 sub-determinants shared by `determinant` and `adjoint`.
    fn minors(&self) -> ([f64; 6], [f64; 6]) {
        let a = [
            self.m00 * self.m11 - self.m01 * self.m10,
            self.m00 * self.m12 - self.m02 * self.m10,
            self.m00 * self.m13 - self.m03 * self.m10,
            self.m01 * self.m12 - self.m02 * self.m11,
            self.m01 * self.m13 - self.m03 * self.m11,
            self.m02 * self.m13 - self.m03 * self.m12,
        ];
        let b = [
            self.m20 * self.m31 - self.m21 * self.m30,
            self.m20 * self.m32 - self.m22 * self.m30,
            self.m20 * self.m33 - self.m23 * self.m30,
            self.m21 * self.m32 - self.m22 * self.m31,
            self.m21 * self.m33 - self.m23 * self.m31,
            self.m22 * self.m33 - self.m23 * self.m32,
        ];
        (a, b)
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        let (a, b) = self.minors();
        a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0]
    }

    /// Classical adjoint (transpose of the cofactor matrix).
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let (a, b) = self.minors();
        Self::from_rows([
            [
                self.m11 * b[5] - self.m12 * b[4] + self.m13 * b[3],
                -self.m01 * b[5] + self.m02 * b[4] - self.m03 * b[3],
                self.m31 * a[5] - self.m32 * a[4] + self.m33 * a[3],
                -self.m21 * a[5] + self.m22 * a[4] - self.m23 * a[3],
            ],
            [
                -self.m10 * b[5] + self.m12 * b[2] - self.m13 * b[1],
                self.m00 * b[5] - self.m02 * b[2] + self.m03 * b[1],
                -self.m30 * a[5] + self.m32 * a[2] - self.m33 * a[1],
                self.m20 * a[5] - self.m22 * a[2] + self.m23 * a[1],
            ],
            [
                self.m10 * b[4] - self.m11 * b[2] + self.m13 * b[0],
                -self.m00 * b[4] + self.m01 * b[2] - self.m03 * b[0],
                self.m30 * a[4] - self.m31 * a[2] + self.m33 * a[0],
                -self.m20 * a[4] + self.m21 * a[2] - self.m23 * a[0],
            ],
            [
                -self.m10 * b[3] + self.m11 * b[1] - self.m12 * b[0],
                self.m00 * b[3] - self.m01 * b[1] + self.m02 * b[0],
                -self.m30 * a[3] + self.m31 * a[1] - self.m32 * a[0],
                self.m20 * a[3] - self.m21 * a[1] + self.m22 * a[0],
            ],
        ])
    }

    /// Returns the inverse, or [`ZERO`](Self::ZERO) if the matrix is
    /// singular.
    #[must_use]
    pub fn invert(&self) -> Self {
        let det = self.determinant();
        if is_zero(det) {
            tracing::trace!("singular Matrix4d, returning zero matrix");
            return Self::ZERO;
        }
        self.adjoint().scale(1.0 / det)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let r = self.to_rows();
        Self::from_rows(std::array::from_fn(|i| std::array::from_fn(|j| r[j][i])))
    }

    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::from_rows(self.to_rows().map(|row| row.map(|v| v * s)))
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn mult(&self, other: &Self) -> Self {
        let a = self.to_rows();
        let b = other.to_rows();
        Self::from_rows(std::array::from_fn(|i| {
            std::array::from_fn(|j| a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j] + a[i][3] * b[3][j])
        }))
    }

    /// Transforms a homogeneous 4-vector.
    #[must_use]
    pub fn mult_vector4(&self, v: &[f64; 4]) -> [f64; 4] {
        let r = self.to_rows();
        std::array::from_fn(|i| r[i][0] * v[0] + r[i][1] * v[1] + r[i][2] * v[2] + r[i][3] * v[3])
    }

    /// Transforms a point (`w = 1`), dividing by the resulting `w` when it is
    /// not one.
    #[must_use]
    pub fn mult_point(&self, p: &Vector3d) -> Vector3d {
        let [x, y, z, w] = self.mult_vector4(&[p.x, p.y, p.z, 1.0]);
        if approx_eq(w, 1.0) || is_zero(w) {
            Vector3d::new(x, y, z)
        } else {
            Vector3d::new(x / w, y / w, z / w)
        }
    }

    /// Transforms a direction (`w = 0`); translation is ignored.
    #[must_use]
    pub fn mult_direction(&self, d: &Vector3d) -> Vector3d {
        self.rotation_matrix().mult_vector(d)
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
        *self = self.transpose();
    }

    pub fn scale_local(&mut self, s: f64) {
        *self = self.scale(s);
    }

    pub fn load_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Perspective projection for a view frustum (right-handed, clip-space
    /// depth in `[-1, 1]`).
    #[must_use]
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        Self::from_rows([
            [2.0 * near / width, 0.0, (right + left) / width, 0.0],
            [0.0, 2.0 * near / height, (top + bottom) / height, 0.0],
            [0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Symmetric perspective projection; `fov_y` is the full vertical field
    /// of view in radians.
    #[must_use]
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        let h = (fov_y * 0.5).tan() * near;
        let w = h * aspect;
        Self::frustum(-w, w, -h, h, near, far)
    }

    #[must_use]
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        Self::from_rows([
            [2.0 / width, 0.0, 0.0, -(right + left) / width],
            [0.0, 2.0 / height, 0.0, -(top + bottom) / height],
            [0.0, 0.0, -2.0 / depth, -(far + near) / depth],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// View transform for a camera at `eye` looking at `target`.
    #[must_use]
    pub fn look_at(eye: &Vector3d, target: &Vector3d, up: &Vector3d) -> Self {
        let f = (*target - *eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(&f);
        Self::from_rows([
            [s.x, s.y, s.z, -s.dot(eye)],
            [u.x, u.y, u.z, -u.dot(eye)],
            [-f.x, -f.y, -f.z, f.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl PartialEq for Matrix4d {
    fn eq(&self, other: &Self) -> bool {
        self.to_array(MajorOrder::Row)
            .iter()
            .zip(other.to_array(MajorOrder::Row).iter())
            .all(|(a, b)| approx_eq(*a, *b))
    }
}

impl Mul for Matrix4d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vector3d> for Matrix4d {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        self.mult_point(&rhs)
    }
}

impl Add for Matrix4d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let a = self.to_rows();
        let b = rhs.to_rows();
        Self::from_rows(std::array::from_fn(|i| std::array::from_fn(|j| a[i][j] + b[i][j])))
    }
}
