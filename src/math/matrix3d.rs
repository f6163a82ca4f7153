use std::ops::{Add, Mul};

use crate::error::Result;

use super::matrix::{check_index, check_len, extend_bytes, from_row_major, narrow, read_row_major, MajorOrder};
use super::matrix4d::Matrix4d;
use super::quaternion::Quaternion;
use super::scalar::{approx_eq, is_zero, PARALLEL_EPSILON};
use super::vector2d::Vector2d;
use super::vector3d::Vector3d;

/// A 3x3 matrix of `f64`, used for rotations, linear transforms and 2D
/// projective mappings.
///
/// `Default` is the identity. Arithmetic returns new values; the `*_local`
/// methods mutate in place and make the matrix a single-writer value.
#[derive(Debug, Clone, Copy)]
pub struct Matrix3d {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
}

impl Default for Matrix3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3d {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Creates a matrix from components in row-major order.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
            m20,
            m21,
            m22,
        }
    }

    fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = rows;
        Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22)
    }

    fn to_rows(self) -> [[f64; 3]; 3] {
        [
            [self.m00, self.m01, self.m02],
            [self.m10, self.m11, self.m12],
            [self.m20, self.m21, self.m22],
        ]
    }

    /// Creates a matrix whose columns are the three axis vectors.
    #[must_use]
    pub fn from_axes(x: &Vector3d, y: &Vector3d, z: &Vector3d) -> Self {
        Self::new(x.x, y.x, z.x, x.y, y.y, z.y, x.z, y.z, z.z)
    }

    /// Rotation matrix equivalent to `q`.
    #[must_use]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        q.to_rotation_matrix()
    }

    /// Diagonal scale matrix.
    #[must_use]
    pub fn from_scale(scale: &Vector3d) -> Self {
        Self::new(scale.x, 0.0, 0.0, 0.0, scale.y, 0.0, 0.0, 0.0, scale.z)
    }

    /// Reads nine values in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have exactly nine elements.
    pub fn from_array(values: &[f64], order: MajorOrder) -> Result<Self> {
        check_len("Matrix3d array", values, 9)?;
        Self::read_buffer(values, 0, order)
    }

    /// Reads nine values starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short.
    pub fn read_buffer(buffer: &[f64], offset: usize, order: MajorOrder) -> Result<Self> {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] =
            read_row_major::<9>("Matrix3d buffer", buffer, offset, 3, order)?;
        Ok(Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22))
    }

    /// Overwrites every component from `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have exactly nine elements.
    pub fn set_array(&mut self, values: &[f64], order: MajorOrder) -> Result<()> {
        *self = Self::from_array(values, order)?;
        Ok(())
    }

    #[must_use]
    pub fn to_array(&self, order: MajorOrder) -> [f64; 9] {
        from_row_major(
            [
                self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
                self.m22,
            ],
            3,
            order,
        )
    }

    /// Appends the nine components to `buffer`.
    pub fn fill_buffer(&self, buffer: &mut Vec<f64>, order: MajorOrder) {
        buffer.extend_from_slice(&self.to_array(order));
    }

    #[must_use]
    pub fn to_f32_array(&self, order: MajorOrder) -> [f32; 9] {
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
    /// Returns an error if either index is greater than 2.
    pub fn get(&self, row: usize, column: usize) -> Result<f64> {
        check_index(row, column, 3)?;
        Ok(self.to_rows()[row][column])
    }

    /// Sets the component at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is greater than 2.
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        check_index(row, column, 3)?;
        let mut rows = self.to_rows();
        rows[row][column] = value;
        *self = Self::from_rows(rows);
        Ok(())
    }

    /// Returns column `index` (0, 1 or 2) as a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than 2.
    pub fn column(&self, index: usize) -> Result<Vector3d> {
        check_index(0, index, 3)?;
        let rows = self.to_rows();
        Ok(Vector3d::new(rows[0][index], rows[1][index], rows[2][index]))
    }

    /// Returns row `index` (0, 1 or 2) as a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than 2.
    pub fn row(&self, index: usize) -> Result<Vector3d> {
        check_index(index, 0, 3)?;
        let [x, y, z] = self.to_rows()[index];
        Ok(Vector3d::new(x, y, z))
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        let co00 = self.m11 * self.m22 - self.m12 * self.m21;
        let co10 = self.m12 * self.m20 - self.m10 * self.m22;
        let co20 = self.m10 * self.m21 - self.m11 * self.m20;
        self.m00 * co00 + self.m01 * co10 + self.m02 * co20
    }

    /// Classical adjoint (transpose of the cofactor matrix).
    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self::new(
            self.m11 * self.m22 - self.m12 * self.m21,
            self.m02 * self.m21 - self.m01 * self.m22,
            self.m01 * self.m12 - self.m02 * self.m11,
            self.m12 * self.m20 - self.m10 * self.m22,
            self.m00 * self.m22 - self.m02 * self.m20,
            self.m02 * self.m10 - self.m00 * self.m12,
            self.m10 * self.m21 - self.m11 * self.m20,
            self.m01 * self.m20 - self.m00 * self.m21,
            self.m00 * self.m11 - self.m01 * self.m10,
        )
    }

    /// Returns the inverse, or [`ZERO`](Self::ZERO) if the matrix is
    /// singular. An all-zero result therefore means "could not invert".
    #[must_use]
    pub fn invert(&self) -> Self {
        let adj = self.adjoint();
        let det = self.m00 * adj.m00 + self.m01 * adj.m10 + self.m02 * adj.m20;
        if is_zero(det) {
            tracing::trace!("singular Matrix3d, returning zero matrix");
            return Self::ZERO;
        }
        adj.scale(1.0 / det)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20, self.m01, self.m11, self.m21, self.m02, self.m12,
            self.m22,
        )
    }

    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(
            self.m00 * s,
            self.m01 * s,
            self.m02 * s,
            self.m10 * s,
            self.m11 * s,
            self.m12 * s,
            self.m20 * s,
            self.m21 * s,
            self.m22 * s,
        )
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn mult(&self, o: &Self) -> Self {
        Self::new(
            self.m00 * o.m00 + self.m01 * o.m10 + self.m02 * o.m20,
            self.m00 * o.m01 + self.m01 * o.m11 + self.m02 * o.m21,
            self.m00 * o.m02 + self.m01 * o.m12 + self.m02 * o.m22,
            self.m10 * o.m00 + self.m11 * o.m10 + self.m12 * o.m20,
            self.m10 * o.m01 + self.m11 * o.m11 + self.m12 * o.m21,
            self.m10 * o.m02 + self.m11 * o.m12 + self.m12 * o.m22,
            self.m20 * o.m00 + self.m21 * o.m10 + self.m22 * o.m20,
            self.m20 * o.m01 + self.m21 * o.m11 + self.m22 * o.m21,
            self.m20 * o.m02 + self.m21 * o.m12 + self.m22 * o.m22,
        )
    }

    #[must_use]
    pub fn mult_vector(&self, v: &Vector3d) -> Vector3d {
        Vector3d::new(
            self.m00 * v.x + self.m01 * v.y + self.m02 * v.z,
            self.m10 * v.x + self.m11 * v.y + self.m12 * v.z,
            self.m20 * v.x + self.m21 * v.y + self.m22 * v.z,
        )
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
        std::mem::swap(&mut self.m02, &mut self.m20);
        std::mem::swap(&mut self.m12, &mut self.m21);
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

    /// Rotation of `angle` radians about `axis`.
    ///
    /// Normalizes a copy of `axis` first; hot paths that already hold a unit
    /// axis should call [`from_angle_normal_axis`](Self::from_angle_normal_axis).
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: &Vector3d) -> Self {
        Self::from_angle_normal_axis(angle, &axis.normalized())
    }

    /// Rotation of `angle` radians about a unit `axis` (Rodrigues' formula).
    #[must_use]
    pub fn from_angle_normal_axis(angle: f64, axis: &Vector3d) -> Self {
        let (sin, cos) = angle.sin_cos();
        let one_minus_cos = 1.0 - cos;
        let xym = axis.x * axis.y * one_minus_cos;
        let xzm = axis.x * axis.z * one_minus_cos;
        let yzm = axis.y * axis.z * one_minus_cos;
        let x_sin = axis.x * sin;
        let y_sin = axis.y * sin;
        let z_sin = axis.z * sin;

        Self::new(
            axis.x * axis.x * one_minus_cos + cos,
            xym - z_sin,
            xzm + y_sin,
            xym + z_sin,
            axis.y * axis.y * one_minus_cos + cos,
            yzm - x_sin,
            xzm - y_sin,
            yzm + x_sin,
            axis.z * axis.z * one_minus_cos + cos,
        )
    }

    /// Minimal rotation taking unit vector `start` onto unit vector `end`.
    #[must_use]
    pub fn from_start_end_vectors(start: &Vector3d, end: &Vector3d) -> Self {
        let v = start.cross(end);
        let e = start.dot(end);

        if e.abs() > 1.0 - PARALLEL_EPSILON {
            // `1 / (1 + e)` blows up here; reflect twice through an axis
            // that is far from both vectors instead.
            tracing::trace!(dot = e, "near-parallel start/end vectors");
            let a = start.abs();
            let axis = if a.x < a.y {
                if a.x < a.z {
                    Vector3d::UNIT_X
                } else {
                    Vector3d::UNIT_Z
                }
            } else if a.y < a.z {
                Vector3d::UNIT_Y
            } else {
                Vector3d::UNIT_Z
            };

            let u = (axis - *start).to_array();
            let w = (axis - *end).to_array();
            let c1 = 2.0 / dot3(&u, &u);
            let c2 = 2.0 / dot3(&w, &w);
            let c3 = c1 * c2 * dot3(&u, &w);

            let mut rows = [[0.0; 3]; 3];
            for i in 0..3 {
                for j in 0..3 {
                    rows[i][j] = -c1 * u[i] * u[j] - c2 * w[i] * w[j] + c3 * w[i] * u[j];
                }
                rows[i][i] += 1.0;
            }
            return Self::from_rows(rows);
        }

        let h = 1.0 / (1.0 + e);
        let hvx = h * v.x;
        let hvz = h * v.z;
        let hvxy = hvx * v.y;
        let hvxz = hvx * v.z;
        let hvyz = hvz * v.y;

        Self::new(
            e + hvx * v.x,
            hvxy - v.z,
            hvxz + v.y,
            hvxy + v.z,
            e + h * v.y * v.y,
            hvyz - v.x,
            hvxz - v.y,
            hvyz + v.x,
            e + hvz * v.z,
        )
    }

    /// Converts a rotation matrix to a quaternion.
    ///
    /// Branches on the trace and the largest diagonal element so the square
    /// root argument never approaches zero.
    #[must_use]
    pub fn to_quaternion(&self) -> Quaternion {
        let trace = self.m00 + self.m11 + self.m22;
        if trace >= 0.0 {
            let s = (trace + 1.0).sqrt();
            let w = 0.5 * s;
            let s = 0.5 / s;
            Quaternion::new(
                (self.m21 - self.m12) * s,
                (self.m02 - self.m20) * s,
                (self.m10 - self.m01) * s,
                w,
            )
        } else if self.m00 > self.m11 && self.m00 > self.m22 {
            let s = (1.0 + self.m00 - self.m11 - self.m22).sqrt();
            let x = s * 0.5;
            let s = 0.5 / s;
            Quaternion::new(
                x,
                (self.m10 + self.m01) * s,
                (self.m02 + self.m20) * s,
                (self.m21 - self.m12) * s,
            )
        } else if self.m11 > self.m22 {
            let s = (1.0 + self.m11 - self.m00 - self.m22).sqrt();
            let y = s * 0.5;
            let s = 0.5 / s;
            Quaternion::new(
                (self.m10 + self.m01) * s,
                y,
                (self.m21 + self.m12) * s,
                (self.m02 - self.m20) * s,
            )
        } else {
            let s = (1.0 + self.m22 - self.m00 - self.m11).sqrt();
            let z = s * 0.5;
            let s = 0.5 / s;
            Quaternion::new(
                (self.m02 + self.m20) * s,
                (self.m21 + self.m12) * s,
                z,
                (self.m10 - self.m01) * s,
            )
        }
    }

    /// Embeds this matrix in the upper-left block of a 4x4 transform with no
    /// translation.
    #[must_use]
    pub fn to_matrix4d(&self) -> Matrix4d {
        Matrix4d::from_rotation_translation(self, &Vector3d::ORIGIN)
    }

    /// Projective mapping of the unit square onto `quad`.
    ///
    /// Corners map as `(0,0) -> quad[0]`, `(1,0) -> quad[1]`,
    /// `(1,1) -> quad[2]`, `(0,1) -> quad[3]`. The result must be applied
    /// with [`apply_perspective_transform`](Self::apply_perspective_transform).
    #[must_use]
    pub fn square_to_quad(quad: &[Vector2d; 4]) -> Self {
        let [p0, p1, p2, p3] = *quad;
        let dx3 = p0.x - p1.x + p2.x - p3.x;
        let dy3 = p0.y - p1.y + p2.y - p3.y;

        let (g, h) = if is_zero(dx3) && is_zero(dy3) {
            // parallelogram: the mapping is affine
            (0.0, 0.0)
        } else {
            let dx1 = p1.x - p2.x;
            let dx2 = p3.x - p2.x;
            let dy1 = p1.y - p2.y;
            let dy2 = p3.y - p2.y;
            let det = dx1 * dy2 - dx2 * dy1;
            if is_zero(det) {
                tracing::debug!("degenerate quadrilateral in square_to_quad");
                return Self::ZERO;
            }
            ((dx3 * dy2 - dx2 * dy3) / det, (dx1 * dy3 - dx3 * dy1) / det)
        };

        Self::new(
            p1.x - p0.x + g * p1.x,
            p3.x - p0.x + h * p3.x,
            p0.x,
            p1.y - p0.y + g * p1.y,
            p3.y - p0.y + h * p3.y,
            p0.y,
            g,
            h,
            1.0,
        )
    }

    /// Projective mapping of `quad` onto the unit square; the inverse of
    /// [`square_to_quad`](Self::square_to_quad) up to scale.
    #[must_use]
    pub fn quad_to_square(quad: &[Vector2d; 4]) -> Self {
        Self::square_to_quad(quad).adjoint()
    }

    /// Projective mapping taking each corner of `from` to the matching
    /// corner of `to`.
    ///
    /// Plain [`mult_vector`](Self::mult_vector) gives meaningless results on
    /// this matrix; use [`apply_perspective_transform`](Self::apply_perspective_transform).
    #[must_use]
    pub fn quad_to_quad(from: &[Vector2d; 4], to: &[Vector2d; 4]) -> Self {
        Self::square_to_quad(to).mult(&Self::quad_to_square(from))
    }

    /// Applies this matrix as a 2D projective transform, including the
    /// homogeneous divide.
    #[must_use]
    pub fn apply_perspective_transform(&self, point: &Vector2d) -> Vector2d {
        let x = self.m00 * point.x + self.m01 * point.y + self.m02;
        let y = self.m10 * point.x + self.m11 * point.y + self.m12;
        let w = self.m20 * point.x + self.m21 * point.y + self.m22;
        Vector2d::new(x / w, y / w)
    }
}

fn dot3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

impl PartialEq for Matrix3d {
    fn eq(&self, other: &Self) -> bool {
        self.to_array(MajorOrder::Row)
            .iter()
            .zip(other.to_array(MajorOrder::Row).iter())
            .all(|(a, b)| approx_eq(*a, *b))
    }
}

impl Mul for Matrix3d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mult(&rhs)
    }
}

impl Mul<Vector3d> for Matrix3d {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        self.mult_vector(&rhs)
    }
}

impl Add for Matrix3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let a = self.to_array(MajorOrder::Row);
        let b = rhs.to_array(MajorOrder::Row);
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = std::array::from_fn(|i| a[i] + b[i]);
        Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22)
    }
}
