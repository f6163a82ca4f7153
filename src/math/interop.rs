//! Conversions to and from `nalgebra` types, for handing data to
//! nalgebra-based collaborators.

use super::matrix3d::Matrix3d;
use super::matrix4d::Matrix4d;
use super::quaternion::Quaternion;
use super::vector2d::Vector2d;
use super::vector3d::Vector3d;

impl From<Vector2d> for nalgebra::Vector2<f64> {
    fn from(v: Vector2d) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2d {
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector3d> for nalgebra::Vector3<f64> {
    fn from(v: Vector3d) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3d {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3d> for nalgebra::Point3<f64> {
    fn from(v: Vector3d) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Point3<f64>> for Vector3d {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Matrix3d> for nalgebra::Matrix3<f64> {
    fn from(m: Matrix3d) -> Self {
        Self::new(m.m00, m.m01, m.m02, m.m10, m.m11, m.m12, m.m20, m.m21, m.m22)
    }
}

impl From<nalgebra::Matrix3<f64>> for Matrix3d {
    fn from(m: nalgebra::Matrix3<f64>) -> Self {
        Self::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        )
    }
}

impl From<Matrix4d> for nalgebra::Matrix4<f64> {
    fn from(m: Matrix4d) -> Self {
        let r = m.to_rows();
        Self::from_fn(|i, j| r[i][j])
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4d {
    fn from(m: nalgebra::Matrix4<f64>) -> Self {
        Self::from_rows(std::array::from_fn(|i| std::array::from_fn(|j| m[(i, j)])))
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f64> {
    fn from(q: Quaternion) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f64>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl From<Quaternion> for nalgebra::UnitQuaternion<f64> {
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(q.into())
    }
}
