mod interop;
pub mod matrix;
pub mod matrix2d;
pub mod matrix3d;
pub mod matrix4d;
pub mod quaternion;
pub mod scalar;
pub mod vector;
pub mod vector2d;
pub mod vector2i;
pub mod vector3d;
pub mod vector3f;

pub use matrix::MajorOrder;
pub use matrix2d::Matrix2d;
pub use matrix3d::Matrix3d;
pub use matrix4d::Matrix4d;
pub use quaternion::Quaternion;
pub use vector::Vector;
pub use vector2d::Vector2d;
pub use vector2i::Vector2i;
pub use vector3d::Vector3d;
pub use vector3f::Vector3f;
