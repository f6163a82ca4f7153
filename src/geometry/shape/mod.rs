mod circle;
mod ellipsoid;
mod rectangular_cylinder;
mod sphere;

pub use circle::Circle;
pub use ellipsoid::Ellipsoid;
pub use rectangular_cylinder::RectangularCylinder;
pub use sphere::Sphere;

use crate::math::scalar::is_zero;
use crate::math::Vector3d;

use super::Ray3d;

/// A closed solid in model space.
pub trait Shape {
    fn center(&self) -> Vector3d;

    /// Whether `point` is inside or on the boundary.
    fn contains(&self, point: &Vector3d) -> bool;

    /// Where the line carrying `ray` enters the shape.
    ///
    /// The entry point is the smaller ray parameter and may lie behind the
    /// origin. Tangent rays and misses return `None`.
    fn get_intersection(&self, ray: &Ray3d) -> Option<Vector3d>;

    /// Outward unit normal of the surface nearest to `point`.
    fn normal_at(&self, point: &Vector3d) -> Vector3d;
}

/// Entry parameter of a unit-sphere hit for `origin + t * direction`.
///
/// `direction` need not be normalized. Returns `None` unless the
/// discriminant is strictly positive.
pub(crate) fn unit_sphere_entry(origin: &Vector3d, direction: &Vector3d) -> Option<f64> {
    let a = direction.length_squared();
    let b = 2.0 * origin.dot(direction);
    let c = origin.length_squared() - 1.0;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 || is_zero(a) {
        return None;
    }
    Some((-b - discriminant.sqrt()) / (2.0 * a))
}
