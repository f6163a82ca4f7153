use std::fmt::Debug;

/// Operations shared by every vector type in the crate.
///
/// Each vector type implements this trait for itself only, so distances and
/// dot products are defined between two vectors of the same type and a
/// mixed-type call does not compile.
pub trait Vector: Copy + PartialEq + Debug {
    /// Dot product with `other`.
    fn dot(&self, other: &Self) -> f64;

    /// Squared distance between `self` and `other`.
    fn distance_squared(&self, other: &Self) -> f64;

    /// Returns `true` if every component is finite (no NaN or infinity).
    fn is_finite(&self) -> bool;

    /// Squared Euclidean length.
    fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Distance between `self` and `other`.
    fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}
