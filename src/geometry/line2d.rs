use crate::math::scalar::is_zero;
use crate::math::Vector2d;

use super::{classify_segment, Ray2d, SegmentIntersection, Side};

/// An infinite 2D line through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2d {
    point: Vector2d,
    normal: Vector2d,
}

impl Line2d {
    /// Creates a line; `normal` is normalized.
    #[must_use]
    pub fn new(point: Vector2d, normal: Vector2d) -> Self {
        Self {
            point,
            normal: normal.normalized(),
        }
    }

    /// The line through `a` and `b`, with the normal pointing to the left of `b - a`.
    #[must_use]
    pub fn from_points(a: Vector2d, b: Vector2d) -> Self {
        Self::new(a, (b - a).perpendicular())
    }

    #[must_use]
    pub fn point(&self) -> Vector2d {
        self.point
    }

    #[must_use]
    pub fn normal(&self) -> Vector2d {
        self.normal
    }

    /// Unit direction along the line.
    #[must_use]
    pub fn direction(&self) -> Vector2d {
        -self.normal.perpendicular()
    }

    /// Positive on the side the normal points to.
    #[must_use]
    pub fn signed_distance(&self, p: &Vector2d) -> f64 {
        self.normal.dot(&(*p - self.point))
    }

    #[must_use]
    pub fn distance(&self, p: &Vector2d) -> f64 {
        self.signed_distance(p).abs()
    }

    #[must_use]
    pub fn side(&self, p: &Vector2d) -> Side {
        Side::of(self.signed_distance(p))
    }

    #[must_use]
    pub fn project_point(&self, p: &Vector2d) -> Vector2d {
        *p - self.normal * self.signed_distance(p)
    }

    /// Intersection with the infinite line carrying `ray`.
    ///
    /// Returns `None` when the ray runs parallel to this line.
    #[must_use]
    pub fn get_intersection(&self, ray: &Ray2d) -> Option<Vector2d> {
        let denom = self.normal.dot(&ray.direction());
        if is_zero(denom) {
            return None;
        }
        let t = self.normal.dot(&(self.point - ray.origin())) / denom;
        Some(ray.point_at(t))
    }

    /// Classifies the segment `begin..end` against this line.
    #[must_use]
    pub fn segment_intersection(&self, begin: &Vector2d, end: &Vector2d) -> SegmentIntersection<Vector2d> {
        classify_segment(
            *begin,
            *end,
            self.signed_distance(begin),
            self.signed_distance(end),
            |t| begin.interpolate(end, t),
        )
    }

    /// Whether the segment touches or crosses this line.
    #[must_use]
    pub fn has_intersection(&self, begin: &Vector2d, end: &Vector2d) -> bool {
        !self.segment_intersection(begin, end).is_none()
    }

    /// The points shared with the segment: empty, one point, or both
    /// endpoints when the segment lies on the line.
    #[must_use]
    pub fn get_intersection_segment(&self, begin: &Vector2d, end: &Vector2d) -> Vec<Vector2d> {
        self.segment_intersection(begin, end).points()
    }
}
