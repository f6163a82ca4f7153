use crate::math::Vector2d;

use super::{Line2d, LineSegment2d, SegmentIntersection};

/// A 2D ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2d {
    origin: Vector2d,
    direction: Vector2d,
}

impl Ray2d {
    /// Creates a ray; `direction` is normalized.
    #[must_use]
    pub fn new(origin: Vector2d, direction: Vector2d) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> Vector2d {
        self.origin
    }

    #[must_use]
    pub fn direction(&self) -> Vector2d {
        self.direction
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Vector2d {
        self.origin + self.direction * t
    }

    /// The line carrying this ray; its normal is left of the direction.
    #[must_use]
    pub fn to_line(&self) -> Line2d {
        Line2d::new(self.origin, self.direction.perpendicular())
    }

    /// See [`Line2d::get_intersection`].
    #[must_use]
    pub fn get_intersection(&self, line: &Line2d) -> Option<Vector2d> {
        line.get_intersection(self)
    }

    /// Classifies `segment` against the line carrying this ray.
    #[must_use]
    pub fn segment_intersection(&self, segment: &LineSegment2d) -> SegmentIntersection<Vector2d> {
        self.to_line().segment_intersection(&segment.start(), &segment.end())
    }
}
