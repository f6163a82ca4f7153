mod line2d;
mod line_segment2d;
mod plane;
mod ray2d;
mod ray3d;
pub mod shape;

pub use line2d::Line2d;
pub use line_segment2d::LineSegment2d;
pub use plane::Plane;
pub use ray2d::Ray2d;
pub use ray3d::Ray3d;
pub use shape::{Circle, Ellipsoid, RectangularCylinder, Shape, Sphere};

use crate::math::scalar::{is_zero_eps, same_sign, DBL_EPSILON, DBL_LARGE_EPSILON};

/// Classification of a point relative to a line or plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// On the side the normal points to.
    Front,
    /// On the side opposite the normal.
    Back,
    /// On the line or plane (within tolerance).
    On,
}

impl Side {
    pub(crate) fn of(signed_distance: f64) -> Self {
        if signed_distance > DBL_EPSILON {
            Self::Front
        } else if signed_distance < -DBL_EPSILON {
            Self::Back
        } else {
            Self::On
        }
    }
}

/// Result of intersecting a line segment with a line or plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<V> {
    /// Both endpoints are strictly on the same side.
    None,
    /// A single shared point: an endpoint that touches, or the crossing.
    Point(V),
    /// The whole segment lies on the line or plane; holds both endpoints.
    Coincident(V, V),
}

impl<V: Copy> SegmentIntersection<V> {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The crossing point, or the segment start when coincident.
    #[must_use]
    pub fn first_point(&self) -> Option<V> {
        match *self {
            Self::None => None,
            Self::Point(p) | Self::Coincident(p, _) => Some(p),
        }
    }

    #[must_use]
    pub fn points(&self) -> Vec<V> {
        match *self {
            Self::None => Vec::new(),
            Self::Point(p) => vec![p],
            Self::Coincident(a, b) => vec![a, b],
        }
    }
}

/// Four-way endpoint classification shared by [`Line2d`] and [`Plane`].
///
/// `d0` and `d1` are the signed distances of `begin` and `end`; endpoints
/// within [`DBL_LARGE_EPSILON`] count as lying on the line or plane.
pub(crate) fn classify_segment<V: Copy>(
    begin: V,
    end: V,
    d0: f64,
    d1: f64,
    interpolate: impl Fn(f64) -> V,
) -> SegmentIntersection<V> {
    let on_begin = is_zero_eps(d0, DBL_LARGE_EPSILON);
    let on_end = is_zero_eps(d1, DBL_LARGE_EPSILON);
    match (on_begin, on_end) {
        (true, true) => SegmentIntersection::Coincident(begin, end),
        (true, false) => SegmentIntersection::Point(begin),
        (false, true) => SegmentIntersection::Point(end),
        (false, false) if !same_sign(d0, d1) => {
            SegmentIntersection::Point(interpolate(d0 / (d0 - d1)))
        }
        (false, false) => SegmentIntersection::None,
    }
}
