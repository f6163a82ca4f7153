use crate::error::{GeometryError, Result};
use crate::math::scalar::{is_zero, DBL_LARGE_EPSILON};
use crate::math::Vector2d;

use super::Line2d;

/// A finite 2D segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment2d {
    start: Vector2d,
    end: Vector2d,
}

impl LineSegment2d {
    #[must_use]
    pub fn new(start: Vector2d, end: Vector2d) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> Vector2d {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Vector2d {
        self.end
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    #[must_use]
    pub fn midpoint(&self) -> Vector2d {
        self.start.interpolate(&self.end, 0.5)
    }

    /// Unit vector from start to end; zero for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2d {
        (self.end - self.start).normalized()
    }

    /// Unit normal, counter-clockwise from [`direction`](Self::direction).
    #[must_use]
    pub fn normal(&self) -> Vector2d {
        self.direction().perpendicular()
    }

    #[must_use]
    pub fn closest_point(&self, p: &Vector2d) -> Vector2d {
        let d = self.end - self.start;
        let len_sq = d.length_squared();
        if is_zero(len_sq) {
            return self.start;
        }
        let t = (d.dot(&(*p - self.start)) / len_sq).clamp(0.0, 1.0);
        self.start + d * t
    }

    #[must_use]
    pub fn distance_to_point(&self, p: &Vector2d) -> f64 {
        self.closest_point(p).distance(p)
    }

    fn is_degenerate(&self) -> bool {
        is_zero(self.start.distance_squared(&self.end))
    }

    /// Whether the two segments touch or cross.
    ///
    /// Each segment must straddle (or touch) the line carrying the other.
    /// Collinear segments always count as intersecting, overlapping or not.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthSegment`] if either segment has
    /// coincident endpoints.
    pub fn segments_intersect(&self, other: &Self) -> Result<bool> {
        if self.is_degenerate() || other.is_degenerate() {
            return Err(GeometryError::ZeroLengthSegment.into());
        }
        let this_line = Line2d::from_points(self.start, self.end);
        let other_line = Line2d::from_points(other.start, other.end);
        Ok(this_line.has_intersection(&other.start, &other.end)
            && other_line.has_intersection(&self.start, &self.end))
    }

    /// The single crossing point of two non-parallel segments.
    ///
    /// Parallel and collinear segments return `None`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Vector2d> {
        let r = self.end - self.start;
        let s = other.end - other.start;
        let denom = r.determinant(&s);
        if is_zero(denom) {
            return None;
        }
        let qp = other.start - self.start;
        let t = qp.determinant(&s) / denom;
        let u = qp.determinant(&r) / denom;
        let within = |x: f64| (-DBL_LARGE_EPSILON..=1.0 + DBL_LARGE_EPSILON).contains(&x);
        (within(t) && within(u)).then(|| self.start + r * t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vector2d {
        Vector2d::new(x, y)
    }

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> LineSegment2d {
        LineSegment2d::new(v(ax, ay), v(bx, by))
    }

    // ── Measures ──

    #[test]
    fn length_midpoint_direction() {
        let s = seg(0.0, 0.0, 3.0, 4.0);
        assert_relative_eq!(s.length(), 5.0);
        assert_eq!(s.midpoint(), v(1.5, 2.0));
        assert_eq!(s.direction(), v(0.6, 0.8));
        assert_eq!(s.normal(), v(-0.8, 0.6));
    }

    #[test]
    fn closest_point_clamps_to_endpoints() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert_eq!(s.closest_point(&v(1.0, 5.0)), v(1.0, 0.0));
        assert_eq!(s.closest_point(&v(-4.0, 1.0)), v(0.0, 0.0));
        assert_relative_eq!(s.distance_to_point(&v(5.0, 4.0)), 5.0);
    }

    // ── Straddle test ──

    #[test]
    fn crossing_segments_intersect() {
        let a = seg(0.0, 0.0, 2.0, 2.0);
        let b = seg(0.0, 2.0, 2.0, 0.0);
        assert!(a.segments_intersect(&b).unwrap());
        assert_eq!(a.intersection(&b).unwrap(), v(1.0, 1.0));
    }

    #[test]
    fn touching_at_endpoint_intersects() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(1.0, 0.0, 1.0, 1.0);
        assert!(a.segments_intersect(&b).unwrap());
        assert_eq!(a.intersection(&b).unwrap(), v(1.0, 0.0));
    }

    #[test]
    fn one_sided_straddle_is_not_enough() {
        // b's line crosses a, but a's line misses b
        let a = seg(0.0, 0.0, 4.0, 0.0);
        let b = seg(2.0, 1.0, 2.0, 3.0);
        assert!(!a.segments_intersect(&b).unwrap());
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a = seg(0.0, 0.0, 4.0, 0.0);
        let b = seg(0.0, 1.0, 4.0, 1.0);
        assert!(!a.segments_intersect(&b).unwrap());
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        let a = seg(1.0, 1.0, 1.0, 1.0);
        let b = seg(0.0, 0.0, 2.0, 2.0);
        let err = a.segments_intersect(&b).unwrap_err();
        assert!(matches!(err, MathError::Geometry(GeometryError::ZeroLengthSegment)));
        assert!(b.segments_intersect(&a).is_err());
    }
}
