use thiserror::Error;

/// Top-level error type for the Geolis math core.
#[derive(Debug, Error)]
pub enum MathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Caller errors detected by vector, matrix and shape operations.
///
/// Degenerate-but-valid geometry (parallel rays, singular matrices,
/// zero-length normalization) is never reported through this type.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f64 },

    #[error("{what} must have {expected} elements, got {actual}")]
    WrongLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("index ({row}, {column}) is out of range for a {size}x{size} matrix")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        size: usize,
    },

    #[error("line segment has zero length")]
    ZeroLengthSegment,

    #[error("zero-length vector")]
    ZeroVector,

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Convenience type alias for results using [`MathError`].
pub type Result<T> = std::result::Result<T, MathError>;
