use crate::error::{GeometryError, Result};

/// Element order used when a matrix is flattened to or read from an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MajorOrder {
    /// Rows are contiguous: `m00, m01, m02, m10, ...`.
    #[default]
    Row,
    /// Columns are contiguous: `m00, m10, m20, m01, ...`, the layout
    /// graphics pipelines expect.
    Column,
}

/// Flat index of `(row, column)` in an `n x n` array of the given order.
#[inline]
pub(crate) fn flat_index(row: usize, column: usize, n: usize, order: MajorOrder) -> usize {
    match order {
        MajorOrder::Row => row * n + column,
        MajorOrder::Column => column * n + row,
    }
}

pub(crate) fn check_index(row: usize, column: usize, size: usize) -> Result<()> {
    if row >= size || column >= size {
        return Err(GeometryError::IndexOutOfRange { row, column, size }.into());
    }
    Ok(())
}

pub(crate) fn check_len(what: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(GeometryError::WrongLength {
            what,
            expected,
            actual: values.len(),
        }
        .into());
    }
    Ok(())
}

/// Reads `N * N` values starting at `offset` from `buffer`, reordered to
/// row-major.
pub(crate) fn read_row_major<const L: usize>(
    what: &'static str,
    buffer: &[f64],
    offset: usize,
    n: usize,
    order: MajorOrder,
) -> Result<[f64; L]> {
    let end = offset.saturating_add(L);
    let Some(slice) = buffer.get(offset..end) else {
        return Err(GeometryError::WrongLength {
            what,
            expected: end,
            actual: buffer.len(),
        }
        .into());
    };
    let mut out = [0.0; L];
    for row in 0..n {
        for column in 0..n {
            out[row * n + column] = slice[flat_index(row, column, n, order)];
        }
    }
    Ok(out)
}

/// Reorders a row-major array into `order`.
pub(crate) fn from_row_major<const L: usize>(values: [f64; L], n: usize, order: MajorOrder) -> [f64; L] {
    match order {
        MajorOrder::Row => values,
        MajorOrder::Column => {
            let mut out = [0.0; L];
            for row in 0..n {
                for column in 0..n {
                    out[flat_index(row, column, n, order)] = values[row * n + column];
                }
            }
            out
        }
    }
}

/// Narrows to `f32` for upload to a graphics pipeline.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn narrow<const L: usize>(values: [f64; L]) -> [f32; L] {
    values.map(|v| v as f32)
}

/// Appends the native-endian bytes of `values` to `out`.
pub(crate) fn extend_bytes(out: &mut Vec<u8>, values: &[f32]) {
    out.extend_from_slice(bytemuck::cast_slice(values));
}
