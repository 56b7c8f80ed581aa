//! Error types

use std::fmt;

/// Error details for constructing a grid structure with invalid dimensions
///
/// This is the only error the structure reports. Coordinates passed to updates
/// and queries are clamped instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum InvalidDimension {
    /// The grid has no rows
    EmptyRows,
    /// The grid has no columns
    EmptyColumns,
    /// A row's length differs from the width given by the first row
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Length of the offending row
        len: usize,
        /// Expected length (the grid's width)
        expected: usize,
    },
}

impl fmt::Display for InvalidDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidDimension::EmptyRows => f.write_str("the grid must have at least one row"),
            InvalidDimension::EmptyColumns => f.write_str("the grid must have at least one column"),
            InvalidDimension::RaggedRow { row, len, expected } => write!(
                f,
                "row {row} has {len} columns, but the grid is {expected} columns wide"
            ),
        }
    }
}
impl std::error::Error for InvalidDimension {}

impl From<InvalidDimension> for std::io::Error {
    fn from(err: InvalidDimension) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}

/// Check that `grid` is a non-empty rectangle and return its `(height, width)`
pub fn check_dimensions<T, R: AsRef<[T]>>(
    grid: &[R],
) -> Result<(usize, usize), InvalidDimension> {
    let Some(first) = grid.first() else {
        return Err(InvalidDimension::EmptyRows);
    };
    let width = first.as_ref().len();
    if width == 0 {
        return Err(InvalidDimension::EmptyColumns);
    }
    for (row, r) in grid.iter().enumerate().skip(1) {
        let len = r.as_ref().len();
        if len != width {
            return Err(InvalidDimension::RaggedRow {
                row,
                len,
                expected: width,
            });
        }
    }
    Ok((grid.len(), width))
}
