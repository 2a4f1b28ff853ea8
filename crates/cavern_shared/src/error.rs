//! # Grid Error Types

use thiserror::Error;

/// Errors raised while constructing a [`Grid`](crate::Grid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has zero width or zero height.
    #[error("grid is empty: {width}x{height}")]
    Empty {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A row has a different length than the first row.
    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A cell value other than 0 (open) or 1 (solid).
    #[error("invalid cell value {value}, expected 0 or 1")]
    InvalidCell {
        /// The rejected value.
        value: u8,
    },

    /// An ASCII map character other than `#` or `.`.
    #[error("invalid map character {0:?}, expected '#' or '.'")]
    InvalidChar(char),
}

/// Result type for grid construction.
pub type GridResult<T> = Result<T, GridError>;
