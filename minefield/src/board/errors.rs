//! Errors used by the [`Grid`][crate::board::Grid].

use thiserror::Error;

use crate::dynarr::DynArrError;

/// Error returned when a row could not be added to a grid.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum GridError {
    /// The row's length didn't match the column count of the rows already in the grid.
    #[error("row has {found} columns but the grid has {expected}")]
    RowLength {
        /// Column count of the grid.
        expected: usize,
        /// Length of the rejected row.
        found: usize,
    },

    /// The row index was out of range.
    #[error(transparent)]
    Array(#[from] DynArrError),
}
