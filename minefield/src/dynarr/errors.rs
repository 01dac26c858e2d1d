//! Errors returned by [`DynArr`][crate::dynarr::DynArr].

use thiserror::Error;

/// Reason an operation on a [`DynArr`][crate::dynarr::DynArr] was refused. The array is
/// left untouched whenever one of these is returned.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum DynArrError {
    /// The index was outside the range valid for the operation. For `insert` that range
    /// is `[0, size]`, for everything else it is `[0, size)`.
    #[error("Index: {index} out of bounds!")]
    IndexOutOfBounds {
        /// The index that was requested.
        index: usize,
        /// Size of the array at the time of the request.
        size: usize,
    },

    /// An explicit capacity was requested that is smaller than the minimum capacity.
    #[error("Capacity must be at least {min}!")]
    CapacityTooSmall {
        /// The capacity that was requested.
        requested: usize,
        /// The smallest capacity an array may have.
        min: usize,
    },
}

impl DynArrError {
    pub(super) fn out_of_bounds(index: usize, size: usize) -> Self {
        DynArrError::IndexOutOfBounds { index, size }
    }
}
