//! Error types surfaced by the fixed-capacity containers.

use crate::alloc::AllocError;
use thiserror::Error;

/// Returned by the checked accessors when `index >= len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for storage of length {len}")]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// The container's length.
    pub len: usize,
}

/// Returned when an operation needs two containers of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("length mismatch: {left} != {right}")]
pub struct LengthMismatch {
    /// Length of the receiver.
    pub left: usize,
    /// Length of the argument.
    pub right: usize,
}

/// Failure to acquire storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    /// `len * size_of::<T>()` does not fit in an `isize`.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The allocator refused the request; its error is passed through as-is.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
