//! Error types for sparsestack

use crate::coords::Axis;
use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using sparsestack's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by stacked sparse array operations.
///
/// Every operation validates before it mutates, so any of these leaves the
/// array it was raised on untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Join mode string other than left/right/inner/outer
    #[error("Unsupported join mode '{0}', expected one of 'left', 'right', 'inner', 'outer'")]
    UnsupportedJoinMode(String),

    /// Comparison operator string other than >, <, >=, <=
    #[error("Unknown relation {0}")]
    UnknownOperator(String),

    /// Partial ranges and other key shapes outside the supported access patterns
    #[error("Wrong slicing, or option not yet implemented")]
    SlicingNotImplemented,

    /// Integer index outside `[-len, len)`
    #[error("Index ({index}) out of range")]
    IndexOutOfRange { index: i128, len: usize },

    /// Incoming coordinates beyond the declared shape
    #[error("{axis} values have dimension larger than sparse stack ({max} >= {bound})")]
    BoundsExceeded { axis: Axis, max: i64, bound: usize },

    /// Dense input larger than the declared shape, or fields of unequal shape
    #[error("Dense array of shape {got:?} does not fit expected shape {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Parallel sequences of unequal length
    #[error("{what} must have equal length: expected {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Negative coordinate in incoming triplets
    #[error("Coordinate indices must be non-negative, got {0}")]
    NegativeIndex(i64),

    /// Coordinate index that does not fit the i64 index type
    #[error("Coordinate index overflows the i64 index type")]
    IndexOverflow,

    /// The same (row, col) listed twice in one batch
    #[error("Duplicate coordinate ({row}, {col})")]
    DuplicateCoordinate { row: i64, col: i64 },

    /// A layer of this name already exists
    #[error("Layer '{0}' already exists")]
    DuplicateLayer(String),

    /// A single unnamed layer was added without a name
    #[error("A layer name is required for single-valued data")]
    LayerNameRequired,

    /// Name lookup against an array with zero layers
    #[error("Array is empty.")]
    EmptyArray,

    /// Name lookup that cannot be resolved because several layers exist
    #[error("Name of score is required.")]
    NameRequired,

    #[error("Unknown layer '{0}'")]
    UnknownLayer(String),

    #[error("DType mismatch: expected {expected}, got {got}")]
    DTypeMismatch { expected: DType, got: DType },

    /// Permanently unsupported operation
    #[error("{0} is not supported")]
    NotSupported(&'static str),
}

impl Error {
    /// Create a length mismatch error
    #[must_use]
    pub const fn length_mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            got,
        }
    }

    /// Create an out-of-range index error
    #[must_use]
    pub const fn out_of_range(index: i128, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
