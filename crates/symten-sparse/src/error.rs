//! Error types for symmetric sparse tensors
//!
//! Every error here signals a violated precondition or invariant, never a
//! transient condition, so none of them is retriable. All checks run before
//! any mutation: a rejected call leaves the tensor unchanged.
//!
//! # Design
//!
//! - **`SparseError`**: top-level enum returned by every fallible entry point
//! - **`RangeError`**: a row or coordinate outside its declared bound
//! - **`ShapeError`**: key length or operand shape mismatch
//!
//! # Examples
//!
//! ```
//! use symten_sparse::error::{RangeError, SparseError};
//!
//! let err: SparseError = RangeError::Row { row: 4, nrows: 3 }.into();
//! assert!(matches!(err, SparseError::Range(_)));
//! assert_eq!(err.to_string(), "Range error: row 4 outside [0, 3)");
//! ```

use symten_core::MultiIndex;
use thiserror::Error;

/// Top-level error type for sparse tensor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SparseError {
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// A second insertion at an identical `(key, row)`
    #[error("Duplicate entry at key {key}, row {row}")]
    DuplicateEntry { key: MultiIndex, row: usize },

    #[error("Non-finite value inserted at key {key}, row {row}")]
    NonFiniteValue { key: MultiIndex, row: usize },

    /// A folded tensor received a key that is not ascending
    #[error("Key {key} is not sorted ascending")]
    Ordering { key: MultiIndex },

    /// Worker threads for a parallel fill could not be run
    #[error("Execution error: {0}")]
    Execution(String),
}

/// A row or coordinate outside its declared bound
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("row {row} outside [0, {nrows})")]
    Row { row: usize, nrows: usize },

    #[error("key {key} has a coordinate outside [0, {nvar})")]
    Coordinate { key: MultiIndex, nvar: usize },

    #[error("key {key} is not strictly below extents {extents}")]
    Extent { key: MultiIndex, extents: MultiIndex },

    #[error("group {group} selected but only {ngroups} groups exist")]
    Group { group: usize, ngroups: usize },
}

/// Key length or operand shape mismatch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("key {key} has length {got}, expected {expected}")]
    KeyLength {
        key: MultiIndex,
        expected: usize,
        got: usize,
    },

    #[error("operand has dimension {got}, expected {expected}")]
    OperandDimension { expected: usize, got: usize },

    #[error("operand must have exactly one column, got {got}")]
    OperandColumns { got: usize },

    #[error("output vector has length {got}, expected {expected}")]
    OutputLength { expected: usize, got: usize },

    #[error("{what} has length {got}, expected {expected}")]
    Descriptor {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Result type alias for sparse tensor operations
pub type SparseResult<T> = Result<T, SparseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_display() {
        let err = RangeError::Coordinate {
            key: MultiIndex::from([0, 3]),
            nvar: 3,
        };
        assert_eq!(err.to_string(), "key [0 3] has a coordinate outside [0, 3)");
    }

    #[test]
    fn test_shape_error_from() {
        let err: SparseError = ShapeError::OperandColumns { got: 2 }.into();
        assert!(matches!(err, SparseError::Shape(ShapeError::OperandColumns { got: 2 })));
        assert_eq!(
            err.to_string(),
            "Shape error: operand must have exactly one column, got 2"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let err = SparseError::DuplicateEntry {
            key: MultiIndex::from([0, 0]),
            row: 1,
        };
        assert_eq!(err.to_string(), "Duplicate entry at key [0 0], row 1");
    }
}
