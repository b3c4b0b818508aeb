//! Type conversion error types.

use thiserror::Error;

/// Errors that can occur when extracting or formatting values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeError {
    /// Value is null when non-null was expected.
    #[error("unexpected null value")]
    UnexpectedNull,

    /// Type mismatch during conversion.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Expected type name.
        expected: &'static str,
        /// Actual type name.
        actual: &'static str,
    },

    /// Value is out of range for target type.
    #[error("value out of range for {target_type}")]
    OutOfRange {
        /// Target type name.
        target_type: &'static str,
    },

    /// No column with the requested name.
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Column index past the end of the row.
    #[error("column index {index} out of bounds (row has {len} columns)")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of columns.
        len: usize,
    },
}
