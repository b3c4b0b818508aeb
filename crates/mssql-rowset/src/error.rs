//! Row-set error types.

use rowset_protocol::ProtocolError;
use rowset_types::TypeError;
use thiserror::Error;

/// Errors that can occur while decoding or producing a row set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The buffer does not follow the wire layout.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A header count exceeds a limit set in [`DecoderConfig`](crate::DecoderConfig).
    #[error("{what} {value} exceeds configured limit {limit}")]
    LimitExceeded {
        /// Which count was checked.
        what: &'static str,
        /// Value found in the buffer.
        value: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// A row did not have one cell per column.
    #[error("row shape mismatch: expected {expected} cells, got {actual}")]
    RowShape {
        /// Cells per row.
        expected: usize,
        /// Cells actually supplied.
        actual: usize,
    },

    /// A cell was written for a column other than the next one in the row.
    #[error("cell written for column {actual}, expected column {expected}")]
    ColumnOrder {
        /// Next column in row order.
        expected: usize,
        /// Column index the writer supplied.
        actual: usize,
    },

    /// Type conversion or formatting error.
    #[error("type error: {0}")]
    Type(#[from] TypeError),
}

impl Error {
    /// Check if this error indicates a malformed buffer.
    ///
    /// Protocol errors mean the producer and the decoder disagree on the
    /// layout, or the buffer was cut short in transit.
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Check if the buffer ended before decoding finished.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Protocol(e) if e.is_truncation())
    }
}

/// Result type for row-set operations.
pub type Result<T> = std::result::Result<T, Error>;
