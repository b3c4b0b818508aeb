//! Wire-level error types.

use thiserror::Error;

/// Errors raised while reading or writing the row-set wire format.
///
/// Every decode-side variant means the producer and the consumer disagree on
/// the layout. None of them are recoverable within a single decode call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// A read would have consumed bytes past the end of the buffer.
    #[error("truncated buffer at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedBuffer {
        /// Byte offset where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// A cell tag byte did not match any known cell kind.
    #[error("invalid cell tag {tag} at offset {offset}")]
    InvalidTag {
        /// The offending tag byte.
        tag: u8,
        /// Byte offset of the tag.
        offset: usize,
    },

    /// A string reference pointed past the end of the intern table.
    #[error("string reference {index} out of range (table has {table_len} entries) at offset {offset}")]
    DanglingStringRef {
        /// The referenced index.
        index: u32,
        /// Number of entries in the intern table.
        table_len: u32,
        /// Byte offset of the cell payload.
        offset: usize,
    },

    /// A column name or interned string was not valid UTF-8.
    ///
    /// Only raised when strict UTF-8 checking is enabled; the lenient path
    /// substitutes U+FFFD instead.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the string payload.
        offset: usize,
    },

    /// A value is too large for the length prefix the format allots to it.
    #[error("{what} length {len} exceeds wire maximum {max}")]
    LengthOverflow {
        /// What was being written.
        what: &'static str,
        /// Actual length.
        len: usize,
        /// Largest length the prefix can carry.
        max: usize,
    },
}

impl ProtocolError {
    /// Check if this error is a truncation.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedBuffer { .. })
    }

    /// Byte offset the error refers to, if it came from the decode side.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedBuffer { offset, .. }
            | Self::InvalidTag { offset, .. }
            | Self::DanglingStringRef { offset, .. }
            | Self::InvalidUtf8 { offset } => Some(*offset),
            Self::LengthOverflow { .. } => None,
        }
    }
}
