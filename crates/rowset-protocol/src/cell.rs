//! Cell tags and cell payload writers.
//!
//! Every cell starts with one tag byte. The tag alone determines the payload
//! shape, so a cell never spans a row boundary and the decoder needs no
//! per-column type information to walk the stream.

use bytes::BufMut;

use crate::codec::checked_u32;
use crate::error::ProtocolError;

/// Cell kind identifiers.
///
/// The numeric values are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellTag {
    /// NULL, no payload.
    Null = 0,
    /// Boolean false, no payload.
    False = 1,
    /// Boolean true, no payload.
    True = 2,
    /// 8-byte IEEE-754 double.
    Float64 = 3,
    /// 8-byte two's-complement integer.
    Int64 = 4,
    /// 4-byte index into the intern table.
    StringRef = 5,
    /// 4-byte length followed by raw bytes.
    Bytes = 6,
}

impl CellTag {
    /// Create a cell tag from a raw byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            1 => Some(Self::False),
            2 => Some(Self::True),
            3 => Some(Self::Float64),
            4 => Some(Self::Int64),
            5 => Some(Self::StringRef),
            6 => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Payload size in bytes for fixed-width tags.
    ///
    /// `Bytes` is variable-width and returns `None`.
    #[must_use]
    pub const fn payload_len(&self) -> Option<usize> {
        match self {
            Self::Null | Self::False | Self::True => Some(0),
            Self::Float64 | Self::Int64 => Some(8),
            Self::StringRef => Some(4),
            Self::Bytes => None,
        }
    }

    /// Tag for a boolean value.
    #[must_use]
    pub const fn for_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

/// Write a NULL cell.
pub fn put_null(dst: &mut impl BufMut) {
    dst.put_u8(CellTag::Null as u8);
}

/// Write a boolean cell.
pub fn put_bool(dst: &mut impl BufMut, value: bool) {
    dst.put_u8(CellTag::for_bool(value) as u8);
}

/// Write a Float64 cell.
pub fn put_f64(dst: &mut impl BufMut, value: f64) {
    dst.put_u8(CellTag::Float64 as u8);
    dst.put_f64_le(value);
}

/// Write an Int64 cell.
pub fn put_i64(dst: &mut impl BufMut, value: i64) {
    dst.put_u8(CellTag::Int64 as u8);
    dst.put_i64_le(value);
}

/// Write a StringRef cell.
pub fn put_string_ref(dst: &mut impl BufMut, index: u32) {
    dst.put_u8(CellTag::StringRef as u8);
    dst.put_u32_le(index);
}

/// Write a Bytes cell.
///
/// Nothing is written when the length does not fit the `u32` prefix.
pub fn put_bytes(dst: &mut impl BufMut, value: &[u8]) -> Result<(), ProtocolError> {
    let len = checked_u32("byte cell", value.len())?;
    dst.put_u8(CellTag::Bytes as u8);
    dst.put_u32_le(len);
    dst.put_slice(value);
    Ok(())
}
