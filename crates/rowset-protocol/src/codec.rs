//! Codec utilities for the row-set wire format.
//!
//! [`WireReader`] is a bounds-checked forward cursor over a borrowed buffer.
//! It never rewinds and reports the byte offset of every failed read. The
//! `put_*` helpers are the write-side counterparts used by the encoder.

use std::borrow::Cow;

use bytes::{Buf, BufMut};

use crate::error::ProtocolError;

/// Column names shorter than this many bytes may take the ASCII fast path.
pub const ASCII_FAST_PATH_LEN: usize = 32;

/// How invalid UTF-8 in names and interned strings is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    /// Replace invalid sequences with U+FFFD.
    #[default]
    Lossy,
    /// Fail with [`ProtocolError::InvalidUtf8`].
    Strict,
}

/// Forward-only reader over a row-set buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            len: buf.len(),
        }
    }

    /// Current byte offset from the start of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.len - self.buf.remaining()
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Check that `needed` bytes are available.
    #[inline]
    pub fn ensure(&self, needed: usize) -> Result<(), ProtocolError> {
        if self.buf.remaining() < needed {
            return Err(ProtocolError::TruncatedBuffer {
                offset: self.offset(),
                needed,
                available: self.buf.remaining(),
            });
        }
        Ok(())
    }

    /// Read one byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Read a little-endian `u16`.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16, ProtocolError> {
        self.ensure(2)?;
        Ok(self.buf.get_u16_le())
    }

    /// Read a little-endian `u32`.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32, ProtocolError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    /// Read a little-endian `i32`.
    #[inline]
    pub fn read_i32_le(&mut self) -> Result<i32, ProtocolError> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_le())
    }

    /// Read a little-endian `i64`.
    #[inline]
    pub fn read_i64_le(&mut self) -> Result<i64, ProtocolError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64_le())
    }

    /// Read a little-endian IEEE-754 double.
    #[inline]
    pub fn read_f64_le(&mut self) -> Result<f64, ProtocolError> {
        self.ensure(8)?;
        Ok(self.buf.get_f64_le())
    }

    /// Borrow the next `len` bytes and advance past them.
    #[inline]
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        self.ensure(len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Read a `u32`-length-prefixed byte string.
    pub fn read_u32_prefixed(&mut self) -> Result<&'a [u8], ProtocolError> {
        let len = self.read_u32_le()? as usize;
        self.read_slice(len)
    }

    /// Read a `u16`-length-prefixed byte string.
    pub fn read_u16_prefixed(&mut self) -> Result<&'a [u8], ProtocolError> {
        let len = self.read_u16_le()? as usize;
        self.read_slice(len)
    }
}

/// Decode UTF-8 bytes found at `offset` according to `policy`.
///
/// Returns `Cow::Owned` only when the lenient policy had to replace invalid
/// sequences, so callers can tell a lossy decode apart from a clean one.
pub fn decode_utf8(
    bytes: &[u8],
    offset: usize,
    policy: Utf8Policy,
) -> Result<Cow<'_, str>, ProtocolError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(Cow::Borrowed(s)),
        Err(_) => match policy {
            Utf8Policy::Strict => Err(ProtocolError::InvalidUtf8 { offset }),
            Utf8Policy::Lossy => Ok(String::from_utf8_lossy(bytes)),
        },
    }
}

/// Decode a column name.
///
/// Names shorter than `fast_path_len` that are pure ASCII are copied byte by
/// byte; everything else goes through [`decode_utf8`]. The boolean is `true`
/// when invalid UTF-8 was replaced.
pub fn decode_name(
    bytes: &[u8],
    offset: usize,
    fast_path_len: usize,
    policy: Utf8Policy,
) -> Result<(String, bool), ProtocolError> {
    if bytes.len() < fast_path_len && bytes.is_ascii() {
        let mut name = String::with_capacity(bytes.len());
        for &b in bytes {
            name.push(char::from(b));
        }
        return Ok((name, false));
    }

    let decoded = decode_utf8(bytes, offset, policy)?;
    let lossy = matches!(decoded, Cow::Owned(_));
    Ok((decoded.into_owned(), lossy))
}

/// Convert a length to `u32`, failing if the format cannot carry it.
pub fn checked_u32(what: &'static str, len: usize) -> Result<u32, ProtocolError> {
    u32::try_from(len).map_err(|_| ProtocolError::LengthOverflow {
        what,
        len,
        max: u32::MAX as usize,
    })
}

/// Convert a length to `u16`, failing if the format cannot carry it.
pub fn checked_u16(what: &'static str, len: usize) -> Result<u16, ProtocolError> {
    u16::try_from(len).map_err(|_| ProtocolError::LengthOverflow {
        what,
        len,
        max: u16::MAX as usize,
    })
}

/// Write a `u32`-length-prefixed byte string.
pub fn put_u32_prefixed(
    dst: &mut impl BufMut,
    what: &'static str,
    bytes: &[u8],
) -> Result<(), ProtocolError> {
    let len = checked_u32(what, bytes.len())?;
    dst.put_u32_le(len);
    dst.put_slice(bytes);
    Ok(())
}

/// Write a `u16`-length-prefixed byte string.
pub fn put_u16_prefixed(
    dst: &mut impl BufMut,
    what: &'static str,
    bytes: &[u8],
) -> Result<(), ProtocolError> {
    let len = checked_u16(what, bytes.len())?;
    dst.put_u16_le(len);
    dst.put_slice(bytes);
    Ok(())
}

/// Write one intern table entry.
pub fn put_string_entry(dst: &mut impl BufMut, value: &str) -> Result<(), ProtocolError> {
    put_u32_prefixed(dst, "interned string", value.as_bytes())
}
