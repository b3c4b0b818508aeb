//! Row-set buffer header.
//!
//! ```text
//! offset  size  field
//! 0       4     column_count        u32 LE
//! 4       4     row_count           u32 LE
//! 8       4     string_table_len    u32 LE
//! 12      4     rows_affected_low   u32 LE
//! 16      4     rows_affected_high  i32 LE
//! ```

use bytes::BufMut;

use crate::codec::WireReader;
use crate::error::ProtocolError;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Fixed header at the start of every row-set buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Number of columns.
    pub column_count: u32,
    /// Number of rows.
    pub row_count: u32,
    /// Number of interned strings.
    pub string_table_len: u32,
    /// Low 32 bits of the affected-row count.
    pub rows_affected_low: u32,
    /// High 32 bits (signed) of the affected-row count.
    pub rows_affected_high: i32,
}

impl Header {
    /// Build a header, splitting `rows_affected` into its two halves.
    #[must_use]
    pub fn new(column_count: u32, row_count: u32, string_table_len: u32, rows_affected: i64) -> Self {
        Self {
            column_count,
            row_count,
            string_table_len,
            rows_affected_low: rows_affected as u32,
            rows_affected_high: (rows_affected >> 32) as i32,
        }
    }

    /// Reassemble the affected-row count into one signed 64-bit value.
    #[must_use]
    pub fn rows_affected(&self) -> i64 {
        (i64::from(self.rows_affected_high) << 32) | i64::from(self.rows_affected_low)
    }

    /// Decode the header from the front of the reader.
    pub fn decode(src: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        src.ensure(HEADER_SIZE)?;
        Ok(Self {
            column_count: src.read_u32_le()?,
            row_count: src.read_u32_le()?,
            string_table_len: src.read_u32_le()?,
            rows_affected_low: src.read_u32_le()?,
            rows_affected_high: src.read_i32_le()?,
        })
    }

    /// Encode the header.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u32_le(self.column_count);
        dst.put_u32_le(self.row_count);
        dst.put_u32_le(self.string_table_len);
        dst.put_u32_le(self.rows_affected_low);
        dst.put_i32_le(self.rows_affected_high);
    }
}
