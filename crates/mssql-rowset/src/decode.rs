//! Single-pass row-set decoder.
//!
//! The decoder walks the buffer front to back exactly once: header, column
//! descriptors, intern table, then the cell stream. Every string is decoded
//! when its table entry is read; string cells only clone an `Arc`.
//!
//! Any malformed input fails the whole call. No partial result is ever
//! returned.

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;
use rowset_protocol::codec::{decode_name, decode_utf8};
use rowset_protocol::{CellTag, ColumnType, Header, ProtocolError, WireReader};
use rowset_types::CellValue;

use crate::config::{DecoderConfig, check_limit};
use crate::error::Result;
use crate::intern::StringTable;
use crate::result::ResultSet;
use crate::row::{ColMetaData, Column, Row};

/// Smallest encoded column descriptor: tag plus empty name.
const MIN_COLUMN_LEN: usize = 3;
/// Smallest encoded intern entry: empty string.
const MIN_STRING_LEN: usize = 4;

/// Decode a row-set buffer with the default configuration.
pub fn decode(buf: &[u8]) -> Result<ResultSet> {
    Decoder::default().decode(buf)
}

/// Row-set decoder.
///
/// Holds only its configuration and may be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the given configuration.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one buffer into a fully materialized result set.
    ///
    /// The buffer is only borrowed for the duration of the call.
    pub fn decode(&self, buf: &[u8]) -> Result<ResultSet> {
        let mut src = WireReader::new(buf);
        let header = Header::decode(&mut src)?;
        let rows_affected = header.rows_affected();

        tracing::debug!(
            columns = header.column_count,
            rows = header.row_count,
            strings = header.string_table_len,
            rows_affected,
            bytes = buf.len(),
            "decoding row set"
        );

        check_limit("column count", header.column_count, self.config.max_columns)?;
        check_limit(
            "string table length",
            header.string_table_len,
            self.config.max_string_table_len,
        )?;

        let columns = self.read_columns(&mut src, header.column_count)?;
        let strings = self.read_string_table(&mut src, header.string_table_len)?;

        if columns.is_empty() {
            tracing::trace!(
                declared_rows = header.row_count,
                "no columns, skipping cell stream"
            );
            return Ok(ResultSet::empty(rows_affected));
        }

        check_limit("row count", header.row_count, self.config.max_rows)?;

        let metadata = Arc::new(ColMetaData::new(columns));
        let rows = self.read_rows(&mut src, &metadata, &strings, header.row_count)?;

        if src.remaining() > 0 {
            tracing::trace!(trailing = src.remaining(), "ignoring bytes after cell stream");
        }
        tracing::debug!(rows = rows.len(), "decoded row set");

        Ok(ResultSet::from_parts(metadata, rows, rows_affected))
    }

    fn read_columns(&self, src: &mut WireReader<'_>, count: u32) -> Result<Vec<Column>> {
        let policy = self.config.utf8_policy();
        let mut columns = Vec::with_capacity(capped(count, src.remaining(), MIN_COLUMN_LEN));

        for _ in 0..count {
            let tag = src.read_u8()?;
            let raw = src.read_u16_prefixed()?;
            let offset = src.offset() - raw.len();
            let (name, lossy) = decode_name(raw, offset, self.config.ascii_fast_path_len, policy)?;

            if lossy {
                tracing::warn!(offset, "column name is not valid UTF-8, replaced");
            }
            let column_type = ColumnType::from_tag(tag);
            if column_type.is_unknown() {
                tracing::trace!(tag, column = %name, "unknown column type tag");
            }
            columns.push(Column::new(name, column_type));
        }
        Ok(columns)
    }

    fn read_string_table(&self, src: &mut WireReader<'_>, count: u32) -> Result<StringTable> {
        let policy = self.config.utf8_policy();
        let mut table = StringTable::with_capacity(capped(count, src.remaining(), MIN_STRING_LEN));
        let mut replaced = 0usize;

        for _ in 0..count {
            let raw = src.read_u32_prefixed()?;
            let offset = src.offset() - raw.len();
            let entry: Arc<str> = match decode_utf8(raw, offset, policy)? {
                Cow::Borrowed(s) => Arc::from(s),
                Cow::Owned(s) => {
                    replaced += 1;
                    Arc::from(s)
                }
            };
            table.push(entry);
        }

        if replaced > 0 {
            tracing::warn!(replaced, "interned strings were not valid UTF-8, replaced");
        }
        Ok(table)
    }

    fn read_rows(
        &self,
        src: &mut WireReader<'_>,
        metadata: &Arc<ColMetaData>,
        strings: &StringTable,
        count: u32,
    ) -> Result<Vec<Row>> {
        let width = metadata.len();
        // Every cell is at least one tag byte.
        let mut rows = Vec::with_capacity(capped(count, src.remaining(), width));

        for _ in 0..count {
            let mut values = Vec::with_capacity(width);
            for _ in 0..width {
                values.push(self.read_cell(src, strings)?);
            }
            rows.push(Row::new(Arc::clone(metadata), values));
        }
        Ok(rows)
    }

    fn read_cell(&self, src: &mut WireReader<'_>, strings: &StringTable) -> Result<CellValue> {
        let offset = src.offset();
        let raw = src.read_u8()?;
        let tag = CellTag::from_u8(raw).ok_or(ProtocolError::InvalidTag { tag: raw, offset })?;

        let value = match tag {
            CellTag::Null => CellValue::Null,
            CellTag::False => CellValue::Bool(false),
            CellTag::True => CellValue::Bool(true),
            CellTag::Float64 => CellValue::Float(src.read_f64_le()?),
            CellTag::Int64 => CellValue::BigInt(src.read_i64_le()?),
            CellTag::StringRef => {
                let at = src.offset();
                let index = src.read_u32_le()?;
                let entry = strings.get(index).ok_or(ProtocolError::DanglingStringRef {
                    index,
                    table_len: strings.len() as u32,
                    offset: at,
                })?;
                CellValue::String(Arc::clone(entry))
            }
            CellTag::Bytes => {
                let len = src.read_u32_le()?;
                check_limit("byte cell length", len, self.config.max_cell_bytes)?;
                let data = src.read_slice(len as usize)?;
                CellValue::Bytes(Bytes::copy_from_slice(data))
            }
        };
        Ok(value)
    }
}

/// Bound a header count by how many items could possibly fit in the bytes
/// that remain.
fn capped(count: u32, remaining: usize, min_item_len: usize) -> usize {
    (count as usize).min(remaining / min_item_len.max(1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_capped_prealloc() {
        assert_eq!(capped(u32::MAX, 30, 3), 10);
        assert_eq!(capped(2, 1_000, 4), 2);
        assert_eq!(capped(5, 10, 0), 5);
    }

    #[test]
    fn test_short_header_is_truncation() {
        let err = decode(&[0u8; 19]).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_zero_columns_ignores_declared_rows() {
        let mut buf = Vec::new();
        Header::new(0, 1_000, 0, 3).encode(&mut buf);
        let result = decode(&buf).unwrap();
        assert!(result.columns().is_empty());
        assert_eq!(result.row_count(), 0);
        assert_eq!(result.rows_affected(), 3);
    }

    #[test]
    fn test_column_limit() {
        let mut buf = Vec::new();
        Header::new(5, 0, 0, 0).encode(&mut buf);
        let decoder = Decoder::new(DecoderConfig::new().max_columns(4));
        let err = decoder.decode(&buf).unwrap_err();
        assert!(matches!(
            err,
            Error::LimitExceeded {
                what: "column count",
                value: 5,
                limit: 4,
            }
        ));
    }
}
