//! Binary row-set producer.
//!
//! [`RowSetEncoder`] is the [`RowWriter`] the native driver feeds while it
//! reads a result from the server. Cells are appended to one growing buffer
//! as they arrive; column descriptors and the intern table are only known in
//! full at the end and are written in front of the cells by
//! [`finish`](RowSetEncoder::finish).

use bytes::{BufMut, Bytes, BytesMut};
use rowset_protocol::codec::{checked_u32, put_string_entry};
use rowset_protocol::{HEADER_SIZE, Header, cell, put_column};
use rowset_types::CellValue;

use crate::config::{EncoderConfig, IntegerEncoding, check_limit};
use crate::error::Result;
use crate::intern::Interner;
use crate::result::ResultSet;
use crate::row::Column;
use crate::writer::{RowCursor, RowWriter, fits_float, rows_affected_from_driver};

/// Encode a result set with the default configuration.
///
/// Inverse of [`decode`](crate::decode): cell kinds are written exactly as
/// they are held, so decoding the output yields an equal result set.
pub fn encode(result: &ResultSet) -> Result<Bytes> {
    RowSetEncoder::default().encode(result)
}

/// Builds a row-set buffer from [`RowWriter`] callbacks.
#[derive(Debug)]
pub struct RowSetEncoder {
    config: EncoderConfig,
    columns: Vec<Column>,
    cursor: RowCursor,
    cells: BytesMut,
    strings: Interner,
    rows_affected: i64,
}

impl Default for RowSetEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl RowSetEncoder {
    /// Create an encoder with the given configuration.
    #[must_use]
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            cells: BytesMut::with_capacity(config.initial_cell_capacity),
            strings: Interner::with_capacity(config.initial_string_capacity),
            columns: Vec::new(),
            cursor: RowCursor::default(),
            rows_affected: 0,
            config,
        }
    }

    /// Get the encoder configuration.
    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Set the affected-row count directly.
    ///
    /// [`on_done`](RowWriter::on_done) receives the driver's unsigned count;
    /// this accepts the full signed range the header carries.
    pub fn set_rows_affected(&mut self, rows_affected: i64) {
        self.rows_affected = rows_affected;
    }

    /// Number of distinct strings interned so far.
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Bytes of cell data written so far.
    #[must_use]
    pub fn cell_bytes(&self) -> usize {
        self.cells.len()
    }

    /// Encode a complete result set.
    pub fn encode(mut self, result: &ResultSet) -> Result<Bytes> {
        self.on_metadata(result.columns())?;
        for row in result {
            for (col, value) in row.values().iter().enumerate() {
                self.write_cell(col, value)?;
            }
        }
        self.set_rows_affected(result.rows_affected());
        self.finish()
    }

    /// Assemble the buffer.
    ///
    /// Fails if a row was left incomplete or if any count or length is too
    /// large for its wire field.
    pub fn finish(self) -> Result<Bytes> {
        let rows = self.cursor.finish()?;
        let header = Header::new(
            checked_u32("column count", self.columns.len())?,
            checked_u32("row count", rows)?,
            checked_u32("string table length", self.strings.len())?,
            self.rows_affected,
        );

        let string_bytes: usize = self.strings.entries().iter().map(|s| s.len() + 4).sum();
        let mut buf = BytesMut::with_capacity(
            HEADER_SIZE
                + self.columns.iter().map(|c| c.name.len() + 3).sum::<usize>()
                + string_bytes
                + self.cells.len(),
        );

        header.encode(&mut buf);
        for column in &self.columns {
            put_column(&mut buf, column.column_type, &column.name)?;
        }
        for entry in self.strings.entries() {
            put_string_entry(&mut buf, entry)?;
        }
        buf.put_slice(&self.cells);

        tracing::debug!(
            columns = self.columns.len(),
            rows,
            strings = self.strings.len(),
            bytes = buf.len(),
            "encoded row set"
        );
        Ok(buf.freeze())
    }

    fn put_str(&mut self, value: &str) {
        let index = self.strings.intern(value);
        cell::put_string_ref(&mut self.cells, index);
    }
}

impl RowWriter for RowSetEncoder {
    fn on_metadata(&mut self, columns: &[Column]) -> Result<()> {
        if !self.cells.is_empty() || !self.strings.is_empty() {
            tracing::trace!(
                discarded_bytes = self.cells.len(),
                "new metadata, discarding previous result"
            );
        }
        self.cells.clear();
        self.strings.clear();
        self.rows_affected = 0;
        self.columns = columns.to_vec();
        self.cursor = RowCursor::new(columns.len());
        Ok(())
    }

    fn write_null(&mut self, col: usize) -> Result<()> {
        self.cursor.advance(col)?;
        cell::put_null(&mut self.cells);
        Ok(())
    }

    fn write_bool(&mut self, col: usize, value: bool) -> Result<()> {
        self.cursor.advance(col)?;
        cell::put_bool(&mut self.cells, value);
        Ok(())
    }

    fn write_i64(&mut self, col: usize, value: i64) -> Result<()> {
        self.cursor.advance(col)?;
        match self.config.integer_encoding {
            IntegerEncoding::SafeFloat if fits_float(value) => {
                cell::put_f64(&mut self.cells, value as f64);
            }
            _ => cell::put_i64(&mut self.cells, value),
        }
        Ok(())
    }

    fn write_f64(&mut self, col: usize, value: f64) -> Result<()> {
        self.cursor.advance(col)?;
        cell::put_f64(&mut self.cells, value);
        Ok(())
    }

    fn write_str(&mut self, col: usize, value: &str) -> Result<()> {
        self.cursor.advance(col)?;
        self.put_str(value);
        Ok(())
    }

    fn write_bytes(&mut self, col: usize, value: &[u8]) -> Result<()> {
        // Reject before touching the cursor or the cell buffer.
        let len = checked_u32("byte cell", value.len())?;
        check_limit("byte cell length", len, self.config.max_cell_bytes)?;
        self.cursor.advance(col)?;
        cell::put_bytes(&mut self.cells, value)?;
        Ok(())
    }

    fn write_cell(&mut self, col: usize, value: &CellValue) -> Result<()> {
        match value {
            CellValue::BigInt(v) => {
                self.cursor.advance(col)?;
                cell::put_i64(&mut self.cells, *v);
                Ok(())
            }
            CellValue::Null => self.write_null(col),
            CellValue::Bool(v) => self.write_bool(col, *v),
            CellValue::Float(v) => self.write_f64(col, *v),
            CellValue::String(v) => self.write_str(col, v),
            CellValue::Bytes(v) => self.write_bytes(col, v),
        }
    }

    fn on_done(&mut self, rows_affected: u64) -> Result<()> {
        self.rows_affected = rows_affected_from_driver(rows_affected);
        Ok(())
    }
}
