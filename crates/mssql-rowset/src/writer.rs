//! Callback interface between the native driver and a row-set producer.
//!
//! The driver streams one result set through a [`RowWriter`]: column
//! metadata first, then every cell of every row in column order, then the
//! affected-row count. Each write names the column it belongs to so the
//! writer can verify the stream stays in step with the metadata.

use rowset_types::{CellValue, MAX_SAFE_INTEGER};
use rowset_types::format::{
    decimal_to_string, guid_to_string, micros_offset_to_iso, micros_to_iso, nanos_to_time_str,
    unix_days_to_iso,
};

use crate::error::{Error, Result};
use crate::row::Column;

/// Receives a result set value by value.
///
/// Only the native kinds are required. Narrow integers and `f32` widen to
/// [`write_i64`](Self::write_i64) and [`write_f64`](Self::write_f64), and
/// temporal, decimal and GUID values are formatted to text and passed to
/// [`write_str`](Self::write_str).
pub trait RowWriter {
    /// Start a result set with the given columns.
    fn on_metadata(&mut self, columns: &[Column]) -> Result<()>;

    /// Write a NULL.
    fn write_null(&mut self, col: usize) -> Result<()>;

    /// Write a BIT.
    fn write_bool(&mut self, col: usize, value: bool) -> Result<()>;

    /// Write a TINYINT.
    fn write_u8(&mut self, col: usize, value: u8) -> Result<()> {
        self.write_i64(col, i64::from(value))
    }

    /// Write a SMALLINT.
    fn write_i16(&mut self, col: usize, value: i16) -> Result<()> {
        self.write_i64(col, i64::from(value))
    }

    /// Write an INT.
    fn write_i32(&mut self, col: usize, value: i32) -> Result<()> {
        self.write_i64(col, i64::from(value))
    }

    /// Write a BIGINT.
    fn write_i64(&mut self, col: usize, value: i64) -> Result<()>;

    /// Write a REAL.
    fn write_f32(&mut self, col: usize, value: f32) -> Result<()> {
        self.write_f64(col, f64::from(value))
    }

    /// Write a FLOAT.
    fn write_f64(&mut self, col: usize, value: f64) -> Result<()>;

    /// Write character data.
    fn write_str(&mut self, col: usize, value: &str) -> Result<()>;

    /// Write binary data.
    fn write_bytes(&mut self, col: usize, value: &[u8]) -> Result<()>;

    /// Write a UNIQUEIDENTIFIER.
    fn write_guid(&mut self, col: usize, value: &[u8; 16]) -> Result<()> {
        self.write_str(col, &guid_to_string(value))
    }

    /// Write a DECIMAL/NUMERIC/MONEY as a scaled integer.
    ///
    /// Precision does not affect the text form.
    fn write_decimal(&mut self, col: usize, value: i128, _precision: u8, scale: u8) -> Result<()> {
        self.write_str(col, &decimal_to_string(value, scale)?)
    }

    /// Write a DATE as days since 1970-01-01.
    fn write_date(&mut self, col: usize, unix_days: i32) -> Result<()> {
        self.write_str(col, &unix_days_to_iso(unix_days)?)
    }

    /// Write a TIME as nanoseconds since midnight.
    fn write_time(&mut self, col: usize, nanos: u64) -> Result<()> {
        self.write_str(col, &nanos_to_time_str(nanos)?)
    }

    /// Write a DATETIME/DATETIME2/SMALLDATETIME as microseconds since the
    /// Unix epoch.
    fn write_datetime(&mut self, col: usize, unix_micros: i64) -> Result<()> {
        self.write_str(col, &micros_to_iso(unix_micros)?)
    }

    /// Write a DATETIMEOFFSET as UTC microseconds plus an offset in minutes.
    fn write_datetimeoffset(
        &mut self,
        col: usize,
        unix_micros: i64,
        offset_minutes: i16,
    ) -> Result<()> {
        self.write_str(col, &micros_offset_to_iso(unix_micros, offset_minutes)?)
    }

    /// Write an already decoded cell.
    ///
    /// The default routes through the typed methods, so a `BigInt` is subject
    /// to the writer's integer policy.
    fn write_cell(&mut self, col: usize, value: &CellValue) -> Result<()> {
        match value {
            CellValue::Null => self.write_null(col),
            CellValue::Bool(v) => self.write_bool(col, *v),
            CellValue::Float(v) => self.write_f64(col, *v),
            CellValue::BigInt(v) => self.write_i64(col, *v),
            CellValue::String(v) => self.write_str(col, v),
            CellValue::Bytes(v) => self.write_bytes(col, v),
        }
    }

    /// Finish the result set.
    fn on_done(&mut self, rows_affected: u64) -> Result<()>;
}

/// Tracks position within the cell stream.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RowCursor {
    width: usize,
    position: usize,
    rows: usize,
}

impl RowCursor {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            position: 0,
            rows: 0,
        }
    }

    /// Account for one cell written to column `col`.
    ///
    /// Returns `true` when the cell completed a row.
    pub(crate) fn advance(&mut self, col: usize) -> Result<bool> {
        if self.width == 0 {
            return Err(Error::RowShape {
                expected: 0,
                actual: 1,
            });
        }
        if col != self.position {
            return Err(Error::ColumnOrder {
                expected: self.position,
                actual: col,
            });
        }
        self.position += 1;
        if self.position == self.width {
            self.position = 0;
            self.rows += 1;
            return Ok(true);
        }
        Ok(false)
    }

    /// Number of complete rows, failing if a row was left half written.
    pub(crate) fn finish(&self) -> Result<usize> {
        if self.position != 0 {
            return Err(Error::RowShape {
                expected: self.width,
                actual: self.position,
            });
        }
        Ok(self.rows)
    }
}

/// Convert the driver's unsigned affected-row count to the wire's signed one.
pub(crate) fn rows_affected_from_driver(rows: u64) -> i64 {
    i64::try_from(rows).unwrap_or(i64::MAX)
}

/// Whether `value` survives a trip through `f64` unchanged.
pub(crate) fn fits_float(value: i64) -> bool {
    value.unsigned_abs() <= MAX_SAFE_INTEGER.unsigned_abs()
}
