//! In-memory [`RowWriter`] that builds a [`ResultSet`] without a binary hop.

use rowset_types::CellValue;

use crate::config::IntegerEncoding;
use crate::error::Result;
use crate::intern::Interner;
use crate::result::ResultSet;
use crate::row::Column;
use crate::writer::{RowCursor, RowWriter, fits_float, rows_affected_from_driver};

/// Collects driver callbacks straight into cell values.
///
/// By default every integer is kept as `BigInt`. With
/// [`IntegerEncoding::SafeFloat`] the collector produces exactly what
/// decoding a [`RowSetEncoder`](crate::RowSetEncoder) buffer would.
/// Repeated strings share one allocation, as they do after decoding.
#[derive(Debug)]
pub struct ValueCollector {
    integer_encoding: IntegerEncoding,
    columns: Vec<Column>,
    cursor: RowCursor,
    current: Vec<CellValue>,
    rows: Vec<Vec<CellValue>>,
    strings: Interner,
    rows_affected: i64,
}

impl Default for ValueCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueCollector {
    /// Create a collector that keeps integers at full width.
    #[must_use]
    pub fn new() -> Self {
        Self::with_integer_encoding(IntegerEncoding::AlwaysInt64)
    }

    /// Create a collector with the given integer policy.
    #[must_use]
    pub fn with_integer_encoding(integer_encoding: IntegerEncoding) -> Self {
        Self {
            integer_encoding,
            columns: Vec::new(),
            cursor: RowCursor::default(),
            current: Vec::new(),
            rows: Vec::new(),
            strings: Interner::default(),
            rows_affected: 0,
        }
    }

    /// Set the affected-row count directly.
    pub fn set_rows_affected(&mut self, rows_affected: i64) {
        self.rows_affected = rows_affected;
    }

    /// Build the result set, failing if a row was left incomplete.
    pub fn finish(self) -> Result<ResultSet> {
        self.cursor.finish()?;
        ResultSet::new(self.columns, self.rows, self.rows_affected)
    }

    fn push(&mut self, col: usize, value: CellValue) -> Result<()> {
        let row_done = self.cursor.advance(col)?;
        self.current.push(value);
        if row_done {
            let width = self.columns.len();
            self.rows
                .push(std::mem::replace(&mut self.current, Vec::with_capacity(width)));
        }
        Ok(())
    }
}

impl RowWriter for ValueCollector {
    fn on_metadata(&mut self, columns: &[Column]) -> Result<()> {
        self.columns = columns.to_vec();
        self.cursor = RowCursor::new(columns.len());
        self.current = Vec::with_capacity(columns.len());
        self.rows.clear();
        self.strings.clear();
        self.rows_affected = 0;
        Ok(())
    }

    fn write_null(&mut self, col: usize) -> Result<()> {
        self.push(col, CellValue::Null)
    }

    fn write_bool(&mut self, col: usize, value: bool) -> Result<()> {
        self.push(col, CellValue::Bool(value))
    }

    fn write_i64(&mut self, col: usize, value: i64) -> Result<()> {
        let cell = match self.integer_encoding {
            IntegerEncoding::SafeFloat if fits_float(value) => CellValue::Float(value as f64),
            _ => CellValue::BigInt(value),
        };
        self.push(col, cell)
    }

    fn write_f64(&mut self, col: usize, value: f64) -> Result<()> {
        self.push(col, CellValue::Float(value))
    }

    fn write_str(&mut self, col: usize, value: &str) -> Result<()> {
        let entry = self.strings.intern_arc(value);
        self.push(col, CellValue::String(entry))
    }

    fn write_bytes(&mut self, col: usize, value: &[u8]) -> Result<()> {
        self.push(col, CellValue::from(value))
    }

    fn write_cell(&mut self, col: usize, value: &CellValue) -> Result<()> {
        self.push(col, value.clone())
    }

    fn on_done(&mut self, rows_affected: u64) -> Result<()> {
        self.rows_affected = rows_affected_from_driver(rows_affected);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rowset_protocol::ColumnType;

    use super::*;

    #[test]
    fn test_collects_rows() {
        let mut collector = ValueCollector::new();
        collector
            .on_metadata(&[
                Column::new("id", ColumnType::Int),
                Column::new("name", ColumnType::NVarChar),
            ])
            .unwrap();
        collector.write_i32(0, 1).unwrap();
        collector.write_str(1, "alice").unwrap();
        collector.write_i32(0, 2).unwrap();
        collector.write_null(1).unwrap();
        collector.on_done(2).unwrap();

        let result = collector.finish().unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows_affected(), 2);
        assert_eq!(result.rows()[0].value(0), Some(&CellValue::BigInt(1)));
        assert_eq!(result.rows()[1].get::<Option<String>>(1).unwrap(), None);
    }

    #[test]
    fn test_new_metadata_starts_fresh() {
        let mut collector = ValueCollector::new();
        collector
            .on_metadata(&[Column::new("a", ColumnType::Int)])
            .unwrap();
        collector.write_i32(0, 1).unwrap();
        collector.on_done(5).unwrap();
        collector
            .on_metadata(&[Column::new("b", ColumnType::Bit)])
            .unwrap();

        let result = collector.finish().unwrap();
        assert!(result.is_empty());
        assert_eq!(result.rows_affected(), 0);
        assert_eq!(result.columns()[0].name, "b");
    }

    #[test]
    fn test_safe_float_mirrors_encoder() {
        let mut collector = ValueCollector::with_integer_encoding(IntegerEncoding::SafeFloat);
        collector
            .on_metadata(&[Column::new("n", ColumnType::BigInt)])
            .unwrap();
        collector.write_i64(0, 5).unwrap();
        collector.write_i64(0, i64::MAX).unwrap();
        let result = collector.finish().unwrap();
        assert_eq!(result.rows()[0].value(0), Some(&CellValue::Float(5.0)));
        assert_eq!(result.rows()[1].value(0), Some(&CellValue::BigInt(i64::MAX)));
    }

    #[test]
    fn test_repeated_strings_share() {
        let mut collector = ValueCollector::new();
        collector
            .on_metadata(&[Column::new("s", ColumnType::VarChar)])
            .unwrap();
        collector.write_str(0, "same").unwrap();
        collector.write_str(0, "same").unwrap();
        let result = collector.finish().unwrap();
        match (result.rows()[0].value(0), result.rows()[1].value(0)) {
            (Some(CellValue::String(a)), Some(CellValue::String(b))) => {
                assert!(Arc::ptr_eq(a, b));
            }
            other => panic!("unexpected cells: {other:?}"),
        }
    }

    #[test]
    fn test_formatted_values() {
        let mut collector = ValueCollector::new();
        collector
            .on_metadata(&[
                Column::new("g", ColumnType::UniqueIdentifier),
                Column::new("d", ColumnType::Decimal),
                Column::new("t", ColumnType::DateTimeOffset),
            ])
            .unwrap();
        collector.write_guid(0, &[0u8; 16]).unwrap();
        collector.write_decimal(1, 12345, 10, 2).unwrap();
        collector.write_datetimeoffset(2, 0, -300).unwrap();
        let result = collector.finish().unwrap();
        let row = &result.rows()[0];

        assert_eq!(
            row.get::<String>(0).unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(row.get::<String>(1).unwrap(), "123.45");
        assert_eq!(row.get::<String>(2).unwrap(), "1970-01-01T00:00:00-05:00");
    }
}
