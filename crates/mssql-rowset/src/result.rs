//! Fully materialized query results.

use std::sync::Arc;

use rowset_types::CellValue;

use crate::error::{Error, Result};
use crate::row::{ColMetaData, Column, Row};

/// A decoded result set.
///
/// Owns its columns and rows outright; nothing borrows from the buffer it
/// was decoded from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    metadata: Arc<ColMetaData>,
    rows: Vec<Row>,
    rows_affected: i64,
}

impl ResultSet {
    /// Build a result set from columns and row values.
    ///
    /// Fails with [`Error::RowShape`] if any row does not hold exactly one
    /// value per column.
    pub fn new(
        columns: Vec<Column>,
        rows: Vec<Vec<CellValue>>,
        rows_affected: i64,
    ) -> Result<Self> {
        let metadata = Arc::new(ColMetaData::new(columns));
        let mut built = Vec::with_capacity(rows.len());
        for values in rows {
            if values.len() != metadata.len() {
                return Err(Error::RowShape {
                    expected: metadata.len(),
                    actual: values.len(),
                });
            }
            built.push(Row::new(Arc::clone(&metadata), values));
        }
        Ok(Self::from_parts(metadata, built, rows_affected))
    }

    /// A result with no columns and no rows, as returned by statements such
    /// as `UPDATE` that only report an affected-row count.
    #[must_use]
    pub fn empty(rows_affected: i64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(metadata: Arc<ColMetaData>, rows: Vec<Row>, rows_affected: i64) -> Self {
        Self {
            metadata,
            rows,
            rows_affected,
        }
    }

    /// Column descriptors in result order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.metadata.columns()
    }

    /// Shared column metadata.
    #[must_use]
    pub fn metadata(&self) -> &Arc<ColMetaData> {
        &self.metadata
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows affected as reported by the server.
    ///
    /// Independent of [`row_count`](Self::row_count): a `SELECT` usually
    /// reports its row count here, DML reports modified rows with no result
    /// rows.
    #[must_use]
    pub fn rows_affected(&self) -> i64 {
        self.rows_affected
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Take ownership of the rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

    use super::{Column, ResultSet, Row};

    impl Serialize for Column {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("Column", 2)?;
            s.serialize_field("name", &self.name)?;
            s.serialize_field("type", self.type_name())?;
            s.end()
        }
    }

    // Rows serialize as objects keyed by column name, in column order. A
    // name shared by several columns is emitted once with the last value.
    impl Serialize for Row {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let meta = self.metadata();
            let mut map = serializer.serialize_map(None)?;
            for (index, (column, value)) in self.iter().enumerate() {
                if meta.find_by_name(&column.name) == Some(index) {
                    map.serialize_entry(&column.name, value)?;
                }
            }
            map.end()
        }
    }

    impl Serialize for ResultSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("ResultSet", 4)?;
            s.serialize_field("columns", self.columns())?;
            s.serialize_field("rows", self.rows())?;
            s.serialize_field("row_count", &self.row_count())?;
            s.serialize_field("rows_affected", &self.rows_affected())?;
            s.end()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rowset_protocol::ColumnType;

    use super::*;

    #[test]
    fn test_new_checks_row_shape() {
        let err = ResultSet::new(
            vec![Column::new("a", ColumnType::Int)],
            vec![vec![CellValue::Null, CellValue::Null]],
            0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::RowShape {
                expected: 1,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_rows_share_metadata() {
        let result = ResultSet::new(
            vec![Column::new("a", ColumnType::Int)],
            vec![vec![CellValue::Float(1.0)], vec![CellValue::Float(2.0)]],
            2,
        )
        .unwrap();
        assert_eq!(result.row_count(), 2);
        assert!(Arc::ptr_eq(
            result.rows()[0].metadata(),
            result.rows()[1].metadata()
        ));
    }

    #[test]
    fn test_empty_result() {
        let result = ResultSet::empty(17);
        assert!(result.columns().is_empty());
        assert!(result.is_empty());
        assert_eq!(result.rows_affected(), 17);
    }
}
