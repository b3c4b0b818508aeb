//! Rows and column metadata for decoded result sets.
//!
//! Rows are fixed-order value arrays. Column names live once in the shared
//! [`ColMetaData`], which also owns the name → index map, so a result with a
//! million rows carries one copy of each name.
//!
//! ```text
//! Row {
//!     metadata: Arc<ColMetaData> ──► [Column definitions..., name index]
//!     values:   Vec<CellValue>   ──► [cell 0, cell 1, ...]
//! }
//! ```

use std::sync::Arc;

use hashbrown::HashMap;
use rowset_protocol::{ColumnType, TypeId};
use rowset_types::{CellValue, FromCell, TypeError};

/// Column metadata describing a result set column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column type as carried on the wire.
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new column.
    ///
    /// The type is stored in [canonical](ColumnType::canonical) form, so
    /// `Unknown(4)` becomes `Int`, matching what a decoder reports.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.canonical(),
        }
    }

    /// Create a column from the TDS type the server reported.
    ///
    /// Types with no row-set classification keep their raw byte as an
    /// unknown tag.
    pub fn from_type_id(name: impl Into<String>, type_id: TypeId) -> Self {
        let column_type =
            ColumnType::from_type_id(type_id).unwrap_or(ColumnType::Unknown(type_id as u8));
        Self::new(name, column_type)
    }

    /// Lowercase SQL type name, or `"unknown"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.column_type.name()
    }
}

/// Shared column metadata for a result set.
///
/// This is shared across all rows in the result set to avoid
/// duplicating metadata per row.
#[derive(Debug, Clone, Default)]
pub struct ColMetaData {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
}

impl ColMetaData {
    /// Create new column metadata from a list of columns.
    ///
    /// When two columns share a name, lookups by that name resolve to the
    /// later one.
    pub fn new(columns: Vec<Column>) -> Self {
        let mut by_name = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            by_name.insert(column.name.clone(), index);
        }
        Self { columns, by_name }
    }

    /// Get the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Find a column index by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// All columns in result order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl PartialEq for ColMetaData {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

/// A row from a decoded result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    metadata: Arc<ColMetaData>,
    values: Vec<CellValue>,
}

impl Row {
    /// Create a row over shared metadata.
    ///
    /// `values` holds one cell per column in column order.
    pub fn new(metadata: Arc<ColMetaData>, values: Vec<CellValue>) -> Self {
        debug_assert_eq!(metadata.len(), values.len());
        Self { metadata, values }
    }

    /// Get a value by column index.
    pub fn get<T: FromCell>(&self, index: usize) -> Result<T, TypeError> {
        self.values
            .get(index)
            .ok_or(TypeError::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
            .and_then(T::from_cell)
    }

    /// Get a value by column name.
    pub fn get_by_name<T: FromCell>(&self, name: &str) -> Result<T, TypeError> {
        let index = self
            .metadata
            .find_by_name(name)
            .ok_or_else(|| TypeError::ColumnNotFound(name.to_string()))?;
        self.get(index)
    }

    /// Try to get a value by column index, returning None if NULL, absent
    /// or not convertible.
    pub fn try_get<T: FromCell>(&self, index: usize) -> Option<T> {
        self.values
            .get(index)
            .and_then(|v| T::from_cell_nullable(v).ok().flatten())
    }

    /// Try to get a value by column name, returning None if NULL, absent
    /// or not convertible.
    pub fn try_get_by_name<T: FromCell>(&self, name: &str) -> Option<T> {
        let index = self.metadata.find_by_name(name)?;
        self.try_get(index)
    }

    /// Borrow the raw cell at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    /// Borrow the raw cell for the column called `name`.
    #[must_use]
    pub fn value_by_name(&self, name: &str) -> Option<&CellValue> {
        self.metadata
            .find_by_name(name)
            .and_then(|index| self.values.get(index))
    }

    /// Check if the value at `index` is NULL. Out of bounds counts as NULL.
    #[must_use]
    pub fn is_null(&self, index: usize) -> bool {
        self.values.get(index).is_none_or(CellValue::is_null)
    }

    /// Get the number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the column metadata.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.metadata.columns()
    }

    /// Get the shared column metadata.
    #[must_use]
    pub fn metadata(&self) -> &Arc<ColMetaData> {
        &self.metadata
    }

    /// All cells in column order.
    #[must_use]
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Take ownership of the cells.
    #[must_use]
    pub fn into_values(self) -> Vec<CellValue> {
        self.values
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> RowIter<'_> {
        RowIter {
            row: self,
            index: 0,
        }
    }

    /// Build a name → value map.
    ///
    /// Duplicate column names collapse to the later column, matching
    /// [`get_by_name`](Self::get_by_name).
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, CellValue> {
        let mut map = HashMap::with_capacity(self.values.len());
        for (column, value) in self {
            map.insert(column.name.clone(), value.clone());
        }
        map
    }
}

/// Iterator over `(column, value)` pairs of a row.
pub struct RowIter<'a> {
    row: &'a Row,
    index: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = (&'a Column, &'a CellValue);

    fn next(&mut self) -> Option<Self::Item> {
        let column = self.row.metadata.get(self.index)?;
        let value = self.row.values.get(self.index)?;
        self.index += 1;
        Some((column, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.row.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a Column, &'a CellValue);
    type IntoIter = RowIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
