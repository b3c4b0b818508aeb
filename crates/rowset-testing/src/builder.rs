//! Byte-level row-set builder.
//!
//! Unlike the real encoder, [`BufferBuilder`] never validates anything: the
//! header counts can disagree with the sections, names can be invalid UTF-8,
//! cell tags can be out of range and string references can dangle. That is
//! the point. It exists to produce the buffers a decoder must reject.

use bytes::{BufMut, Bytes, BytesMut};
use rowset_protocol::{CellTag, ColumnType, Header};

/// Builder for raw row-set buffers.
#[derive(Debug, Clone, Default)]
pub struct BufferBuilder {
    columns: BytesMut,
    strings: BytesMut,
    cells: BytesMut,
    column_count: u32,
    string_count: u32,
    row_count: u32,
    rows_affected: i64,
    declared_columns: Option<u32>,
    declared_strings: Option<u32>,
}

impl BufferBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column descriptor.
    #[must_use]
    pub fn column(self, column_type: ColumnType, name: &str) -> Self {
        self.column_raw(column_type.tag(), name.as_bytes())
    }

    /// Add a column descriptor with an arbitrary type tag and name bytes.
    #[must_use]
    pub fn column_raw(mut self, tag: u8, name: &[u8]) -> Self {
        self.columns.put_u8(tag);
        self.columns.put_u16_le(name.len() as u16);
        self.columns.put_slice(name);
        self.column_count += 1;
        self
    }

    /// Add an intern table entry.
    #[must_use]
    pub fn string(self, value: &str) -> Self {
        self.string_raw(value.as_bytes())
    }

    /// Add an intern table entry from arbitrary bytes.
    #[must_use]
    pub fn string_raw(mut self, bytes: &[u8]) -> Self {
        self.strings.put_u32_le(bytes.len() as u32);
        self.strings.put_slice(bytes);
        self.string_count += 1;
        self
    }

    /// Set the row count written to the header.
    ///
    /// Cells are not counted automatically.
    #[must_use]
    pub fn rows(mut self, count: u32) -> Self {
        self.row_count = count;
        self
    }

    /// Set the affected-row count.
    #[must_use]
    pub fn rows_affected(mut self, rows_affected: i64) -> Self {
        self.rows_affected = rows_affected;
        self
    }

    /// Override the header column count.
    #[must_use]
    pub fn declare_columns(mut self, count: u32) -> Self {
        self.declared_columns = Some(count);
        self
    }

    /// Override the header string table length.
    #[must_use]
    pub fn declare_strings(mut self, count: u32) -> Self {
        self.declared_strings = Some(count);
        self
    }

    /// Append a NULL cell.
    #[must_use]
    pub fn null(mut self) -> Self {
        self.cells.put_u8(CellTag::Null as u8);
        self
    }

    /// Append a boolean cell.
    #[must_use]
    pub fn bool(mut self, value: bool) -> Self {
        self.cells.put_u8(CellTag::for_bool(value) as u8);
        self
    }

    /// Append a Float64 cell.
    #[must_use]
    pub fn f64(mut self, value: f64) -> Self {
        self.cells.put_u8(CellTag::Float64 as u8);
        self.cells.put_f64_le(value);
        self
    }

    /// Append an Int64 cell.
    #[must_use]
    pub fn i64(mut self, value: i64) -> Self {
        self.cells.put_u8(CellTag::Int64 as u8);
        self.cells.put_i64_le(value);
        self
    }

    /// Append a StringRef cell.
    #[must_use]
    pub fn string_ref(mut self, index: u32) -> Self {
        self.cells.put_u8(CellTag::StringRef as u8);
        self.cells.put_u32_le(index);
        self
    }

    /// Append a Bytes cell.
    #[must_use]
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.cells.put_u8(CellTag::Bytes as u8);
        self.cells.put_u32_le(value.len() as u32);
        self.cells.put_slice(value);
        self
    }

    /// Append arbitrary bytes to the cell region.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.cells.put_slice(bytes);
        self
    }

    /// Size of the buffer [`build`](Self::build) would return.
    #[must_use]
    pub fn len(&self) -> usize {
        rowset_protocol::HEADER_SIZE + self.columns.len() + self.strings.len() + self.cells.len()
    }

    /// Check if nothing beyond the header would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.strings.is_empty() && self.cells.is_empty()
    }

    /// Offset at which the cell region starts.
    #[must_use]
    pub fn cells_offset(&self) -> usize {
        rowset_protocol::HEADER_SIZE + self.columns.len() + self.strings.len()
    }

    /// Assemble the buffer.
    #[must_use]
    pub fn build(&self) -> Bytes {
        let header = Header::new(
            self.declared_columns.unwrap_or(self.column_count),
            self.row_count,
            self.declared_strings.unwrap_or(self.string_count),
            self.rows_affected,
        );
        let mut buf = BytesMut::with_capacity(self.len());
        header.encode(&mut buf);
        buf.put_slice(&self.columns);
        buf.put_slice(&self.strings);
        buf.put_slice(&self.cells);
        buf.freeze()
    }

    /// Assemble the buffer and drop its last `cut` bytes.
    #[must_use]
    pub fn build_truncated(&self, cut: usize) -> Bytes {
        let buf = self.build();
        let keep = buf.len().saturating_sub(cut);
        buf.slice(..keep)
    }
}
