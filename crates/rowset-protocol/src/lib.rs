//! # rowset-protocol
//!
//! Byte-level contract for the binary row-set format that carries SQL query
//! results from the native driver layer to the decoder.
//!
//! This crate only describes layout: header, column descriptors, string
//! intern table and cell stream. It performs no I/O and holds no state.
//!
//! ## Layout
//!
//! All multi-byte integers are little-endian.
//!
//! ```text
//! +------------------------------------------------------------+
//! | header (20 bytes)                                          |
//! |   column_count u32 | row_count u32 | string_table_len u32  |
//! |   rows_affected_low u32 | rows_affected_high i32           |
//! +------------------------------------------------------------+
//! | column_count x { type_tag u8 | name_len u16 | name UTF-8 } |
//! +------------------------------------------------------------+
//! | string_table_len x { len u32 | bytes UTF-8 }               |
//! +------------------------------------------------------------+
//! | row_count x column_count x { tag u8 | payload }            |
//! +------------------------------------------------------------+
//! ```
//!
//! Cell tags: `0` NULL, `1` false, `2` true, `3` f64, `4` i64,
//! `5` string reference (u32 index), `6` bytes (u32 length + data).
//!
//! Any change to tag values, the column type table or field widths is a
//! breaking change that requires the producer and the decoder to move
//! together.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cell;
pub mod codec;
pub mod column;
pub mod error;
pub mod header;
pub mod types;

pub use cell::CellTag;
pub use codec::{ASCII_FAST_PATH_LEN, Utf8Policy, WireReader, put_string_entry};
pub use column::{COLUMN_TYPE_NAMES, ColumnType, UNKNOWN_TYPE_NAME, put_column};
pub use error::ProtocolError;
pub use header::{HEADER_SIZE, Header};
pub use types::TypeId;

/// Revision of the layout documented above.
///
/// Not written to the buffer; producer and consumer agree on it out of band.
pub const FORMAT_VERSION: u32 = 1;
