//! # mssql-rowset
//!
//! Hands SQL Server query results from a native driver layer to a host
//! object model through one compact binary buffer.
//!
//! The driver feeds a [`RowSetEncoder`] through the [`RowWriter`] callbacks
//! while it reads a result; the host side calls [`decode`] once on the
//! finished buffer and gets back a [`ResultSet`] of rows keyed by column
//! name. Strings are interned on the way in and shared on the way out.
//!
//! ## Features
//!
//! - **Single pass**: the decoder never seeks backwards or re-reads
//! - **String interning**: repeated values are stored and decoded once
//! - **Bounded allocation**: header counts are checked against the bytes
//!   actually present before anything is preallocated
//! - **Safe integers**: integers within ±2^53 travel as doubles so hosts with
//!   one number type need no per-cell branch
//!
//! ## Example
//!
//! ```rust
//! use mssql_rowset::{Column, ColumnType, RowSetEncoder, RowWriter, decode};
//!
//! # fn main() -> Result<(), mssql_rowset::Error> {
//! let mut encoder = RowSetEncoder::default();
//! encoder.on_metadata(&[
//!     Column::new("id", ColumnType::Int),
//!     Column::new("name", ColumnType::NVarChar),
//! ])?;
//! encoder.write_i32(0, 1)?;
//! encoder.write_str(1, "alice")?;
//! encoder.write_i32(0, 2)?;
//! encoder.write_str(1, "bob")?;
//! let buf = encoder.finish()?;
//!
//! let result = decode(&buf)?;
//! assert_eq!(result.row_count(), 2);
//! let name: String = result.rows()[1].get_by_name("name")?;
//! assert_eq!(name, "bob");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod collector;
pub mod config;
pub mod decode;
pub mod encoder;
pub mod error;
pub mod intern;
pub mod result;
pub mod row;
pub mod writer;

pub use collector::ValueCollector;
pub use config::{DecoderConfig, EncoderConfig, IntegerEncoding};
pub use decode::{Decoder, decode};
pub use encoder::{RowSetEncoder, encode};
pub use error::{Error, Result};
pub use intern::{Interner, StringTable};
pub use result::ResultSet;
pub use row::{ColMetaData, Column, Row};
pub use writer::RowWriter;

// Re-export the wire and value types callers need alongside the decoder.
pub use rowset_protocol::{ColumnType, ProtocolError, TypeId};
pub use rowset_types::{CellValue, FromCell, TypeError};
