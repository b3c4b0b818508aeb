//! # rowset-types
//!
//! Values that come out of a decoded row set, and the conversions around
//! them.
//!
//! The wire format only knows six cell kinds, so richer SQL types are folded
//! into them by the producer:
//!
//! | SQL Server Type | Cell kind |
//! |-----------------|-----------|
//! | `BIT` | `Bool` |
//! | `TINYINT`/`SMALLINT`/`INT`/`REAL`/`FLOAT` | `Float` |
//! | `BIGINT` within ±2^53 | `Float` |
//! | `BIGINT` outside ±2^53 | `BigInt` |
//! | `CHAR`/`VARCHAR`/`NCHAR`/`NVARCHAR`/`XML` | `String` |
//! | `DECIMAL`/`DATE`/`TIME`/`DATETIME2`/`DATETIMEOFFSET`/`UNIQUEIDENTIFIER` | `String` (see [`format`]) |
//! | `BINARY`/`VARBINARY`/`IMAGE` | `Bytes` |
//!
//! ## Features
//!
//! - `decimal` (default): `From<rust_decimal::Decimal>` for [`CellValue`]
//! - `serde`: `Serialize` for [`CellValue`]

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod format;
pub mod from_cell;
pub mod value;

pub use error::TypeError;
pub use from_cell::FromCell;
pub use value::{CellValue, MAX_SAFE_INTEGER, float_to_i64};
