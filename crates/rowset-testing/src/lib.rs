//! # rowset-testing
//!
//! Test infrastructure for row-set producers and decoders.
//!
//! ## Features
//!
//! - [`BufferBuilder`] for hand-crafted buffers, including malformed ones
//! - Canned [`fixtures`] shared by unit tests, integration tests and benches
//!
//! ## Example
//!
//! ```rust
//! use rowset_testing::BufferBuilder;
//! use rowset_protocol::ColumnType;
//!
//! // A string reference past the end of a one-entry table.
//! let buf = BufferBuilder::new()
//!     .column(ColumnType::NVarChar, "name")
//!     .string("only")
//!     .rows(1)
//!     .string_ref(5)
//!     .build();
//! assert_eq!(buf.len(), 20 + 7 + 8 + 5);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod builder;
pub mod fixtures;

pub use builder::BufferBuilder;
