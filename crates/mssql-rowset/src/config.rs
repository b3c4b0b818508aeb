//! Decoder and encoder configuration.

use rowset_protocol::{ASCII_FAST_PATH_LEN, Utf8Policy};

use crate::error::{Error, Result};

/// Limits and text handling for [`Decoder`](crate::Decoder).
///
/// Every limit defaults to `None`. Header counts are always checked against
/// the bytes actually present before anything is preallocated, so limits are
/// only needed to bound the total work a single buffer may cause.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Maximum number of columns (default: unlimited).
    pub max_columns: Option<u32>,
    /// Maximum number of rows (default: unlimited).
    pub max_rows: Option<u32>,
    /// Maximum number of intern table entries (default: unlimited).
    pub max_string_table_len: Option<u32>,
    /// Maximum payload of a single Bytes cell (default: unlimited).
    pub max_cell_bytes: Option<u32>,
    /// Reject invalid UTF-8 instead of replacing it (default: false).
    pub strict_utf8: bool,
    /// Names shorter than this many bytes may skip UTF-8 validation when
    /// they are pure ASCII (default: 32).
    pub ascii_fast_path_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_columns: None,
            max_rows: None,
            max_string_table_len: None,
            max_cell_bytes: None,
            strict_utf8: false,
            ascii_fast_path_len: ASCII_FAST_PATH_LEN,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of columns.
    #[must_use]
    pub fn max_columns(mut self, max: u32) -> Self {
        self.max_columns = Some(max);
        self
    }

    /// Set the maximum number of rows.
    #[must_use]
    pub fn max_rows(mut self, max: u32) -> Self {
        self.max_rows = Some(max);
        self
    }

    /// Set the maximum number of intern table entries.
    #[must_use]
    pub fn max_string_table_len(mut self, max: u32) -> Self {
        self.max_string_table_len = Some(max);
        self
    }

    /// Set the maximum size of a single Bytes cell.
    #[must_use]
    pub fn max_cell_bytes(mut self, max: u32) -> Self {
        self.max_cell_bytes = Some(max);
        self
    }

    /// Enable or disable strict UTF-8 checking.
    #[must_use]
    pub fn strict_utf8(mut self, strict: bool) -> Self {
        self.strict_utf8 = strict;
        self
    }

    /// Set the ASCII fast-path threshold for column names.
    ///
    /// `0` disables the fast path.
    #[must_use]
    pub fn ascii_fast_path_len(mut self, len: usize) -> Self {
        self.ascii_fast_path_len = len;
        self
    }

    /// Configuration for untrusted input.
    ///
    /// Strict UTF-8 plus limits sized for interactive query results.
    #[must_use]
    pub fn untrusted() -> Self {
        Self::default()
            .max_columns(4_096)
            .max_rows(10_000_000)
            .max_string_table_len(10_000_000)
            .max_cell_bytes(256 * 1024 * 1024)
            .strict_utf8(true)
    }

    /// The UTF-8 policy implied by [`strict_utf8`](Self::strict_utf8).
    #[must_use]
    pub fn utf8_policy(&self) -> Utf8Policy {
        if self.strict_utf8 {
            Utf8Policy::Strict
        } else {
            Utf8Policy::Lossy
        }
    }
}

/// Fail with [`Error::LimitExceeded`] when `value` is over an optional limit.
pub(crate) fn check_limit(what: &'static str, value: u32, limit: Option<u32>) -> Result<()> {
    match limit {
        Some(limit) if value > limit => Err(Error::LimitExceeded {
            what,
            value: u64::from(value),
            limit: u64::from(limit),
        }),
        _ => Ok(()),
    }
}

/// How the encoder writes integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerEncoding {
    /// Integers within ±2^53 become Float64 cells; wider ones become Int64.
    ///
    /// Hosts whose only number type is a double read every cell without a
    /// per-value branch.
    #[default]
    SafeFloat,
    /// Every integer becomes an Int64 cell.
    AlwaysInt64,
}

/// Configuration for [`RowSetEncoder`](crate::RowSetEncoder).
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Integer cell policy (default: [`IntegerEncoding::SafeFloat`]).
    pub integer_encoding: IntegerEncoding,
    /// Initial capacity of the cell buffer in bytes (default: 1 MiB).
    pub initial_cell_capacity: usize,
    /// Initial capacity of the intern table in entries (default: 4096).
    pub initial_string_capacity: usize,
    /// Maximum length of one Bytes cell (default: none beyond the `u32`
    /// length prefix).
    pub max_cell_bytes: Option<u32>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            integer_encoding: IntegerEncoding::SafeFloat,
            initial_cell_capacity: 1024 * 1024,
            initial_string_capacity: 4096,
            max_cell_bytes: None,
        }
    }
}

impl EncoderConfig {
    /// Create a new encoder configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integer cell policy.
    #[must_use]
    pub fn integer_encoding(mut self, encoding: IntegerEncoding) -> Self {
        self.integer_encoding = encoding;
        self
    }

    /// Set the initial cell buffer capacity in bytes.
    #[must_use]
    pub fn initial_cell_capacity(mut self, capacity: usize) -> Self {
        self.initial_cell_capacity = capacity;
        self
    }

    /// Set the initial intern table capacity in entries.
    #[must_use]
    pub fn initial_string_capacity(mut self, capacity: usize) -> Self {
        self.initial_string_capacity = capacity;
        self
    }

    /// Set the maximum length of one Bytes cell.
    #[must_use]
    pub fn max_cell_bytes(mut self, max: u32) -> Self {
        self.max_cell_bytes = Some(max);
        self
    }
}
