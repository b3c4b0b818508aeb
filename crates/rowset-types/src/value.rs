//! Cell value representation.

use std::sync::Arc;

use bytes::Bytes;

/// Largest integer magnitude an `f64` represents exactly (2^53).
pub const MAX_SAFE_INTEGER: i64 = 1 << 53;

/// A decoded cell.
///
/// Every SQL type the driver reports collapses into one of these kinds:
/// integers that fit in the safe-integer range arrive as `Float`, wider ones
/// as `BigInt`, and temporal/decimal/GUID values arrive as formatted text.
///
/// Strings are shared with the result set's intern table, so cloning a
/// `String` cell is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// NULL value.
    #[default]
    Null,
    /// Boolean value (BIT).
    Bool(bool),
    /// 64-bit floating point. Also carries integers within ±2^53.
    Float(f64),
    /// 64-bit integer outside the safe-integer range, or any BIGINT when the
    /// producer is configured to keep full width.
    BigInt(i64),
    /// Interned string.
    String(Arc<str>),
    /// Binary value, owned independently of the source buffer.
    Bytes(Bytes),
}

impl CellValue {
    /// Check if the value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the value as a bool, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an i64.
    ///
    /// `Float` cells convert when they hold an integral value within the
    /// safe-integer range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::BigInt(v) => Some(*v),
            Self::Float(v) => float_to_i64(*v),
            _ => None,
        }
    }

    /// Get the value as an f64, if it is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a string slice, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value as bytes, if it is binary.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Get the kind name as a string.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BIT",
            Self::Float(_) => "FLOAT",
            Self::BigInt(_) => "BIGINT",
            Self::String(_) => "NVARCHAR",
            Self::Bytes(_) => "VARBINARY",
        }
    }
}

/// Convert an integral float within ±2^53 to `i64`.
#[must_use]
pub fn float_to_i64(v: f64) -> Option<i64> {
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER as f64 {
        Some(v as i64)
    } else {
        None
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        Self::BigInt(i64::from(v))
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<f32> for CellValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::String(Arc::from(v))
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::String(Arc::from(v))
    }
}

impl From<Arc<str>> for CellValue {
    fn from(v: Arc<str>) -> Self {
        Self::String(v)
    }
}

impl From<&[u8]> for CellValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Vec<u8>> for CellValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for CellValue {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(feature = "decimal")]
impl From<rust_decimal::Decimal> for CellValue {
    fn from(v: rust_decimal::Decimal) -> Self {
        Self::String(Arc::from(v.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CellValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::BigInt(v) => serializer.serialize_i64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Bytes(v) => serializer.serialize_bytes(v),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_as_i64_from_float() {
        assert_eq!(CellValue::Float(42.0).as_i64(), Some(42));
        assert_eq!(CellValue::Float(-7.0).as_i64(), Some(-7));
        assert_eq!(CellValue::Float(1.5).as_i64(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_i64(), None);
        assert_eq!(CellValue::Float(1e300).as_i64(), None);
        assert_eq!(CellValue::BigInt(i64::MAX).as_i64(), Some(i64::MAX));
    }

    #[test]
    fn test_safe_integer_boundary() {
        let edge = MAX_SAFE_INTEGER as f64;
        assert_eq!(float_to_i64(edge), Some(MAX_SAFE_INTEGER));
        assert_eq!(float_to_i64(-edge), Some(-MAX_SAFE_INTEGER));
        assert_eq!(float_to_i64(edge * 2.0), None);
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let s = CellValue::from("abc");
        assert_eq!(s.as_str(), Some("abc"));
        assert_eq!(s.as_bool(), None);
        assert_eq!(s.as_bytes(), None);
        assert_eq!(s.type_name(), "NVARCHAR");
    }

    #[test]
    fn test_option_into_cell() {
        let none: Option<i64> = None;
        assert!(CellValue::from(none).is_null());
        assert_eq!(CellValue::from(Some(5i64)), CellValue::BigInt(5));
    }

    #[test]
    fn test_bytes_copy_is_independent() {
        let mut source = vec![1u8, 2, 3];
        let cell = CellValue::from(source.as_slice());
        source[0] = 9;
        assert_eq!(cell.as_bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[cfg(feature = "decimal")]
    #[test]
    fn test_decimal_into_text() {
        let d = rust_decimal::Decimal::new(-120345, 4);
        assert_eq!(CellValue::from(d).as_str(), Some("-12.0345"));
    }
}
