//! Trait for converting decoded cells to Rust types.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::TypeError;
use crate::value::{CellValue, float_to_i64};

/// Trait for types that can be extracted from a [`CellValue`].
pub trait FromCell: Sized {
    /// Convert from a cell to this type.
    fn from_cell(value: &CellValue) -> Result<Self, TypeError>;

    /// Convert from an optional cell.
    ///
    /// Returns `None` if the value is NULL.
    fn from_cell_nullable(value: &CellValue) -> Result<Option<Self>, TypeError> {
        if value.is_null() {
            Ok(None)
        } else {
            Self::from_cell(value).map(Some)
        }
    }
}

fn mismatch(expected: &'static str, value: &CellValue) -> TypeError {
    match value {
        CellValue::Null => TypeError::UnexpectedNull,
        _ => TypeError::TypeMismatch {
            expected,
            actual: value.type_name(),
        },
    }
}

impl FromCell for bool {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::Bool(v) => Ok(*v),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl FromCell for i64 {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::BigInt(v) => Ok(*v),
            CellValue::Float(v) => float_to_i64(*v).ok_or(TypeError::OutOfRange {
                target_type: "i64",
            }),
            _ => Err(mismatch("i64", value)),
        }
    }
}

impl FromCell for i32 {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        let wide = i64::from_cell(value).map_err(|e| match e {
            TypeError::TypeMismatch { actual, .. } => TypeError::TypeMismatch {
                expected: "i32",
                actual,
            },
            TypeError::OutOfRange { .. } => TypeError::OutOfRange { target_type: "i32" },
            other => other,
        })?;
        i32::try_from(wide).map_err(|_| TypeError::OutOfRange { target_type: "i32" })
    }
}

impl FromCell for f64 {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::Float(v) => Ok(*v),
            _ => Err(mismatch("f64", value)),
        }
    }
}

impl FromCell for String {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::String(v) => Ok(v.to_string()),
            _ => Err(mismatch("String", value)),
        }
    }
}

impl FromCell for Arc<str> {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::String(v) => Ok(Arc::clone(v)),
            _ => Err(mismatch("Arc<str>", value)),
        }
    }
}

impl FromCell for Bytes {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::Bytes(v) => Ok(v.clone()),
            _ => Err(mismatch("Bytes", value)),
        }
    }
}

impl FromCell for Vec<u8> {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        match value {
            CellValue::Bytes(v) => Ok(v.to_vec()),
            _ => Err(mismatch("Vec<u8>", value)),
        }
    }
}

impl FromCell for CellValue {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        Ok(value.clone())
    }
}

impl<T: FromCell> FromCell for Option<T> {
    fn from_cell(value: &CellValue) -> Result<Self, TypeError> {
        T::from_cell_nullable(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_from_narrowed_float() {
        assert_eq!(i32::from_cell(&CellValue::Float(123.0)).unwrap(), 123);
        assert!(matches!(
            i32::from_cell(&CellValue::Float(3e10)),
            Err(TypeError::OutOfRange { target_type: "i32" })
        ));
    }

    #[test]
    fn test_i32_mismatch_names_target() {
        let err = i32::from_cell(&CellValue::from("x")).unwrap_err();
        assert_eq!(
            err,
            TypeError::TypeMismatch {
                expected: "i32",
                actual: "NVARCHAR",
            }
        );
    }

    #[test]
    fn test_arc_str_shares_allocation() {
        let cell = CellValue::from("shared");
        let a = Arc::<str>::from_cell(&cell).unwrap();
        let b = Arc::<str>::from_cell(&cell).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
