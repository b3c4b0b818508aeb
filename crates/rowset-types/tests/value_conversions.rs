//! Cell value conversion tests.
//!
//! Covers:
//! - NULL handling through `Option<T>`
//! - Integers that arrive narrowed to floats
//! - Formatting of temporal and decimal values

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use bytes::Bytes;
use proptest::prelude::*;
use rowset_types::format::{
    decimal_to_string, micros_offset_to_iso, micros_to_iso, nanos_to_time_str, unix_days_to_iso,
};
use rowset_types::{CellValue, FromCell, MAX_SAFE_INTEGER, TypeError};

// ============================================================================
// NULL Handling
// ============================================================================

mod null_handling {
    use super::*;

    #[test]
    fn test_null_to_option_i64() {
        let result = Option::<i64>::from_cell(&CellValue::Null).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_null_to_non_option_fails() {
        assert_eq!(i64::from_cell(&CellValue::Null), Err(TypeError::UnexpectedNull));
        assert_eq!(String::from_cell(&CellValue::Null), Err(TypeError::UnexpectedNull));
        assert_eq!(bool::from_cell(&CellValue::Null), Err(TypeError::UnexpectedNull));
    }

    #[test]
    fn test_option_passes_values_through() {
        let cell = CellValue::from("x");
        assert_eq!(
            Option::<String>::from_cell(&cell).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_cell_value_extracts_null() {
        assert_eq!(CellValue::from_cell(&CellValue::Null).unwrap(), CellValue::Null);
    }
}

// ============================================================================
// Integer Narrowing
// ============================================================================

mod integer_narrowing {
    use super::*;

    #[test]
    fn test_float_cell_reads_as_i64() {
        assert_eq!(i64::from_cell(&CellValue::Float(1.0)).unwrap(), 1);
        assert_eq!(i64::from_cell(&CellValue::Float(-255.0)).unwrap(), -255);
    }

    #[test]
    fn test_fractional_float_rejected() {
        assert_eq!(
            i64::from_cell(&CellValue::Float(0.5)),
            Err(TypeError::OutOfRange { target_type: "i64" })
        );
    }

    #[test]
    fn test_bigint_extremes() {
        assert_eq!(i64::from_cell(&CellValue::BigInt(i64::MAX)).unwrap(), i64::MAX);
        assert_eq!(i64::from_cell(&CellValue::BigInt(i64::MIN)).unwrap(), i64::MIN);
        assert_eq!(
            i32::from_cell(&CellValue::BigInt(i64::MAX)),
            Err(TypeError::OutOfRange { target_type: "i32" })
        );
    }

    #[test]
    fn test_f64_does_not_accept_bigint() {
        assert_eq!(
            f64::from_cell(&CellValue::BigInt(1)),
            Err(TypeError::TypeMismatch {
                expected: "f64",
                actual: "BIGINT",
            })
        );
    }

    proptest! {
        #[test]
        fn prop_safe_integers_survive_float_narrowing(v in -MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER) {
            let cell = CellValue::Float(v as f64);
            prop_assert_eq!(i64::from_cell(&cell).unwrap(), v);
        }
    }
}

// ============================================================================
// Strings and Binary
// ============================================================================

mod strings_and_binary {
    use super::*;

    #[test]
    fn test_unicode_string() {
        let cell = CellValue::from("日本語 🎉");
        assert_eq!(String::from_cell(&cell).unwrap(), "日本語 🎉");
        assert_eq!(cell.as_str(), Some("日本語 🎉"));
    }

    #[test]
    fn test_cloned_cells_share_string() {
        let cell = CellValue::from(Arc::<str>::from("shared"));
        let copy = cell.clone();
        match (&cell, &copy) {
            (CellValue::String(a), CellValue::String(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected string cells"),
        }
    }

    #[test]
    fn test_bytes_extraction() {
        let cell = CellValue::from(vec![0xDE, 0xAD]);
        assert_eq!(Vec::<u8>::from_cell(&cell).unwrap(), vec![0xDE, 0xAD]);
        assert_eq!(
            Bytes::from_cell(&cell).unwrap(),
            Bytes::from_static(&[0xDE, 0xAD])
        );
    }

    #[test]
    fn test_string_is_not_bytes() {
        let err = Vec::<u8>::from_cell(&CellValue::from("abc")).unwrap_err();
        assert!(matches!(err, TypeError::TypeMismatch { actual: "NVARCHAR", .. }));
    }
}

// ============================================================================
// Formatting
// ============================================================================

mod formatting {
    use super::*;

    #[test]
    fn test_money_style_decimal() {
        // MONEY carries four implied fraction digits.
        assert_eq!(decimal_to_string(123_450_000, 4).unwrap(), "12345.0000");
    }

    #[test]
    fn test_leap_day() {
        // 2024-02-29 is 19_782 days after the epoch.
        assert_eq!(unix_days_to_iso(19_782).unwrap(), "2024-02-29");
    }

    #[test]
    fn test_time_without_fraction() {
        assert_eq!(
            nanos_to_time_str(13 * 3_600 * 1_000_000_000 + 45 * 60 * 1_000_000_000).unwrap(),
            "13:45:00"
        );
    }

    #[test]
    fn test_datetimeoffset_negative_instant() {
        assert_eq!(
            micros_offset_to_iso(-1_000_000, 60).unwrap(),
            "1969-12-31T23:59:59+01:00"
        );
    }

    proptest! {
        #[test]
        fn prop_micros_to_iso_shape(micros in -62_135_596_800_000_000i64..253_402_300_799_000_000i64) {
            let s = micros_to_iso(micros).unwrap();
            prop_assert_eq!(&s[4..5], "-");
            prop_assert_eq!(&s[10..11], "T");
            prop_assert!(s.len() == 19 || s.len() == 26);
        }

        #[test]
        fn prop_decimal_fraction_width(value in any::<i64>(), scale in 1u8..=18) {
            let s = decimal_to_string(i128::from(value), scale).unwrap();
            let fraction = s.rsplit('.').next().unwrap();
            prop_assert_eq!(fraction.len(), scale as usize);
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
mod serialization {
    use super::*;

    #[test]
    fn test_cells_serialize_as_json_scalars() {
        let cells = vec![
            CellValue::Null,
            CellValue::Bool(true),
            CellValue::Float(1.5),
            CellValue::BigInt(i64::MAX),
            CellValue::from("alice"),
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[null,true,1.5,9223372036854775807,"alice"]"#);
    }
}
