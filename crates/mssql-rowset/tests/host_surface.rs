//! What a host runtime sees: logging output and the JSON shape of results.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mssql_rowset::{Decoder, DecoderConfig, decode};
use rowset_testing::{BufferBuilder, fixtures};

fn init_tracing() {
    // Another test may already have installed a subscriber.
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

// ============================================================================
// Logging Paths
// ============================================================================

mod logging {
    use super::*;

    #[test]
    fn test_decode_with_subscriber() {
        init_tracing();
        let result = decode(&fixtures::mixed(20, 6)).unwrap();
        assert_eq!(result.row_count(), 20);
    }

    #[test]
    fn test_lossy_and_trailing_paths_log() {
        init_tracing();
        let buf = BufferBuilder::new()
            .column_raw(200, b"bad\xFE")
            .string_raw(b"\xFF")
            .rows(1)
            .string_ref(0)
            .raw(&[0xAB, 0xCD])
            .build();
        let result = decode(&buf).unwrap();
        assert_eq!(result.columns()[0].name, "bad\u{FFFD}");
        assert_eq!(result.columns()[0].type_name(), "unknown");
        assert_eq!(result.rows()[0].get::<String>(0).unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_no_columns_path_logs() {
        init_tracing();
        let decoder = Decoder::new(DecoderConfig::untrusted());
        let result = decoder.decode(&fixtures::no_columns(3, 9)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.rows_affected(), 9);
    }
}

// ============================================================================
// JSON Shape
// ============================================================================

#[cfg(feature = "serde")]
mod json {
    use mssql_rowset::ColumnType;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_alice_bob_json() {
        let result = decode(&fixtures::alice_bob()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "columns": [
                    { "name": "id", "type": "int" },
                    { "name": "name", "type": "nvarchar" },
                ],
                "rows": [
                    { "id": 1.0, "name": "alice" },
                    { "id": 2.0, "name": "bob" },
                ],
                "row_count": 2,
                "rows_affected": 0,
            })
        );
    }

    #[test]
    fn test_duplicate_names_keep_last_value() {
        let buf = BufferBuilder::new()
            .column(ColumnType::Int, "x")
            .column(ColumnType::Bit, "x")
            .rows(1)
            .null()
            .bool(true)
            .build();
        let result = decode(&buf).unwrap();
        let row = serde_json::to_value(&result.rows()[0]).unwrap();
        assert_eq!(row, json!({ "x": true }));
    }

    #[test]
    fn test_bigint_and_bytes() {
        let buf = BufferBuilder::new()
            .column(ColumnType::BigInt, "big")
            .column(ColumnType::VarBinary, "raw")
            .rows(1)
            .i64(i64::MIN)
            .bytes(&[1, 2])
            .build();
        let result = decode(&buf).unwrap();
        let row = serde_json::to_value(&result.rows()[0]).unwrap();
        assert_eq!(row, json!({ "big": i64::MIN, "raw": [1, 2] }));
    }
}
