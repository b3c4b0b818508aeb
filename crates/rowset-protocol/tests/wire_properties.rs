//! Property tests for the wire primitives.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use rowset_protocol::codec::{decode_name, put_u16_prefixed, put_u32_prefixed};
use rowset_protocol::{
    ASCII_FAST_PATH_LEN, CellTag, ColumnType, HEADER_SIZE, Header, ProtocolError, Utf8Policy,
    WireReader, cell, put_column,
};

// ============================================================================
// Header
// ============================================================================

mod header {
    use super::*;

    proptest! {
        #[test]
        fn prop_header_survives_encode(
            columns in any::<u32>(),
            rows in any::<u32>(),
            strings in any::<u32>(),
            rows_affected in any::<i64>(),
        ) {
            let header = Header::new(columns, rows, strings, rows_affected);
            let mut buf = Vec::new();
            header.encode(&mut buf);
            prop_assert_eq!(buf.len(), HEADER_SIZE);

            let decoded = Header::decode(&mut WireReader::new(&buf)).unwrap();
            prop_assert_eq!(decoded, header);
            prop_assert_eq!(decoded.rows_affected(), rows_affected);
        }

        #[test]
        fn prop_short_header_is_truncation(len in 0usize..HEADER_SIZE) {
            let buf = vec![0u8; len];
            let err = Header::decode(&mut WireReader::new(&buf)).unwrap_err();
            prop_assert!(err.is_truncation());
        }
    }
}

// ============================================================================
// Length-Prefixed Fields
// ============================================================================

mod prefixed {
    use super::*;

    proptest! {
        #[test]
        fn prop_u16_prefixed(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let mut buf = Vec::new();
            put_u16_prefixed(&mut buf, "name", &bytes).unwrap();
            let mut reader = WireReader::new(&buf);
            prop_assert_eq!(reader.read_u16_prefixed().unwrap(), &bytes[..]);
            prop_assert_eq!(reader.remaining(), 0);
        }

        #[test]
        fn prop_u32_prefixed(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let mut buf = Vec::new();
            put_u32_prefixed(&mut buf, "string", &bytes).unwrap();
            let mut reader = WireReader::new(&buf);
            prop_assert_eq!(reader.read_u32_prefixed().unwrap(), &bytes[..]);
            prop_assert_eq!(reader.remaining(), 0);
        }

        #[test]
        fn prop_cut_prefixed_field_is_truncation(
            bytes in prop::collection::vec(any::<u8>(), 1..64),
            cut in 1usize..64,
        ) {
            let mut buf = Vec::new();
            put_u32_prefixed(&mut buf, "string", &bytes).unwrap();
            let keep = buf.len() - cut.min(buf.len());
            let err = WireReader::new(&buf[..keep]).read_u32_prefixed().unwrap_err();
            prop_assert!(
                matches!(err, ProtocolError::TruncatedBuffer { .. }),
                "unexpected error: {:?}",
                err
            );
        }
    }
}

// ============================================================================
// Columns and Cells
// ============================================================================

mod descriptors {
    use super::*;

    proptest! {
        #[test]
        fn prop_column_descriptor(tag in any::<u8>(), name in "\\PC{0,48}") {
            let mut buf = Vec::new();
            put_column(&mut buf, ColumnType::from_tag(tag), &name).unwrap();

            let mut reader = WireReader::new(&buf);
            prop_assert_eq!(reader.read_u8().unwrap(), tag);
            let raw = reader.read_u16_prefixed().unwrap();
            let (decoded, lossy) =
                decode_name(raw, 3, ASCII_FAST_PATH_LEN, Utf8Policy::Strict).unwrap();
            prop_assert_eq!(decoded, name);
            prop_assert!(!lossy);
        }

        #[test]
        fn prop_lossy_names_match_std(raw in prop::collection::vec(any::<u8>(), 0..64)) {
            let (decoded, lossy) =
                decode_name(&raw, 0, ASCII_FAST_PATH_LEN, Utf8Policy::Lossy).unwrap();
            prop_assert_eq!(&decoded, &String::from_utf8_lossy(&raw));
            prop_assert_eq!(lossy, std::str::from_utf8(&raw).is_err());
        }

        #[test]
        fn prop_fixed_width_cells(int in any::<i64>(), float in any::<f64>(), index in any::<u32>()) {
            let mut buf = Vec::new();
            cell::put_i64(&mut buf, int);
            cell::put_f64(&mut buf, float);
            cell::put_string_ref(&mut buf, index);

            let mut reader = WireReader::new(&buf);
            for (expected, len) in [(CellTag::Int64, 8), (CellTag::Float64, 8), (CellTag::StringRef, 4)] {
                let tag = CellTag::from_u8(reader.read_u8().unwrap()).unwrap();
                prop_assert_eq!(tag, expected);
                prop_assert_eq!(tag.payload_len(), Some(len));
                reader.read_slice(len).unwrap();
            }
            prop_assert_eq!(reader.remaining(), 0);
            prop_assert_eq!(&buf[1..9], &int.to_le_bytes()[..]);
            prop_assert_eq!(&buf[10..18], &float.to_bits().to_le_bytes()[..]);
        }
    }
}
