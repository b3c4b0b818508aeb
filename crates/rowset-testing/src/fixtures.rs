//! Canned row-set buffers.

use bytes::Bytes;
use rowset_protocol::ColumnType;

use crate::builder::BufferBuilder;

/// Two rows of `id`/`name`: `(1, "alice")` and `(2, "bob")`.
#[must_use]
pub fn alice_bob() -> Bytes {
    alice_bob_builder().build()
}

/// Builder behind [`alice_bob`], for tests that corrupt or extend it.
#[must_use]
pub fn alice_bob_builder() -> BufferBuilder {
    BufferBuilder::new()
        .column(ColumnType::Int, "id")
        .column(ColumnType::NVarChar, "name")
        .string("alice")
        .string("bob")
        .rows(2)
        .f64(1.0)
        .string_ref(0)
        .f64(2.0)
        .string_ref(1)
}

/// No columns, with a row count that must be ignored.
#[must_use]
pub fn no_columns(declared_rows: u32, rows_affected: i64) -> Bytes {
    BufferBuilder::new()
        .rows(declared_rows)
        .rows_affected(rows_affected)
        .build()
}

/// One `id` column and no rows.
#[must_use]
pub fn empty_rows() -> Bytes {
    BufferBuilder::new().column(ColumnType::Int, "id").build()
}

/// One `s` column whose rows reference entries 0, 1, 0.
#[must_use]
pub fn repeated_strings() -> Bytes {
    BufferBuilder::new()
        .column(ColumnType::VarChar, "s")
        .string("x")
        .string("y")
        .rows(3)
        .string_ref(0)
        .string_ref(1)
        .string_ref(0)
        .build()
}

/// One BIGINT cell holding `i64::MAX`.
#[must_use]
pub fn max_int64() -> Bytes {
    BufferBuilder::new()
        .column(ColumnType::BigInt, "v")
        .rows(1)
        .i64(i64::MAX)
        .build()
}

/// One column with an out-of-table type tag.
#[must_use]
pub fn unknown_column_type(tag: u8) -> Bytes {
    BufferBuilder::new()
        .column_raw(tag, b"mystery")
        .rows(1)
        .null()
        .build()
}

/// A deterministic result of `rows` x `columns` mixing every cell kind.
///
/// Strings cycle through a small pool so the intern table stays short.
#[must_use]
pub fn mixed(rows: u32, columns: u32) -> Bytes {
    const POOL: [&str; 4] = ["north", "south", "east", "west"];

    let mut builder = BufferBuilder::new();
    for col in 0..columns {
        let column_type = match col % 6 {
            0 => ColumnType::Int,
            1 => ColumnType::NVarChar,
            2 => ColumnType::Bit,
            3 => ColumnType::BigInt,
            4 => ColumnType::VarBinary,
            _ => ColumnType::Float,
        };
        builder = builder.column(column_type, &format!("c{col}"));
    }
    for s in POOL {
        builder = builder.string(s);
    }
    builder = builder.rows(rows).rows_affected(i64::from(rows));

    for row in 0..rows {
        for col in 0..columns {
            builder = match col % 6 {
                _ if (row + col) % 11 == 0 => builder.null(),
                0 => builder.f64(f64::from(row)),
                1 => builder.string_ref((row + col) % POOL.len() as u32),
                2 => builder.bool(row % 2 == 0),
                3 => builder.i64(i64::MAX - i64::from(row)),
                4 => builder.bytes(&row.to_le_bytes()),
                _ => builder.f64(f64::from(row) * 0.25),
            };
        }
    }
    builder.build()
}
