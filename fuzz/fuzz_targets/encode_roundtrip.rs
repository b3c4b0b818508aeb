#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mssql_rowset::{CellValue, Column, ColumnType, ResultSet, decode, encode};

/// Arbitrary cell, mirroring the decoded cell kinds.
#[derive(Debug, Arbitrary)]
enum FuzzCell {
    Null,
    Bool(bool),
    Float(f64),
    BigInt(i64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<FuzzCell> for CellValue {
    fn from(cell: FuzzCell) -> Self {
        match cell {
            FuzzCell::Null => CellValue::Null,
            FuzzCell::Bool(v) => CellValue::Bool(v),
            FuzzCell::Float(v) => CellValue::Float(v),
            FuzzCell::BigInt(v) => CellValue::BigInt(v),
            FuzzCell::Text(v) => CellValue::from(v),
            FuzzCell::Blob(v) => CellValue::from(v),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    columns: Vec<(String, u8)>,
    cells: Vec<FuzzCell>,
    rows_affected: i64,
}

fuzz_target!(|input: FuzzInput| {
    let columns: Vec<_> = input
        .columns
        .into_iter()
        .take(16)
        .map(|(name, tag)| Column::new(name, ColumnType::from_tag(tag)))
        .collect();
    let width = columns.len();
    if width == 0 {
        return;
    }

    let cells: Vec<CellValue> = input.cells.into_iter().map(CellValue::from).collect();
    let rows: Vec<Vec<CellValue>> = cells
        .chunks_exact(width)
        .map(<[CellValue]>::to_vec)
        .collect();

    let Ok(result) = ResultSet::new(columns, rows, input.rows_affected) else {
        return;
    };
    // Over-long column names are the only encode failure.
    let Ok(buf) = encode(&result) else {
        return;
    };

    let decoded = decode(&buf).expect("encoder output must decode");
    assert_eq!(decoded.row_count(), result.row_count());
    assert_eq!(decoded.columns(), result.columns());
    assert_eq!(decoded.rows_affected(), result.rows_affected());

    for (got, want) in decoded.iter().zip(result.iter()) {
        for (a, b) in got.values().iter().zip(want.values()) {
            assert!(same_cell(a, b), "cell changed: {a:?} != {b:?}");
        }
    }
});

/// Cell equality with floats compared by bit pattern, so NaN payloads and
/// signed zeros must survive too.
fn same_cell(a: &CellValue, b: &CellValue) -> bool {
    match (a, b) {
        (CellValue::Float(x), CellValue::Float(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}
