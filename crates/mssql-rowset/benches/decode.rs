//! Benchmarks for whole-buffer decoding and encoding.

#![allow(clippy::unwrap_used, missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mssql_rowset::{
    Column, ColumnType, Decoder, DecoderConfig, RowSetEncoder, RowWriter, decode, encode,
};
use rowset_testing::fixtures;
use std::hint::black_box;

/// Benchmark decoding result sets of growing row counts.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for rows in [10u32, 1_000, 50_000] {
        let buf = fixtures::mixed(rows, 12);
        group.throughput(Throughput::Bytes(buf.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &buf, |b, buf| {
            b.iter(|| decode(black_box(buf)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the strict decoder against the lossy default.
fn bench_decode_strict(c: &mut Criterion) {
    let buf = fixtures::mixed(1_000, 12);
    let strict = Decoder::new(DecoderConfig::new().strict_utf8(true));

    c.bench_function("decode_strict_1000", |b| {
        b.iter(|| strict.decode(black_box(&buf)).unwrap())
    });
}

/// Benchmark producing a buffer through the callback interface.
fn bench_encode(c: &mut Criterion) {
    let columns = [
        Column::new("id", ColumnType::Int),
        Column::new("region", ColumnType::NVarChar),
        Column::new("total", ColumnType::BigInt),
    ];
    let regions = ["north", "south", "east", "west"];

    c.bench_function("encode_writer_10000", |b| {
        b.iter(|| {
            let mut encoder = RowSetEncoder::default();
            encoder.on_metadata(&columns).unwrap();
            for i in 0..10_000i32 {
                encoder.write_i32(0, i).unwrap();
                encoder.write_str(1, regions[i as usize % regions.len()]).unwrap();
                encoder.write_i64(2, i64::MAX - i64::from(i)).unwrap();
            }
            encoder.on_done(10_000).unwrap();
            encoder.finish().unwrap()
        })
    });

    let result = decode(&fixtures::mixed(1_000, 12)).unwrap();
    c.bench_function("encode_result_1000", |b| {
        b.iter(|| encode(black_box(&result)).unwrap())
    });
}

criterion_group!(benches, bench_decode, bench_decode_strict, bench_encode);
criterion_main!(benches);
