//! Criterion micro-benchmarks for material and problem encoding.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rhea_bench::{dense_material, transient_problem};
use rhea_codec::{decode_record, encode_record, Encoding};
use rhea_core::{FileHeader, FileKind, ValueTable};
use rhea_material::Material;
use rhea_problem::Problem;
use rhea_test_utils::fixtures::heat_problem;

/// Benchmark: encode a dense material in both encodings.
fn bench_encode_material(c: &mut Criterion) {
    let material = dense_material(200);
    let header = FileHeader::new(FileKind::Material);

    for encoding in [Encoding::Text, Encoding::Binary] {
        c.bench_function(&format!("encode_material_{encoding}"), |b| {
            b.iter(|| {
                let bytes = encode_record(encoding, &header, &material).unwrap();
                black_box(bytes);
            });
        });
    }
}

/// Benchmark: decode the same material.
fn bench_decode_material(c: &mut Criterion) {
    let material = dense_material(200);
    let header = FileHeader::new(FileKind::Material);

    for encoding in [Encoding::Text, Encoding::Binary] {
        let encoded = encode_record(encoding, &header, &material).unwrap();
        c.bench_function(&format!("decode_material_{encoding}"), |b| {
            b.iter(|| {
                let decoded: (FileHeader, Material) = decode_record(encoding, &encoded).unwrap();
                black_box(decoded);
            });
        });
    }
}

/// Benchmark: problem round trip through the binary encoding.
fn bench_problem_roundtrip(c: &mut Criterion) {
    let problem = heat_problem();
    let header = FileHeader::new(FileKind::Model);

    c.bench_function("problem_roundtrip_binary", |b| {
        b.iter(|| {
            let bytes = encode_record(Encoding::Binary, &header, &problem).unwrap();
            let decoded: (FileHeader, Problem) = decode_record(Encoding::Binary, &bytes).unwrap();
            black_box(decoded);
        });
    });
}

/// Benchmark: text encode of a long schedule with many probes.
fn bench_encode_transient(c: &mut Criterion) {
    let problem = transient_problem(10_000, 64);
    let header = FileHeader::new(FileKind::Model);

    c.bench_function("encode_transient_text_10k", |b| {
        b.iter(|| {
            let bytes = encode_record(Encoding::Text, &header, &problem).unwrap();
            black_box(bytes);
        });
    });
}

/// Benchmark: unordered inserts into a value table.
fn bench_table_insert(c: &mut Criterion) {
    let keys: Vec<f64> = (0..1_000).map(|i| ((i * 7919) % 1_000) as f64).collect();

    c.bench_function("value_table_insert_1k", |b| {
        b.iter(|| {
            let mut table = ValueTable::new();
            for &k in &keys {
                table.add(k, k * 2.0);
            }
            black_box(table);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_material,
    bench_decode_material,
    bench_problem_roundtrip,
    bench_encode_transient,
    bench_table_insert
);
criterion_main!(benches);
