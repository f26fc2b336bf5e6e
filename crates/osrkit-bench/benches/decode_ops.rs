//! Criterion micro-benchmarks for replay decoding and encoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use osrkit::{decode_header, parse_action_payload, Replay};
use osrkit_bench::{synthetic_payload, synthetic_replay};

/// Benchmark: decode the header fields only.
fn bench_decode_header(c: &mut Criterion) {
    let bytes = synthetic_replay(2_000);

    c.bench_function("decode_header", |b| {
        b.iter(|| {
            let (header, used) = decode_header(&bytes).unwrap();
            black_box((header, used));
        });
    });
}

/// Benchmark: full decode of a 2K-record replay (LZMA inflate + text parse).
fn bench_decode_full(c: &mut Criterion) {
    let bytes = synthetic_replay(2_000);

    c.bench_function("decode_full_2k_records", |b| {
        b.iter(|| {
            let replay = Replay::decode(&bytes).unwrap();
            black_box(&replay.actions);
        });
    });
}

/// Benchmark: parse the decompressed text payload only.
fn bench_parse_payload(c: &mut Criterion) {
    let payload = synthetic_payload(2_000);

    c.bench_function("parse_payload_2k_records", |b| {
        b.iter(|| {
            let records = parse_action_payload(&payload).unwrap();
            black_box(&records);
        });
    });
}

/// Benchmark: headerless block extraction (no decompression).
fn bench_headerless(c: &mut Criterion) {
    let bytes = synthetic_replay(2_000);

    c.bench_function("headerless_extract", |b| {
        b.iter(|| {
            let (header, block) = osrkit::headerless(&bytes).unwrap();
            black_box((header, block));
        });
    });
}

/// Benchmark: re-encode 2K records back into an LZMA block.
fn bench_encode_stream(c: &mut Criterion) {
    let records = parse_action_payload(&synthetic_payload(2_000)).unwrap();

    c.bench_function("encode_stream_2k_records", |b| {
        b.iter(|| {
            let block = osrkit::encode_action_stream(&records).unwrap();
            black_box(&block);
        });
    });
}

criterion_group!(
    benches,
    bench_decode_header,
    bench_decode_full,
    bench_parse_payload,
    bench_headerless,
    bench_encode_stream
);
criterion_main!(benches);
