//! Benchmarks for payload encoding and decoding.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate a graphviz source with the given number of edges.
fn generate_source(edges: usize) -> String {
    let mut source = String::with_capacity(edges * 40 + 16);
    source.push_str("digraph G {\n");
    for i in 0..edges {
        source.push_str(&format!("  n{i} -> n{} [label=\"{i}\"];\n", (i * 31) % 97));
    }
    source.push_str("}\n");
    source
}

fn bench_encode_small(c: &mut Criterion) {
    c.bench_function("encode_hello_world", |b| {
        b.iter(|| kroki_payload::encode("digraph G {Hello->World}"));
    });
}

fn bench_codec_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_by_size");

    for edges in [10, 1_000, 100_000] {
        let source = generate_source(edges);
        let payload = kroki_payload::encode(&source).unwrap();
        group.throughput(Throughput::Bytes(source.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", edges), &source, |b, source| {
            b.iter(|| kroki_payload::encode(source));
        });
        group.bench_with_input(BenchmarkId::new("decode", edges), &payload, |b, payload| {
            b.iter(|| kroki_payload::decode(payload));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode_small, bench_codec_varying_sizes);
criterion_main!(benches);
