//! Reader and transformer benchmarks on generated calculator input.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tokio::runtime::{Builder, Runtime};
use weft_calc::{read, read_with_config, transform};
use weft_feature::EngineConfig;

/// Builds `lines` lines of mixed-precedence arithmetic with nested brackets
/// and function calls.
fn generate_corpus(lines: usize) -> String {
    let mut source = String::new();
    for i in 0..lines {
        source.push_str(&format!(
            "{i} + {}.5 * ({} - max({i}, 2 ^ {}) / 3)\n",
            i % 7,
            ["x", "y", "z"][i % 3],
            i % 4
        ));
    }
    source
}

fn generate_nested(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

fn runtime() -> Runtime {
    Builder::new_current_thread()
        .build()
        .expect("failed to build runtime")
}

fn bench_read(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("read");

    for lines in [10, 100, 1000] {
        let source = generate_corpus(lines);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &source, |b, source| {
            b.iter(|| rt.block_on(read(black_box(source))).unwrap())
        });
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("transform");

    for lines in [10, 100, 1000] {
        let syntax = rt.block_on(read(&generate_corpus(lines))).unwrap();
        group.throughput(Throughput::Elements(syntax.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &syntax, |b, syntax| {
            b.iter(|| rt.block_on(transform(black_box(syntax))).unwrap())
        });
    }
    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let rt = runtime();
    let config = EngineConfig::new().with_max_depth(4096);
    let source = generate_nested(1000);

    c.bench_function("read_nested_1000", |b| {
        b.iter(|| rt.block_on(read_with_config(black_box(&source), &config)).unwrap())
    });
}

criterion_group!(benches, bench_read, bench_transform, bench_nesting);
criterion_main!(benches);
