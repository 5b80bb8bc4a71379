//! Builder and compile benchmarks.
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rust_verbex::{CompileConfig, PatternBuilder, RegexCache};

fn url_builder() -> PatternBuilder {
    let mut b = PatternBuilder::new();
    b.start_of_line(true)
        .find("http")
        .maybe("s")
        .find("://")
        .maybe("www.")
        .anything_but(" ")
        .end_of_line(true);
    b
}

fn bench_assemble(c: &mut Criterion) {
    c.bench_function("assemble_url", |b| {
        b.iter(|| black_box(url_builder()).render());
    });
}

fn bench_alternatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("alternatives");

    for size in &[2, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut builder = PatternBuilder::new();
                builder.start_of_line(true);
                for i in 0..size {
                    builder.or_find(format!("word{i}"));
                }
                black_box(builder.end_of_line(true).render())
            });
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let builder = url_builder();
    let cache = RegexCache::with_default_config();
    let config = CompileConfig::default();

    c.bench_function("compile_cached", |b| {
        b.iter(|| builder.compile_with(black_box(&cache)));
    });

    c.bench_function("compile_uncached", |b| {
        b.iter(|| builder.compile_uncached(black_box(&config)));
    });
}

fn bench_match(c: &mut Criterion) {
    let matcher = url_builder().compile().unwrap();
    let haystack = "https://www.example.com/some/long/path?with=query";

    c.bench_function("match_url", |b| {
        b.iter(|| matcher.test(black_box(haystack)));
    });
}

criterion_group!(
    benches,
    bench_assemble,
    bench_alternatives,
    bench_compile,
    bench_match
);
criterion_main!(benches);
