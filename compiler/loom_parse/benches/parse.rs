//! Parser benchmarks: full parses against re-parses after a small edit.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Benchmarks can panic")]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loom_ir::{Span, TextEdit};
use loom_parse::{parse_text, reparse};
use loom_syntax::ParseOptions;

/// `n` small functions with a few statements each.
fn generate_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "fn f{i}(int a, int b) -> int {{\n  int c = a * {i} + b;\n  if (c > 10) {{ return c; }}\n  return f{i}(c, b - 1);\n}}\n"
            )
        })
        .collect()
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/full");
    for size in [10, 100, 1000] {
        let source = generate_n_functions(size);
        group.bench_with_input(BenchmarkId::new("functions", size), &source, |b, src| {
            b.iter(|| black_box(parse_text(src.as_str(), ParseOptions::default())));
        });
    }
    group.finish();
}

fn bench_reparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/reparse");
    for size in [10, 100, 1000] {
        let source = generate_n_functions(size);
        let tree = parse_text(source.as_str(), ParseOptions::default());
        // Rename the middle function.
        let offset = source.find(&format!("f{}(int", size / 2)).unwrap() as u32;
        let edit = TextEdit::new(Span::at(offset, 1), "g");
        group.bench_with_input(BenchmarkId::new("functions", size), &tree, |b, tree| {
            b.iter(|| black_box(reparse(tree, std::slice::from_ref(&edit)).unwrap()));
        });
    }
    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let source = format!("x = {}1{};", "(".repeat(500), ")".repeat(500));
    c.bench_function("parser/nested_parentheses", |b| {
        b.iter(|| black_box(parse_text(source.as_str(), ParseOptions::default())));
    });
}

criterion_group!(benches, bench_full_parse, bench_reparse, bench_deep_nesting);
criterion_main!(benches);
