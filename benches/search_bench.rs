//! Search benchmarks.
//!
//! Every keystroke that survives the debounce runs a full `search`, so it has
//! to stay well inside a frame even on large corpora.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `search` | Full `search` (match + highlight + auto-expand) on the embedded corpus |
//! | `scaling` | `search` throughput as the corpus grows from 100 to 10k entries |
//! | `highlight` | Span computation alone, on one long answer |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench search_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use faqs::highlight::Highlighter;
use faqs::{AnswerBlock, Category, Corpus, FaqEngine, FaqEntry};
use std::hint::black_box;

fn synthetic_engine(n: usize) -> FaqEngine {
    let categories = (0..5)
        .map(|i| Category::new(format!("cat-{i}"), format!("Category {i}")))
        .collect();
    let entries = (0..n)
        .map(|i| {
            FaqEntry::new(
                format!("q-{i}"),
                format!("cat-{}", i % 5),
                format!("How does feature {i} handle deposits?"),
                vec![
                    AnswerBlock::paragraph(format!(
                        "Feature {i} applies a 2% withdrawal fee after the first deposit."
                    )),
                    AnswerBlock::list_item("Processing takes one to three business days."),
                ],
            )
        })
        .collect();
    FaqEngine::new(categories, entries)
}

// ---------------------------------------------------------------------------
// Embedded corpus
// ---------------------------------------------------------------------------

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let mut engine = FaqEngine::from(Corpus::embedded());

    for query in ["deposit", "withdrawal fee", "$100 (approx.)", "zzzqqq", ""] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{query:?}")), query, |b, q| {
            b.iter(|| engine.search(black_box(q)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

fn scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for n in [100usize, 1_000, 10_000] {
        let mut engine = synthetic_engine(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("deposit", n), &n, |b, _| {
            b.iter(|| engine.search(black_box("deposit")))
        });
        group.bench_with_input(BenchmarkId::new("miss", n), &n, |b, _| {
            b.iter(|| engine.search(black_box("zzzqqq")))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Highlight spans
// ---------------------------------------------------------------------------

fn highlight_bench(c: &mut Criterion) {
    let text = "A 2% withdrawal fee applies to card withdrawals. ".repeat(200);
    let highlighter = Highlighter::new("withdrawal").expect("non-empty query");

    let mut group = c.benchmark_group("highlight");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("10kb_answer", |b| b.iter(|| highlighter.spans(black_box(&text))));
    group.finish();
}

criterion_group!(benches, search_bench, scaling_bench, highlight_bench);
criterion_main!(benches);
