//! Azrion benchmark suite.
//!
//! Everything a turn does before the model call should be negligible next to
//! it:
//!   trackers_single_input ............ < 20μs
//!   dispatch_resolve_miss ............ < 10μs
//!   archive_search_10k ............... < 5ms
//!   context_summary_2k_words ......... < 1ms

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use azrion_bench::populated_document;
use azrion_core::dispatch::resolve;
use azrion_core::search::search_archive;
use azrion_core::summary::summarize_context;
use azrion_core::trackers::{track_habits, track_philosophy, update_stats};

const INPUT: &str = "Feeling lazy, stuck on a bug while coding; Camus said “one must imagine Sisyphus happy”";

/// Benchmark: all three trackers on one input.
fn bench_trackers(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("trackers_single_input", |b| {
        b.iter_batched(
            || populated_document(0),
            |mut doc| {
                update_stats(black_box(INPUT), &mut doc);
                track_habits(black_box(INPUT), &mut doc);
                track_philosophy(black_box(INPUT), &mut doc, &mut rng);
                doc
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: rule resolution, worst case (no rule matches).
fn bench_resolve(c: &mut Criterion) {
    c.bench_function("dispatch_resolve_miss", |b| {
        b.iter(|| black_box(resolve(black_box(INPUT))));
    });
    c.bench_function("dispatch_resolve_prefix", |b| {
        b.iter(|| black_box(resolve(black_box("delete folder tmp in Documents"))));
    });
}

/// Benchmark: archive search over 10k messages.
fn bench_search(c: &mut Criterion) {
    let doc = populated_document(10_000);
    c.bench_function("archive_search_10k", |b| {
        b.iter(|| black_box(search_archive(&doc.full_history, black_box("PARSER"), 6)));
    });
}

/// Benchmark: context summary with a large vocabulary.
fn bench_summary(c: &mut Criterion) {
    let mut doc = populated_document(0);
    for i in 0..2_000u64 {
        doc.stats.insert(format!("word{i}"), i % 97);
    }
    c.bench_function("context_summary_2k_words", |b| {
        b.iter(|| black_box(summarize_context(&doc)));
    });
}

criterion_group!(benches, bench_trackers, bench_resolve, bench_search, bench_summary);
criterion_main!(benches);
