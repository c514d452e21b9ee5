//! Criterion benchmarks for verbosity_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use verbosity_logger::prelude::*;

fn memory_logger(style: LevelStyle, threshold: Level) -> Logger {
    Logger::builder()
        .level_style(style)
        .threshold(threshold)
        .labels([("v", 1), ("vv", 2), ("vvv", 3)])
        .prefix("bench: ")
        .sink(SharedStream::new(WriterSink::named(std::io::sink(), "null")))
        .build()
        .unwrap()
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_suppressed(c: &mut Criterion) {
    let mut group = c.benchmark_group("suppressed");
    group.throughput(Throughput::Elements(1));

    let mut logger = memory_logger(LevelStyle::Levels, 1);
    group.bench_function("explicit_level", |b| {
        b.iter(|| report!(logger, black_box(3), "Filtered message").unwrap());
    });

    group.bench_function("label_array", |b| {
        b.iter(|| report!(logger, ["vvv"], black_box("Filtered message")).unwrap());
    });

    let mut masks = memory_logger(LevelStyle::Bitmask, 0b0001);
    group.bench_function("bitmask", |b| {
        b.iter(|| report!(masks, black_box(0b0110), "Filtered message").unwrap());
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emitted(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitted");
    group.throughput(Throughput::Elements(1));

    let mut logger = memory_logger(LevelStyle::Levels, 3);
    group.bench_function("single_line", |b| {
        b.iter(|| report!(logger, 2, black_box("Emitted message")).unwrap());
    });

    group.bench_function("multi_line", |b| {
        b.iter(|| {
            report!(
                logger,
                2,
                black_box("first line"),
                black_box("second line"),
                black_box("third line")
            )
            .unwrap()
        });
    });

    group.bench_function("label_shortcut", |b| {
        b.iter(|| report_label!(logger, "vv", black_box("Emitted message")).unwrap());
    });

    group.bench_function("with_overlay", |b| {
        b.iter(|| {
            report!(
                logger,
                Overlay::new().prefix("alt: ").level(1),
                black_box("Emitted message")
            )
            .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_suppressed, bench_emitted);
criterion_main!(benches);
