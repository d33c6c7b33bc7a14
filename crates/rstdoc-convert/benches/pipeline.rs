//! Benchmarks for the convert, optimize and chunk pipeline.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rstdoc_convert::{ConvertOptions, Converter};
use rstdoc_optimize::{OptimizeOptions, chunk_content, optimize};

/// Generate markup with the given number of sections and paragraphs.
fn generate_markup(sections: usize, paragraphs_per_section: usize) -> String {
    let mut rst = String::with_capacity(sections * paragraphs_per_section * 200);
    rst.push_str("Document Title\n==============\n\n");

    for i in 0..sections {
        let title = format!("Section {i}");
        rst.push_str(&format!("{title}\n{}\n\n", "-".repeat(title.len())));
        for j in 0..paragraphs_per_section {
            rst.push_str(&format!(
                "Paragraph {j} of section {i} with ``code``, **bold** and :doc:`guide`.\n\n"
            ));
        }
        rst.push_str(".. note::\n   Remember this.\n\n");
        rst.push_str(".. code-block:: python\n\n   print(\"hello\")\n\n");
    }
    rst
}

fn bench_convert_by_size(c: &mut Criterion) {
    let converter = Converter::new(ConvertOptions::default());
    let mut group = c.benchmark_group("convert_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (100, 5)] {
        let markup = generate_markup(sections, paragraphs);
        group.throughput(Throughput::Bytes(markup.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("markup", format!("{sections}s_{paragraphs}p")),
            &markup,
            |b, markup| b.iter(|| converter.convert_str(markup, "bench.rst")),
        );
    }

    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let converter = Converter::default();
    let markdown = converter
        .convert_str(&generate_markup(50, 4), "bench.rst")
        .markdown;
    let options = OptimizeOptions::default();

    c.bench_function("optimize_50_sections", |b| {
        b.iter(|| optimize(&markdown, &options));
    });
}

fn bench_chunk(c: &mut Criterion) {
    let converter = Converter::default();
    let markdown = converter
        .convert_str(&generate_markup(50, 4), "bench.rst")
        .markdown;

    let mut group = c.benchmark_group("chunk_by_budget");
    for chunk_size in [50, 200, 1000] {
        let options = OptimizeOptions {
            chunk_size,
            ..OptimizeOptions::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &options, |b, opts| {
            b.iter(|| chunk_content(&markdown, opts));
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let converter = Converter::default();
    let markup = generate_markup(20, 3);
    let options = OptimizeOptions::default();

    c.bench_function("convert_optimize_chunk", |b| {
        b.iter(|| {
            let markdown = converter.convert_str(&markup, "bench.rst").markdown;
            let optimized = optimize(&markdown, &options);
            chunk_content(&optimized, &options)
        });
    });
}

criterion_group!(
    benches,
    bench_convert_by_size,
    bench_optimize,
    bench_chunk,
    bench_full_pipeline
);
criterion_main!(benches);
