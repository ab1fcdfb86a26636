//! Benchmarks for the theme derivation pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use tint::{synthesize, Colour, MedianCutExtractor, PaletteExtraction};

/// Generate a square image with enough colour variety to keep every
/// median-cut split busy.
fn gradient_image(size: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(size, size, |x, y| {
        Rgba([
            ((x * 2) % 256) as u8,
            ((y * 2) % 256) as u8,
            (((x + y) * 3) % 256) as u8,
            255,
        ])
    }))
}

// -- Extraction benchmarks --

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    let small = gradient_image(64);
    let large = gradient_image(512);

    group.bench_function("extract_64", |b| {
        b.iter(|| MedianCutExtractor.extract(black_box(&small), 8).unwrap());
    });

    group.bench_function("extract_512", |b| {
        b.iter(|| MedianCutExtractor.extract(black_box(&large), 8).unwrap());
    });

    group.finish();
}

// -- Synthesis benchmarks --

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    let dark_base = Colour::from_hsl(220.0, 0.5, 0.3);
    let bright_base = Colour::from_hsl(50.0, 0.6, 0.8);

    group.bench_function("synthesize_dark", |b| {
        b.iter(|| synthesize(black_box(dark_base), black_box(0.2)));
    });

    group.bench_function("synthesize_bright", |b| {
        b.iter(|| synthesize(black_box(bright_base), black_box(0.8)));
    });

    group.finish();
}

// -- Full pipeline benchmarks --

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");

    let background = gradient_image(256);

    group.bench_function("derive_256", |b| {
        b.iter(|| {
            let palette = MedianCutExtractor
                .extract(black_box(&background), 8)
                .unwrap();
            synthesize(palette.base, palette.average_luminance())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_synthesis, bench_derivation);
criterion_main!(benches);
