//! Benchmarks for the photowm image pipeline.
//!
//! Run with: cargo bench -p photowm-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use photowm_core::pipeline::resize::resize_to_fit;
use photowm_core::pipeline::watermark::layout_lines;
use photowm_core::pipeline::{fix_orientation, Compositor, FontFace, ImageDecoder, TrueTypeFace};
use std::path::Path;
use std::sync::Arc;

const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn photo(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn benchmark_orientation(c: &mut Criterion) {
    let img = photo(1920, 1080);

    c.bench_function("orientation_code_6", |b| {
        b.iter(|| fix_orientation(black_box(img.clone()), 6))
    });
    c.bench_function("orientation_code_3", |b| {
        b.iter(|| fix_orientation(black_box(img.clone()), 3))
    });
}

fn benchmark_resize(c: &mut Criterion) {
    let img = photo(4032, 3024);

    c.bench_function("resize_4032x3024_to_1000", |b| {
        b.iter(|| resize_to_fit(black_box(img.clone()), 1000))
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 90)
        .encode_image(&photo(1920, 1080))
        .unwrap();

    c.bench_function("decode_jpeg_1080p", |b| {
        b.iter(|| ImageDecoder::decode_bytes(black_box(&bytes), Path::new("bench.jpg")))
    });
}

fn benchmark_watermark(c: &mut Criterion) {
    let path = Path::new(SYSTEM_FONT);
    if !path.exists() {
        eprintln!("Skipping watermark benchmark: system font not found");
        return;
    }
    let face = Arc::new(TrueTypeFace::load(path).unwrap());
    let lines = vec!["2017-10-01 08:30:15".to_string(), "Shanghai".to_string()];

    c.bench_function("watermark_layout", |b| {
        b.iter(|| {
            let widths: Vec<f32> = lines.iter().map(|l| face.text_width(l, 31.0)).collect();
            layout_lines(1920, 1080, 31.0, black_box(&widths))
        })
    });

    let compositor = Compositor::new(face);
    let img = photo(1920, 1080);
    c.bench_function("watermark_compose_1080p", |b| {
        b.iter(|| compositor.compose(black_box(img.clone()), 0.0, &lines))
    });
}

criterion_group!(
    benches,
    benchmark_orientation,
    benchmark_resize,
    benchmark_decode,
    benchmark_watermark,
);
criterion_main!(benches);
