//! Decoder throughput over synthetic streams.
//!
//! Three traffic shapes, matching what real documents produce:
//!
//! - text-heavy pages, the common case, all JSON metadata
//! - JPEG passthrough, where the decoder should be close to memcpy
//! - raster reconstruction, zlib inflate plus PNG encode per record

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pdtp_decoder::RecordStream;
use pdtp_tests::{StreamBuilder, solid_jpeg};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime")
}

/// Drain a stream, returning the record count. Panics on any error so a
/// broken fixture fails the bench loudly instead of measuring garbage.
async fn drain(bytes: &[u8]) -> usize {
    let mut stream = RecordStream::new(bytes);
    let mut count = 0;
    while let Some(item) = stream.next().await {
        item.expect("bench streams decode cleanly");
        count += 1;
    }
    count
}

fn text_heavy(pages: u32) -> Vec<u8> {
    let mut builder = StreamBuilder::new();
    for page in 1..=pages {
        builder = builder.page(page, 612.0, 792.0);
        for line in 0..30 {
            builder = builder.text(page, &format!("line {line} of page {page}"));
        }
        builder = builder.path(page, "M 0 0 L 612 0 L 612 792 L 0 792 Z");
    }
    builder.finish()
}

fn bench_text_stream(c: &mut Criterion) {
    let bytes = text_heavy(20);
    let rt = runtime();

    let mut group = c.benchmark_group("decode_text");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("20_pages", |b| {
        b.iter(|| rt.block_on(drain(&bytes)));
    });
    group.finish();
}

fn bench_jpeg_passthrough(c: &mut Criterion) {
    let jpeg = solid_jpeg(64, 64, [180, 40, 90]);
    let mut builder = StreamBuilder::new().page(1, 612.0, 792.0);
    for _ in 0..10 {
        builder = builder.image_jpg(1, 64, 64, &jpeg, None);
    }
    let bytes = builder.finish();
    let rt = runtime();

    let mut group = c.benchmark_group("decode_passthrough");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("10_jpegs", |b| {
        b.iter(|| rt.block_on(drain(&bytes)));
    });
    group.finish();
}

fn bench_raster(c: &mut Criterion) {
    let rgb: Vec<u8> = (0..64u32 * 64).flat_map(|i| [i as u8, (i >> 8) as u8, 7]).collect();
    let mask = vec![0xC0u8; 64 * 64];
    let jpeg = solid_jpeg(64, 64, [20, 160, 220]);

    let raw_stream = StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .image_raw(1, 64, 64, &rgb, Some(&mask))
        .finish();
    let masked_jpeg_stream = StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .image_jpg(1, 64, 64, &jpeg, Some(&mask))
        .finish();

    let rt = runtime();
    let mut group = c.benchmark_group("decode_raster");

    group.throughput(Throughput::Bytes(raw_stream.len() as u64));
    group.bench_function("raw_64x64", |b| {
        b.iter(|| rt.block_on(drain(&raw_stream)));
    });

    group.throughput(Throughput::Bytes(masked_jpeg_stream.len() as u64));
    group.bench_function("masked_jpeg_64x64", |b| {
        b.iter(|| rt.block_on(drain(&masked_jpeg_stream)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_stream,
    bench_jpeg_passthrough,
    bench_raster
);
criterion_main!(benches);
