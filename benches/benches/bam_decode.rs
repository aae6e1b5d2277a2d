//! Benchmark suite for BAM container decoding and playback
//!
//! This benchmark measures RLE8 decoding, container loading, the
//! deduplicating factory build and the playback hot path.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;
use std::io::Cursor;

use bam_benches::{COLOR_KEY, encode_rle, generate_frame_pixels, generate_test_bam_data, sizes};
use bam_types::anim::ManualClock;
use bam_types::file::bam::{File, Header, ImportConfig, rle};
use bam_types::sprite::SoftwareRenderer;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Benchmark RLE8 decoding at typical frame sizes
fn bench_rle_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decode");

	for (name, (width, height)) in [
		("icon", sizes::ICON),
		("character", sizes::CHARACTER),
		("creature", sizes::CREATURE),
		("screen", sizes::SCREEN),
	] {
		let encoded = encode_rle(&generate_frame_pixels(width, height, 1));
		let pixels = width as usize * height as usize;

		group.throughput(Throughput::Elements(pixels as u64));
		group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
			let mut output = vec![0u8; pixels];
			b.iter(|| {
				let result = rle::decode_into(black_box(encoded), &mut output, COLOR_KEY);
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark header parsing separately
fn bench_header_parsing(c: &mut Criterion) {
	let mut group = c.benchmark_group("bam_header");
	let data = generate_test_bam_data(1, 8, 8, 1, 1);

	group.bench_function("parse_header", |b| {
		b.iter(|| {
			let result = Header::from_bytes(black_box(&data));
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark loading tables and palette
fn bench_open(c: &mut Criterion) {
	let mut group = c.benchmark_group("bam_open");
	let config = ImportConfig::in_memory();

	for frames in [8u16, 64, 512] {
		let data = generate_test_bam_data(frames, 16, 16, 8, 8);
		group.bench_with_input(BenchmarkId::new("tables", frames), &data, |b, data| {
			b.iter(|| {
				let result = File::from_reader(Cursor::new(black_box(data.as_slice())), &config);
				black_box(result.map(|bam| bam.frame_count()))
			});
		});
	}

	group.finish();
}

/// Benchmark the deduplicating factory build
fn bench_animation_factory(c: &mut Criterion) {
	let mut group = c.benchmark_group("bam_factory");
	let config = ImportConfig::in_memory();
	let (width, height) = sizes::CHARACTER;

	// 16 cycles × 12 slots over 24 distinct frames, as in a creature with
	// 8 facings and 2 actions
	let data = generate_test_bam_data(24, width, height, 16, 12);
	group.throughput(Throughput::Elements(24));
	group.bench_function("dedup_build", |b| {
		b.iter(|| {
			let mut bam = File::from_reader(Cursor::new(black_box(data.as_slice())), &config)
				.expect("valid container");
			let factory = bam.animation_factory(&SoftwareRenderer, "BENCH");
			black_box(factory)
		});
	});

	group.finish();
}

/// Benchmark the per-frame playback step
fn bench_playback(c: &mut Criterion) {
	let mut group = c.benchmark_group("animation_playback");
	let data = generate_test_bam_data(10, 8, 8, 1, 10);
	let mut bam =
		File::from_reader(Cursor::new(data), &ImportConfig::in_memory()).expect("valid container");
	let factory = bam.animation_factory(&SoftwareRenderer, "BENCH").expect("valid factory");

	group.bench_function("next_frame", |b| {
		let mut animation = factory.animation(0).expect("cycle 0");
		let clock = ManualClock::new(0);
		b.iter(|| {
			clock.advance(16);
			black_box(animation.next_frame(&clock).is_some())
		});
	});

	group.finish();
}

criterion_group!(
	benches,
	bench_rle_decode,
	bench_header_parsing,
	bench_open,
	bench_animation_factory,
	bench_playback,
);

criterion_main!(benches);
