//! Benchmark suite for picture4 decoding
//!
//! Measures the block decoder over synthetic streams: raw boustrophedon
//! copies (memory-bound) and skip16 RLE (serpentine-logic-bound).
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use crux_benches::{generate_copy_stream, generate_skip16_stream, sizes};
use crux_types::Picture4Decoder;
use crux_types::gfx::Surface;
use std::hint::black_box;

fn bench_copy_blocks(c: &mut Criterion) {
	let mut group = c.benchmark_group("picture4_copy");

	for &(width, height) in &[sizes::TINY, sizes::QUARTER, sizes::FULL] {
		let data = generate_copy_stream(width, height, 16, 16);
		let pixels = u64::from(width) * u64::from(height);
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(
			BenchmarkId::new("decode", format!("{width}x{height}")),
			&data,
			|b, data| {
				let mut surface = Surface::new(width as usize, height as usize);
				let mut decoder = Picture4Decoder::new();
				b.iter(|| {
					let result = decoder.decode(black_box(data), &mut surface);
					black_box(result).unwrap()
				});
			},
		);
	}

	group.finish();
}

fn bench_skip16_blocks(c: &mut Criterion) {
	let mut group = c.benchmark_group("picture4_skip16");

	for &(width, height) in &[sizes::TINY, sizes::QUARTER, sizes::FULL] {
		let data = generate_skip16_stream(width, height, 16, 16);
		let pixels = u64::from(width) * u64::from(height);
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(
			BenchmarkId::new("decode", format!("{width}x{height}")),
			&data,
			|b, data| {
				let mut surface = Surface::new(width as usize, height as usize);
				let mut decoder = Picture4Decoder::new();
				b.iter(|| {
					let result = decoder.decode(black_box(data), &mut surface);
					black_box(result).unwrap()
				});
			},
		);
	}

	group.finish();
}

criterion_group!(benches, bench_copy_blocks, bench_skip16_blocks);
criterion_main!(benches);
