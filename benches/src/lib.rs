//! Benchmark helper utilities for crux-rs
//!
//! This module generates synthetic picture4 streams for the decoder
//! benchmarks. The encoders here only cover what the benchmarks need;
//! writing game resources is otherwise out of scope for the project.

/// Builds a picture4 stream of raw-copy blocks (block code 0x01).
///
/// Every block carries `block_width * block_height` literal bytes, so this
/// measures the boustrophedon copy path and block dispatch overhead.
pub fn generate_copy_stream(
	width: u16,
	height: u16,
	block_width: u16,
	block_height: u16,
) -> Vec<u8> {
	let mut data = header(width, height, block_width, block_height);
	let block_pixels = block_width as usize * block_height as usize;
	let blocks = (width as usize / block_width as usize) * (height as usize / block_height as usize);

	for block in 0..blocks {
		data.push(0x01);
		for pixel in 0..block_pixels {
			data.push(((block + pixel) % 251) as u8);
		}
	}
	data
}

/// Builds a picture4 stream of skip16 blocks alternating skips and draws.
///
/// Each block declares a 4-entry color table, then covers its pixels with
/// a repeating skip-3 / draw-5 pattern, exercising the serpentine wrap
/// logic the way dense FMV frames do.
pub fn generate_skip16_stream(
	width: u16,
	height: u16,
	block_width: u16,
	block_height: u16,
) -> Vec<u8> {
	let mut data = header(width, height, block_width, block_height);
	let block_pixels = block_width as usize * block_height as usize;
	let blocks = (width as usize / block_width as usize) * (height as usize / block_height as usize);

	for block in 0..blocks {
		data.push(0x04);
		data.push(0x04); // total_count: 4 table entries, no tail
		data.extend_from_slice(&[0x10, 0x40, 0x80, 0xC0]);

		let mut covered = 0usize;
		let mut color = block % 4;
		while covered < block_pixels {
			let skip = 3.min(block_pixels - covered);
			data.push(skip as u8);
			covered += skip;

			let draw = 5.min(block_pixels - covered);
			if draw > 0 {
				data.push(((draw as u8) << 4) | color as u8);
				covered += draw;
			}
			color = (color + 1) % 4;
		}
		data.push(0x00);
	}
	data
}

fn header(width: u16, height: u16, block_width: u16, block_height: u16) -> Vec<u8> {
	let mut data = vec![0x04];
	data.extend_from_slice(&width.to_le_bytes());
	data.extend_from_slice(&height.to_le_bytes());
	data.extend_from_slice(&block_width.to_le_bytes());
	data.extend_from_slice(&block_height.to_le_bytes());
	data
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Tiny frame: 64x64
	pub const TINY: (u16, u16) = (64, 64);
	/// Quarter frame: 320x240
	pub const QUARTER: (u16, u16) = (320, 240);
	/// Full game frame: 640x480
	pub const FULL: (u16, u16) = (640, 480);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crux_types::gfx::Surface;
	use crux_types::Picture4Decoder;

	#[test]
	fn test_copy_stream_decodes() {
		let data = generate_copy_stream(64, 64, 16, 16);
		let mut surface = Surface::new(64, 64);
		let consumed = Picture4Decoder::new().decode(&data, &mut surface).unwrap();
		assert_eq!(consumed, data.len());
	}

	#[test]
	fn test_skip16_stream_decodes() {
		let data = generate_skip16_stream(64, 64, 16, 16);
		let mut surface = Surface::new(64, 64);
		let consumed = Picture4Decoder::new().decode(&data, &mut surface).unwrap();
		assert_eq!(consumed, data.len());
	}
}
