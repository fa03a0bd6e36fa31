//! Block-coded picture decoder.
//!
//! "Picture4" streams (type byte 0x04) carry most FMV frames. The image is
//! partitioned into an exact grid of `block_width` x `block_height` blocks,
//! visited in row-major order; each block opens with a code byte selecting
//! one of five sub-codecs.
//!
//! ## Header (9 bytes)
//!
//! ```text
//! Offset  Size  Field         Description
//! ------  ----  ------------  -------------------------------
//! 0x00    1     type          Stream type (0x04)
//! 0x01    2     width         Image width in pixels
//! 0x03    2     height        Image height in pixels
//! 0x05    2     block_width   Block width in pixels
//! 0x07    2     block_height  Block height in pixels
//! ```
//!
//! The blocks tile the image exactly: `width % block_width == 0` and
//! `height % block_height == 0`.
//!
//! ## Block codes
//!
//! | Code | Codec  | Description |
//! |------|--------|-------------|
//! | 0x00 | nop    | Previous block contents are kept |
//! | 0x01 | copy   | Raw bytes in boustrophedon order |
//! | 0x02 | brun16 | Nibble-packed RLE, 16-entry color table |
//! | 0x03 | skip64 | Byte-packed RLE, 64-entry color table |
//! | 0x04 | skip16 | Byte-packed RLE, 16-entry color table |
//! | 0x08 | skip8  | Byte-packed RLE, 8-entry color table |
//!
//! The RLE codecs share a color-table latch: a block whose first byte
//! (`total_count`) is 0xFF inherits the previous block's table. The latch
//! lives on the [`Decoder`], so it survives across pictures decoded with
//! the same decoder, which is what the original's file-scope state did.

mod blocks;
mod serpentine;

use crate::gfx::Surface;

use super::super::error::{CruxError, FileType};
use super::super::reader::ByteReader;

use blocks::DecoderContext;
use serpentine::BlockWriter;

/// Block code bytes.
pub mod block_codes {
	/// Keep the previous block contents
	pub const NOP: u8 = 0x00;
	/// Raw boustrophedon copy
	pub const COPY: u8 = 0x01;
	/// Nibble-packed RLE, 16-entry color table
	pub const BRUN16: u8 = 0x02;
	/// Byte-packed RLE, 64-entry color table
	pub const SKIP64: u8 = 0x03;
	/// Byte-packed RLE, 16-entry color table
	pub const SKIP16: u8 = 0x04;
	/// Byte-packed RLE, 8-entry color table
	pub const SKIP8: u8 = 0x08;
}

/// Size of the stream header in bytes.
pub const HEADER_SIZE: usize = 9;

/// Parsed picture4 stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Stream type byte (0x04)
	pub picture_type: u8,
	/// Image width in pixels
	pub width: u16,
	/// Image height in pixels
	pub height: u16,
	/// Block width in pixels
	pub block_width: u16,
	/// Block height in pixels
	pub block_height: u16,
}

impl Header {
	/// Parses a picture4 header from the start of `data`.
	pub fn from_bytes(data: &[u8]) -> Result<Self, CruxError> {
		let mut r = ByteReader::new(data, FileType::Picture4);
		Ok(Self {
			picture_type: r.read_u8()?,
			width: r.read_u16_le()?,
			height: r.read_u16_le()?,
			block_width: r.read_u16_le()?,
			block_height: r.read_u16_le()?,
		})
	}
}

impl std::fmt::Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"picture4 {}x{}, blocks {}x{}",
			self.width, self.height, self.block_width, self.block_height
		)
	}
}

/// Picture4 decoder.
///
/// Holds the color-table latch shared across blocks and, on purpose,
/// across consecutive pictures decoded through the same instance (an FMV
/// stream reuses one decoder for all of its frames).
#[derive(Debug)]
pub struct Decoder {
	ctx: DecoderContext,
}

impl Decoder {
	/// Creates a decoder with an empty color-table latch.
	pub fn new() -> Self {
		Self {
			ctx: DecoderContext::new(),
		}
	}

	/// Decodes one picture4 stream into the top-left corner of `surface`.
	///
	/// Returns the number of input bytes consumed.
	pub fn decode(&mut self, data: &[u8], surface: &mut Surface) -> Result<usize, CruxError> {
		let header = Header::from_bytes(data)?;
		let width = header.width as usize;
		let height = header.height as usize;
		let block_width = header.block_width as usize;
		let block_height = header.block_height as usize;

		log::debug!("{header}");

		if block_width == 0 || block_height == 0 {
			return Err(CruxError::corrupt(FileType::Picture4, 5, "zero block dimensions"));
		}
		if width % block_width != 0 || height % block_height != 0 {
			return Err(CruxError::corrupt(
				FileType::Picture4,
				5,
				format!(
					"blocks {block_width}x{block_height} do not tile a {width}x{height} image"
				),
			));
		}

		self.ctx.reset_count();

		let pitch = surface.pitch();
		let mut r = ByteReader::new(data, FileType::Picture4);
		r.seek(HEADER_SIZE)?;

		for y in (0..height).step_by(block_height) {
			for x in (0..width).step_by(block_width) {
				let code = r.read_u8()?;
				let base = y * pitch + x;
				let mut writer = BlockWriter::new(surface.data_mut(), base, width);

				match code {
					block_codes::NOP => {}
					block_codes::COPY => {
						blocks::copy(&mut r, &mut writer, block_width, block_height)?;
					}
					block_codes::BRUN16 => {
						blocks::brun16(&mut r, &mut writer, &mut self.ctx, block_width)?;
					}
					block_codes::SKIP64 => {
						blocks::skip64(&mut r, &mut writer, &mut self.ctx, block_width)?;
					}
					block_codes::SKIP16 => {
						blocks::skip16(&mut r, &mut writer, &mut self.ctx, block_width)?;
					}
					block_codes::SKIP8 => {
						blocks::skip8(&mut r, &mut writer, &mut self.ctx, block_width)?;
					}
					other => {
						return Err(CruxError::UnknownOpcode {
							file_type: FileType::Picture4,
							opcode: u32::from(other),
							offset: r.pos() - 1,
						});
					}
				}
			}
		}

		Ok(r.pos())
	}
}

impl Default for Decoder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn header(width: u16, height: u16, block_width: u16, block_height: u16) -> Vec<u8> {
		let mut bytes = vec![0x04];
		bytes.extend_from_slice(&width.to_le_bytes());
		bytes.extend_from_slice(&height.to_le_bytes());
		bytes.extend_from_slice(&block_width.to_le_bytes());
		bytes.extend_from_slice(&block_height.to_le_bytes());
		bytes
	}

	#[test]
	fn test_nop_grid() {
		// one 2x2 block, code 0: framebuffer untouched
		let mut data = header(2, 2, 2, 2);
		data.push(block_codes::NOP);

		let mut surface = Surface::new(4, 4);
		surface.fill(0x5A);
		let consumed = Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(consumed, data.len());
		assert!(surface.data().iter().all(|&p| p == 0x5A));
	}

	#[test]
	fn test_copy_block_boustrophedon() {
		// one 4x2 block: row 0 forward, row 1 backward
		let mut data = header(4, 2, 4, 2);
		data.push(block_codes::COPY);
		data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[1, 2, 3, 4]);
		assert_eq!(surface.row(1).unwrap(), &[8, 7, 6, 5]);
	}

	#[test]
	fn test_copy_multiple_blocks_row_major() {
		// 4x2 image of 2x2 blocks: left block then right block
		let mut data = header(4, 2, 2, 2);
		data.push(block_codes::COPY);
		data.extend_from_slice(&[1, 2, 3, 4]);
		data.push(block_codes::COPY);
		data.extend_from_slice(&[5, 6, 7, 8]);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[1, 2, 5, 6]);
		assert_eq!(surface.row(1).unwrap(), &[4, 3, 8, 7]);
	}

	#[test]
	fn test_skip16_draw_and_skip() {
		// 4x2 block; table [0xAA, 0xBB]; draw 3 of color 0, skip 2,
		// draw 3 of color 1 (wraps onto the backward row)
		let mut data = header(4, 2, 4, 2);
		data.push(block_codes::SKIP16);
		data.push(0x02); // total_count
		data.extend_from_slice(&[0xAA, 0xBB]);
		data.push(0x30); // draw 3 x table[0]
		data.push(0x02); // skip 2
		data.push(0x31); // draw 3 x table[1]
		data.push(0x00); // terminator

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		// forward row: AA AA AA, skip the 4th pixel and the backward
		// row's rightmost, then BB BB BB right-to-left
		assert_eq!(surface.row(0).unwrap(), &[0xAA, 0xAA, 0xAA, 0x00]);
		assert_eq!(surface.row(1).unwrap(), &[0xBB, 0xBB, 0xBB, 0x00]);
	}

	#[test]
	fn test_skip16_exact_row_draw_wraps() {
		// drawing exactly the row remainder takes the wrap branch
		let mut data = header(4, 2, 4, 2);
		data.push(block_codes::SKIP16);
		data.push(0x01);
		data.push(0xCC);
		data.push(0x40); // draw 4 x table[0]: fills row 0, wraps
		data.push(0x10); // draw 1 more: first pixel of backward row
		data.push(0x00);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[0xCC, 0xCC, 0xCC, 0xCC]);
		assert_eq!(surface.row(1).unwrap(), &[0x00, 0x00, 0x00, 0xCC]);
	}

	#[test]
	fn test_skip8_command_layout() {
		// skip8: count in bits 3-7, color in bits 0-2
		let mut data = header(4, 2, 4, 2);
		data.push(block_codes::SKIP8);
		data.push(0x01);
		data.push(0xEE);
		data.push(0x08 | 0x00); // draw 1 x table[0]
		data.push(0x03); // skip 3 (low bits only = skip)
		data.push(0x10); // draw 2 x table[0]
		data.push(0x00);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[0xEE, 0x00, 0x00, 0x00]);
		// skip of 3 consumed the rest of row 0 and wrapped, so the two
		// copies land at the right edge of the backward row
		assert_eq!(surface.row(1).unwrap(), &[0x00, 0x00, 0xEE, 0xEE]);
	}

	#[test]
	fn test_skip64_multi_copy() {
		// skip64: copies in bits 6-7, color in bits 0-5
		let mut data = header(4, 2, 4, 2);
		data.push(block_codes::SKIP64);
		data.push(0x03);
		data.extend_from_slice(&[0x10, 0x20, 0x30]);
		data.push(0xC2); // 3 copies of table[2]
		data.push(0x42); // 1 copy of table[2]
		data.push(0x81); // 2 copies of table[1]
		data.push(0x00);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[0x30, 0x30, 0x30, 0x30]);
		assert_eq!(surface.row(1).unwrap(), &[0x00, 0x00, 0x20, 0x20]);
	}

	#[test]
	fn test_color_table_inheritance() {
		// first block latches the table, second block inherits via 0xFF
		let mut data = header(4, 2, 2, 2);
		data.push(block_codes::SKIP16);
		data.push(0x01);
		data.push(0x77);
		data.push(0x20); // draw 2
		data.push(0x00);
		data.push(block_codes::SKIP16);
		data.push(0xFF); // inherit table and count
		data.push(0x20); // draw 2 with the inherited table
		data.push(0x00);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[0x77, 0x77, 0x77, 0x77]);
	}

	#[test]
	fn test_inherit_without_prior_table_is_corrupt() {
		let mut data = header(2, 2, 2, 2);
		data.push(block_codes::SKIP16);
		data.push(0xFF);
		data.push(0x10); // needs a color table nothing ever latched
		data.push(0x00);

		let mut surface = Surface::new(2, 2);
		let err = Decoder::new().decode(&data, &mut surface).unwrap_err();
		assert!(matches!(err, CruxError::Corrupt { .. }));
	}

	#[test]
	fn test_latch_survives_across_pictures() {
		let mut first = header(2, 2, 2, 2);
		first.push(block_codes::SKIP16);
		first.push(0x01);
		first.push(0x99);
		first.push(0x20);
		first.push(0x00);

		let mut second = header(2, 2, 2, 2);
		second.push(block_codes::SKIP16);
		second.push(0xFF);
		second.push(0x20);
		second.push(0x00);

		let mut decoder = Decoder::new();
		let mut surface = Surface::new(2, 2);
		decoder.decode(&first, &mut surface).unwrap();

		let mut surface2 = Surface::new(2, 2);
		decoder.decode(&second, &mut surface2).unwrap();
		assert_eq!(surface2.row(0).unwrap(), &[0x99, 0x99]);
	}

	#[test]
	fn test_single_col_tail() {
		// total_count 17 on a skip16 block: one single-column stream
		// follows the command terminator
		let mut data = header(4, 4, 4, 4);
		data.push(block_codes::SKIP16);
		data.push(17);
		data.extend_from_slice(&[0x11; 16]); // table capped at 16 bytes
		data.push(0x00); // no commands
		// single-column stream: color 0xDD, skip 1, draw 2, end
		data.extend_from_slice(&[0xDD, 0x01, 0xF0, 0xFF]);

		let mut surface = Surface::new(4, 4);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[0x00, 0xDD, 0xDD, 0x00]);
	}

	#[test]
	fn test_brun16_literal_and_run() {
		// table [0xA0, 0xA1, 0xA2, 0xA3]; one command:
		// literal=2, run=3, run color table[1], literal colors table[2], table[3]
		let mut data = header(8, 2, 8, 2);
		data.push(block_codes::BRUN16);
		data.push(0x04);
		data.extend_from_slice(&[0xA0, 0xA1, 0xA2, 0xA3]);
		// nibbles: 2,3,1,2,3 then terminator 0,0 -> bytes 0x23 0x12 0x30 0x00
		data.extend_from_slice(&[0x23, 0x12, 0x30, 0x00]);

		let mut surface = Surface::new(8, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(
			surface.row(0).unwrap(),
			&[0xA2, 0xA3, 0xA1, 0xA1, 0xA1, 0x00, 0x00, 0x00]
		);
	}

	#[test]
	fn test_brun16_odd_nibble_realign() {
		// literal=1 run=0: consumes 3 nibbles total, decoder realigns to
		// the byte boundary before the next block
		let mut data = header(4, 2, 2, 2);
		data.push(block_codes::BRUN16);
		data.push(0x01);
		data.push(0x5F);
		// nibbles: (1,0) literal color idx 0, then (0,0) terminator,
		// padding nibble to realign -> bytes 0x10 0x00 0x00
		data.extend_from_slice(&[0x10, 0x00, 0x00]);
		data.push(block_codes::COPY);
		data.extend_from_slice(&[1, 2, 3, 4]);

		let mut surface = Surface::new(4, 2);
		Decoder::new().decode(&data, &mut surface).unwrap();

		assert_eq!(surface.row(0).unwrap(), &[0x5F, 0x00, 1, 2]);
		assert_eq!(surface.row(1).unwrap(), &[0x00, 0x00, 4, 3]);
	}

	#[test]
	fn test_unknown_block_code() {
		let mut data = header(2, 2, 2, 2);
		data.push(0x05);

		let mut surface = Surface::new(2, 2);
		let err = Decoder::new().decode(&data, &mut surface).unwrap_err();
		assert!(matches!(err, CruxError::UnknownOpcode { opcode: 0x05, .. }));
	}

	#[test]
	fn test_tiling_invariant() {
		let data = header(5, 2, 2, 2);
		let mut surface = Surface::new(8, 2);
		let err = Decoder::new().decode(&data, &mut surface).unwrap_err();
		assert!(matches!(err, CruxError::Corrupt { .. }));
	}

	#[test]
	fn test_decode_is_deterministic() {
		let mut data = header(4, 2, 4, 2);
		data.push(block_codes::SKIP16);
		data.push(0x02);
		data.extend_from_slice(&[0xAA, 0xBB]);
		data.extend_from_slice(&[0x30, 0x02, 0x31, 0x00]);

		let mut first = Surface::new(4, 2);
		let consumed_first = Decoder::new().decode(&data, &mut first).unwrap();
		let mut second = Surface::new(4, 2);
		let consumed_second = Decoder::new().decode(&data, &mut second).unwrap();

		assert_eq!(consumed_first, consumed_second);
		assert_eq!(first.data(), second.data());
	}
}
