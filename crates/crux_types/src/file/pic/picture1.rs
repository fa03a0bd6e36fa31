//! Scan-line RLE picture decoder.
//!
//! "Picture1" streams (type bytes 0x01-0x03) carry backgrounds, sprite
//! frames and low-complexity video frames. The image is decoded in
//! horizontal *slabs*: each slab has a Y origin and a height, and every
//! scan-line in a slab is encoded with one of five line codecs selected by
//! a per-line tag byte.
//!
//! ## Header (9 bytes)
//!
//! ```text
//! Offset  Size  Field        Description
//! ------  ----  -----------  -----------------------------
//! 0x00    1     type         Stream type (0x01-0x03)
//! 0x01    2     width        Image width in pixels
//! 0x03    2     height       Image height in pixels
//! 0x05    2     y0           Y origin of the first slab
//! 0x07    2     slab_height  Height of the first slab
//! ```
//!
//! ## Line codecs
//!
//! | Tag  | Semantics |
//! |------|-----------|
//! | 0x00 | Raw copy of exactly `width` bytes |
//! | 0x01 | RLE: `count < 0x80` repeats the next byte, `count >= 0x80` copies `256 - count` literal bytes, `count == 0` ends the line |
//! | 0x02 | Skip/literal: `count < 0x80` advances the cursor (transparent skip), `count >= 0x80` copies literals, `count == 0` ends the line |
//! | 0x03 | Leading skip byte, then alternating (run-or-literal, skip) pairs; a skip of 0xFF ends the line; a zero run byte is consumed and draws nothing |
//! | 0x04 | No-op, the row is left untouched |
//!
//! After a slab's scan-lines, two `u16` tail words `(skip_y, next_height)`
//! advance the Y origin past the slab plus `skip_y` rows; `next_height == 0`
//! ends the picture. A stream that ends exactly at a slab boundary, with no
//! tail words, is also accepted.

use crate::gfx::Surface;

use super::super::error::{CruxError, FileType};
use super::super::reader::ByteReader;

/// Size of the stream header in bytes.
pub const HEADER_SIZE: usize = 9;

/// Parsed picture1 stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Stream type byte (0x01-0x03)
	pub picture_type: u8,
	/// Image width in pixels
	pub width: u16,
	/// Image height in pixels
	pub height: u16,
	/// Y origin of the first slab
	pub y0: u16,
	/// Height of the first slab
	pub slab_height: u16,
}

impl Header {
	/// Parses a picture1 header from the start of `data`.
	pub fn from_bytes(data: &[u8]) -> Result<Self, CruxError> {
		let mut r = ByteReader::new(data, FileType::Picture1);
		Ok(Self {
			picture_type: r.read_u8()?,
			width: r.read_u16_le()?,
			height: r.read_u16_le()?,
			y0: r.read_u16_le()?,
			slab_height: r.read_u16_le()?,
		})
	}
}

#[inline]
fn put(surface: &mut Surface, index: usize, color: u8) -> Result<(), CruxError> {
	let len = surface.data().len();
	match surface.data_mut().get_mut(index) {
		Some(pixel) => {
			*pixel = color;
			Ok(())
		}
		None => Err(CruxError::OutOfBounds {
			file_type: FileType::Picture1,
			index,
			len,
		}),
	}
}

/// Decodes a picture1 stream into `surface` with its origin at
/// `(x0, blt_y)`.
///
/// Returns the number of input bytes consumed. Decoding stops on the
/// `next_height == 0` tail marker or when the input runs out.
pub fn decode(
	data: &[u8],
	x0: usize,
	blt_y: usize,
	surface: &mut Surface,
) -> Result<usize, CruxError> {
	let header = Header::from_bytes(data)?;
	let width = header.width as usize;
	let mut y0 = header.y0 as usize;
	let mut slab_height = header.slab_height as usize;

	log::debug!(
		"picture1: type {} size {}x{} y0 {} slab {}",
		header.picture_type,
		header.width,
		header.height,
		y0,
		slab_height
	);

	let pitch = surface.pitch();
	let mut r = ByteReader::new(data, FileType::Picture1);
	r.seek(HEADER_SIZE)?;

	while r.remaining() > 0 {
		for y in 0..slab_height {
			let mut dst = (blt_y + y0 + y) * pitch + x0;
			let line_type = r.read_u8()?;
			match line_type {
				0x00 => {
					for _ in 0..width {
						put(surface, dst, r.read_u8()?)?;
						dst += 1;
					}
				}

				0x01 => loop {
					let count = r.read_u8()?;
					if count == 0 {
						break;
					}
					if count < 0x80 {
						let color = r.read_u8()?;
						for _ in 0..count {
							put(surface, dst, color)?;
							dst += 1;
						}
					} else {
						for _ in 0..(256 - count as usize) {
							put(surface, dst, r.read_u8()?)?;
							dst += 1;
						}
					}
				},

				0x02 => loop {
					let count = r.read_u8()?;
					if count == 0 {
						break;
					}
					if count >= 0x80 {
						for _ in 0..(256 - count as usize) {
							put(surface, dst, r.read_u8()?)?;
							dst += 1;
						}
					} else {
						dst += count as usize;
					}
				},

				0x03 => {
					let skip = r.read_u8()?;
					dst += skip as usize;

					loop {
						let count = r.read_u8()?;
						if count > 0 && count < 0x80 {
							let color = r.read_u8()?;
							for _ in 0..count {
								put(surface, dst, color)?;
								dst += 1;
							}
						} else if count >= 0x80 {
							for _ in 0..(256 - count as usize) {
								put(surface, dst, r.read_u8()?)?;
								dst += 1;
							}
						}
						// count == 0 is consumed and draws nothing

						let skip = r.read_u8()?;
						if skip == 0xFF {
							break;
						}
						dst += skip as usize;
					}
				}

				0x04 => {}

				other => {
					return Err(CruxError::UnknownOpcode {
						file_type: FileType::Picture1,
						opcode: u32::from(other),
						offset: r.pos() - 1,
					});
				}
			}
		}

		y0 += slab_height;

		// A stream ending exactly at a slab boundary carries no tail words.
		if r.remaining() < 4 {
			break;
		}
		let skip_y = r.read_u16_le()? as usize;
		let next_height = r.read_u16_le()? as usize;
		y0 += skip_y;
		if next_height == 0 {
			break;
		}
		slab_height = next_height;
	}

	Ok(r.pos())
}
