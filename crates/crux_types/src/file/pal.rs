//! Palette resource and FMV palette chunk decoding.
//!
//! Both carriers store 6-bit RGB channels that are expanded to 8 bits by a
//! left shift of 2.
//!
//! ## Standalone palette resource (type 0x03)
//!
//! ```text
//! Offset  Size  Field   Description
//! ------  ----  ------  ---------------------------------
//! 0x00    18    header  Not interpreted
//! 0x12    768   rgb6    256 colors, 3 bytes each, 6-bit
//! ```
//!
//! Any length other than 786 bytes means an RLE-compressed palette, which
//! is not supported.
//!
//! ## FMV palette chunk (chunk type 0x0002)
//!
//! ```text
//! start  u8    First palette index to update
//! end    u8    Last palette index to update (inclusive)
//! rgb6   (end - start + 1) * 3 bytes of 6-bit RGB
//! ```
//!
//! Entries outside `[start, end]` are preserved.

use crate::gfx::{Color, Palette};

use super::error::{CruxError, FileType};

/// Exact length of an uncompressed palette resource.
pub const RESOURCE_LEN: usize = 786;

/// Length of the header preceding the 768 RGB bytes.
pub const RESOURCE_HEADER_LEN: usize = 18;

/// Expands a 6-bit channel to 8 bits.
#[inline]
fn expand6(channel: u8) -> u8 {
	channel << 2
}

/// Decodes a standalone palette resource (type 0x03).
pub fn from_resource(data: &[u8]) -> Result<Palette, CruxError> {
	if data.len() != RESOURCE_LEN {
		return Err(CruxError::corrupt(
			FileType::Palette,
			0,
			format!("palette resource is {} bytes, expected {RESOURCE_LEN} (compressed palettes are not supported)", data.len()),
		));
	}

	let mut palette = Palette::new();
	for i in 0..Palette::SIZE {
		let offset = RESOURCE_HEADER_LEN + i * 3;
		palette.set(
			i as u8,
			Color::new(
				expand6(data[offset]),
				expand6(data[offset + 1]),
				expand6(data[offset + 2]),
			),
		);
	}
	Ok(palette)
}

/// Applies an FMV palette chunk to the active palette.
///
/// Only entries `[start, end]` change; everything else is preserved.
pub fn apply_chunk(palette: &mut Palette, chunk: &[u8]) -> Result<(), CruxError> {
	if chunk.len() < 2 {
		return Err(CruxError::TruncatedInput {
			file_type: FileType::Palette,
			offset: chunk.len(),
			needed: 2 - chunk.len(),
		});
	}

	let start = chunk[0];
	let end = chunk[1];
	if end < start {
		return Err(CruxError::corrupt(
			FileType::Palette,
			1,
			format!("palette chunk range runs backwards ({start}..{end})"),
		));
	}

	let count = (end - start) as usize + 1;
	if count * 3 + 2 != chunk.len() {
		return Err(CruxError::corrupt(
			FileType::Palette,
			2,
			format!("palette chunk length {} does not match range {start}..={end}", chunk.len()),
		));
	}

	for i in 0..count {
		let offset = 2 + i * 3;
		palette.set(
			start + i as u8,
			Color::new(
				expand6(chunk[offset]),
				expand6(chunk[offset + 1]),
				expand6(chunk[offset + 2]),
			),
		);
	}
	Ok(())
}
