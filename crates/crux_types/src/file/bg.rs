//! Background resource parsing (type 0x06).
//!
//! A background is a 20-byte header followed by a picture1 stream that is
//! rendered at the screen origin. The matching palette lives in the
//! same-named type 0x03 resource.
//!
//! ## Header (20 bytes)
//!
//! ```text
//! Offset  Size  Field         Description
//! ------  ----  ------------  ----------------------------
//! 0x00    1     0x10          Checked
//! 0x01    1     0x01          Checked
//! 0x02    1     ?             Not checked
//! 0x03    2     width         Image width in pixels
//! 0x05    2     height        Image height in pixels
//! 0x07    1     ?             Not checked
//! 0x08    1     0x01          Checked
//! 0x09    3     ?             Not checked
//! 0x0C    2     x             Blit X (unused by the original)
//! 0x0E    2     y             Blit Y (unused by the original)
//! 0x10    4     payload_size  Length of the picture1 stream
//! ```

use super::error::{CruxError, FileType};

/// Size of the background header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Parsed background header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Image width in pixels
	pub width: u16,
	/// Image height in pixels
	pub height: u16,
	/// Blit X coordinate
	pub x: u16,
	/// Blit Y coordinate
	pub y: u16,
	/// Length of the picture1 stream in bytes
	pub payload_size: u32,
}

impl Header {
	/// Parses and validates a background header.
	pub fn from_bytes(data: &[u8]) -> Result<Self, CruxError> {
		if data.len() < HEADER_SIZE {
			return Err(CruxError::TruncatedInput {
				file_type: FileType::Background,
				offset: data.len(),
				needed: HEADER_SIZE - data.len(),
			});
		}
		// only these three bytes are fixed; the rest vary between resources
		if data[0] != 0x10 || data[1] != 0x01 || data[8] != 0x01 {
			return Err(CruxError::corrupt(
				FileType::Background,
				0,
				"not a background resource",
			));
		}

		Ok(Self {
			width: u16::from_le_bytes([data[3], data[4]]),
			height: u16::from_le_bytes([data[5], data[6]]),
			x: u16::from_le_bytes([data[12], data[13]]),
			y: u16::from_le_bytes([data[14], data[15]]),
			payload_size: u32::from_le_bytes([data[16], data[17], data[18], data[19]]),
		})
	}
}

/// Splits a background resource into its header and picture1 stream.
pub fn parse(data: &[u8]) -> Result<(Header, &[u8]), CruxError> {
	let header = Header::from_bytes(data)?;
	let end = HEADER_SIZE + header.payload_size as usize;
	let stream = data.get(HEADER_SIZE..end).ok_or(CruxError::TruncatedInput {
		file_type: FileType::Background,
		offset: data.len(),
		needed: end - data.len(),
	})?;
	Ok((header, stream))
}
