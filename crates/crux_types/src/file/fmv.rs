//! FMV container parsing.
//!
//! A video resource (type 0x10) is a sequence of frames, each made of
//! typed chunks. The container is pulled apart here; driving the decoders
//! and pacing presentation is the playback driver's job.
//!
//! ## Container header (16 bytes)
//!
//! ```text
//! Offset  Size  Field        Description
//! ------  ----  -----------  --------------------------
//! 0x00    2     a0           Unidentified
//! 0x02    2     a1           Unidentified
//! 0x04    2     frame_count  Number of frames
//! 0x06    2     a3           Unidentified
//! 0x08    8     reserved     Unidentified
//! ```
//!
//! ## Frames and chunks
//!
//! Each frame opens with a `u16` chunk count, followed by that many
//! chunks:
//!
//! ```text
//! chunk_size  u32  Payload length in bytes (0 is legal)
//! chunk_type  u16  0x0082 audio, 0x0002 palette, 0x0010 picture
//! reserved    u16
//! payload     chunk_size bytes
//! ```
//!
//! A chunk size of 10 MB or more marks the stream as corrupt.

use super::error::{CruxError, FileType};
use super::reader::ByteReader;

/// Chunk type identifiers.
pub mod chunk_type {
	/// Audio payload, forwarded to the host sink
	pub const AUDIO: u16 = 0x0082;
	/// Palette chunk (see `file::pal::apply_chunk`)
	pub const PALETTE: u16 = 0x0002;
	/// Picture chunk (see `file::pic::decode_frame`)
	pub const PICTURE: u16 = 0x0010;
}

/// Upper bound on a sane chunk size; anything at or above is corrupt.
pub const MAX_CHUNK_SIZE: u32 = 10_000_000;

/// Size of the container header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Parsed FMV container header.
///
/// The `a0`/`a1`/`a3` words and the reserved block are unidentified;
/// they are preserved but never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Unidentified
	pub a0: u16,
	/// Unidentified
	pub a1: u16,
	/// Number of frames in the stream
	pub frame_count: u16,
	/// Unidentified
	pub a3: u16,
	/// Unidentified trailing bytes
	pub reserved: [u8; 8],
}

impl Header {
	/// Parses the container header from the start of `data`.
	pub fn from_bytes(data: &[u8]) -> Result<Self, CruxError> {
		let mut r = ByteReader::new(data, FileType::Fmv);
		let a0 = r.read_u16_le()?;
		let a1 = r.read_u16_le()?;
		let frame_count = r.read_u16_le()?;
		let a3 = r.read_u16_le()?;
		let mut reserved = [0u8; 8];
		reserved.copy_from_slice(r.take(8)?);
		Ok(Self {
			a0,
			a1,
			frame_count,
			a3,
			reserved,
		})
	}
}

impl std::fmt::Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"fmv: {} frames, header {:04x} {:04x} {:04x}",
			self.frame_count, self.a0, self.a1, self.a3
		)
	}
}

/// One chunk of a frame, borrowing its payload from the resource buffer.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
	/// Chunk type (see [`chunk_type`])
	pub chunk_type: u16,
	/// Reserved word following the type
	pub reserved: u16,
	/// Offset of the chunk header inside the resource, for diagnostics
	pub offset: usize,
	/// Payload bytes; empty for zero-size chunks
	pub payload: &'a [u8],
}

/// One frame: its chunks in file order.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
	/// Chunks in the order the container presents them
	pub chunks: Vec<Chunk<'a>>,
}

/// Pull-parser over an FMV resource.
#[derive(Debug)]
pub struct Fmv<'a> {
	reader: ByteReader<'a>,
	header: Header,
	frames_read: u16,
}

impl<'a> Fmv<'a> {
	/// Opens an FMV stream over a video resource payload.
	pub fn new(data: &'a [u8]) -> Result<Self, CruxError> {
		let header = Header::from_bytes(data)?;
		let mut reader = ByteReader::new(data, FileType::Fmv);
		reader.seek(HEADER_SIZE)?;
		Ok(Self {
			reader,
			header,
			frames_read: 0,
		})
	}

	/// Returns the container header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Parses the next frame, or `None` past the last one.
	pub fn next_frame(&mut self) -> Result<Option<Frame<'a>>, CruxError> {
		if self.frames_read >= self.header.frame_count {
			return Ok(None);
		}

		let chunk_count = self.reader.read_u16_le()?;
		let mut chunks = Vec::with_capacity(chunk_count as usize);

		for _ in 0..chunk_count {
			let offset = self.reader.pos();
			let chunk_size = self.reader.read_u32_le()?;
			let chunk_type = self.reader.read_u16_le()?;
			let reserved = self.reader.read_u16_le()?;

			if chunk_size >= MAX_CHUNK_SIZE {
				return Err(CruxError::corrupt(
					FileType::Fmv,
					offset,
					format!("chunk size {chunk_size} exceeds the 10 MB bound"),
				));
			}

			let payload: &[u8] = if chunk_size == 0 {
				&[]
			} else {
				self.reader.take(chunk_size as usize)?
			};
			chunks.push(Chunk {
				chunk_type,
				reserved,
				offset,
				payload,
			});
		}

		self.frames_read += 1;
		Ok(Some(Frame {
			chunks,
		}))
	}
}
