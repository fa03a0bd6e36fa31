//! Error types for resource parsing and decoding.

use thiserror::Error;

/// Identifies which parser or codec reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// `ADVENT.IDX` resource index
	Index,
	/// Palette resource (type 0x03) or FMV palette chunk
	Palette,
	/// Scan-line RLE picture (stream types 0x01-0x03)
	Picture1,
	/// Block-coded picture (stream type 0x04)
	Picture4,
	/// FMV container (type 0x10)
	Fmv,
	/// Background resource (type 0x06)
	Background,
	/// Animation resource (type 0x07)
	Animation,
	/// Script resource (type 0x04)
	Script,
}

impl std::fmt::Display for FileType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			FileType::Index => "index",
			FileType::Palette => "palette",
			FileType::Picture1 => "picture1",
			FileType::Picture4 => "picture4",
			FileType::Fmv => "fmv",
			FileType::Background => "background",
			FileType::Animation => "animation",
			FileType::Script => "script",
		};
		write!(f, "{name}")
	}
}

/// Errors that can occur while parsing or decoding game resources.
///
/// Every variant carries enough context for a diagnostic line: the parser
/// that failed, the offset inside the resource stream, and where applicable
/// the resource key involved.
#[derive(Debug, Error)]
pub enum CruxError {
	/// The input buffer was exhausted in the middle of a record
	#[error("{file_type}: truncated input at offset {offset}, {needed} more byte(s) needed")]
	TruncatedInput {
		/// Parser that hit the end of input
		file_type: FileType,
		/// Offset at which the read was attempted
		offset: usize,
		/// Number of bytes the read still required
		needed: usize,
	},

	/// An unrecognized block code, line type, chunk type or picture type
	#[error("{file_type}: unknown opcode 0x{opcode:02x} at offset {offset}")]
	UnknownOpcode {
		/// Parser that read the opcode
		file_type: FileType,
		/// The unrecognized value
		opcode: u32,
		/// Offset of the opcode byte
		offset: usize,
	},

	/// A value outside the format's stated invariants
	#[error("{file_type}: corrupt data at offset {offset}: {message}")]
	Corrupt {
		/// Parser that detected the violation
		file_type: FileType,
		/// Offset of the offending value
		offset: usize,
		/// Description of the violated invariant
		message: String,
	},

	/// The requested `(type, name)` pair is not present in the index
	#[error("missing resource: type 0x{type_id:02x}, name {name:?}")]
	MissingResource {
		/// Numeric resource type
		type_id: u32,
		/// Resource name as stored in the index
		name: String,
	},

	/// Two index entries share the same `(type, name)` key
	#[error("duplicate index entry: type 0x{type_id:02x}, name {name:?}")]
	DuplicateKey {
		/// Numeric resource type
		type_id: u32,
		/// Resource name as stored in the index
		name: String,
	},

	/// A decoder write would land outside the destination surface
	#[error("{file_type}: write outside destination surface (byte {index} of {len})")]
	OutOfBounds {
		/// Codec that produced the write
		file_type: FileType,
		/// Byte index of the attempted write
		index: usize,
		/// Size of the destination buffer
		len: usize,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl CruxError {
	/// Shorthand for a [`CruxError::Corrupt`] with a formatted message.
	pub fn corrupt(file_type: FileType, offset: usize, message: impl Into<String>) -> Self {
		CruxError::Corrupt {
			file_type,
			offset,
			message: message.into(),
		}
	}
}
