//! Script resource parsing (type 0x04).
//!
//! A script resource is a fixed sequence of sections:
//!
//! 1. `script_type: u32` — discriminates the two container variants
//! 2. Seven string arrays (`u32` count + that many Pascal strings), in
//!    order: `strings, palettes, exits, animations, smc, themes, sounds`
//! 3. `u32` cursor count, then `count * 176` bytes of cursor records
//!    (not interpreted)
//! 4. `u32` area count, then `count` areas of five `u32`s
//! 5. 15 reserved `u32`s
//! 6. `u32` script count; each script is a command count (one byte for
//!    `script_type == 1`, four bytes otherwise) followed by that many
//!    16-byte command records `(opcode, a1, a2, a3)`
//!
//! Section pointers advance monotonically; there are no back-references.
//! The symbolic rendering of the command stream lives in [`disasm`].

pub mod disasm;

use super::error::{CruxError, FileType};
use super::reader::ByteReader;

pub use disasm::{Line, Listing};

/// One 16-byte script command record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
	/// Operation code
	pub opcode: u32,
	/// First argument
	pub a1: u32,
	/// Second argument
	pub a2: u32,
	/// Third argument
	pub a3: u32,
}

/// One entry of the area table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
	/// Left edge
	pub x0: u32,
	/// Top edge
	pub y0: u32,
	/// Right edge
	pub x1: u32,
	/// Bottom edge
	pub y1: u32,
	/// Flags
	pub flags: u32,
}

/// Size of one cursor record in bytes.
const CURSOR_RECORD_SIZE: usize = 176;

/// Number of reserved `u32`s between the area table and the scripts.
const RESERVED_WORDS: usize = 15;

/// Parsed script resource.
#[derive(Debug, Clone)]
pub struct File {
	/// Container variant (1 uses one-byte command counts)
	pub script_type: u32,
	/// Free-form strings
	pub strings: Vec<String>,
	/// Palette resource names
	pub palettes: Vec<String>,
	/// Exit names
	pub exits: Vec<String>,
	/// Animation resource names
	pub animations: Vec<String>,
	/// SMC (video sequence) names
	pub smc: Vec<String>,
	/// Theme names
	pub themes: Vec<String>,
	/// Sound names
	pub sounds: Vec<String>,
	/// Number of (skipped) cursor records
	pub cursor_count: u32,
	/// Area table
	pub areas: Vec<Area>,
	/// Scripts, each a list of commands
	pub scripts: Vec<Vec<Command>>,
}

impl File {
	/// Parses a script resource.
	pub fn from_bytes(data: &[u8]) -> Result<Self, CruxError> {
		let mut r = ByteReader::new(data, FileType::Script);

		let script_type = r.read_u32_le()?;
		log::debug!("script type {script_type}");

		let strings = read_string_array(&mut r)?;
		let palettes = read_string_array(&mut r)?;
		let exits = read_string_array(&mut r)?;
		let animations = read_string_array(&mut r)?;
		let smc = read_string_array(&mut r)?;
		let themes = read_string_array(&mut r)?;
		let sounds = read_string_array(&mut r)?;

		let cursor_count = r.read_u32_le()?;
		let cursor_bytes = cursor_count as usize * CURSOR_RECORD_SIZE;
		if cursor_bytes > r.remaining() {
			return Err(CruxError::corrupt(
				FileType::Script,
				r.pos(),
				format!("cursor table of {cursor_count} records runs past the resource"),
			));
		}
		r.skip(cursor_bytes)?;

		let area_count = r.read_u32_le()?;
		if area_count as usize * 20 > r.remaining() {
			return Err(CruxError::corrupt(
				FileType::Script,
				r.pos(),
				format!("area table of {area_count} records runs past the resource"),
			));
		}
		let mut areas = Vec::with_capacity(area_count as usize);
		for _ in 0..area_count {
			areas.push(Area {
				x0: r.read_u32_le()?,
				y0: r.read_u32_le()?,
				x1: r.read_u32_le()?,
				y1: r.read_u32_le()?,
				flags: r.read_u32_le()?,
			});
		}

		r.skip(RESERVED_WORDS * 4)?;

		let script_count = r.read_u32_le()?;
		if script_count as usize > r.remaining() {
			return Err(CruxError::corrupt(
				FileType::Script,
				r.pos(),
				format!("script count {script_count} runs past the resource"),
			));
		}
		let mut scripts = Vec::with_capacity(script_count as usize);
		for index in 0..script_count {
			let command_count = if script_type == 1 {
				u32::from(r.read_u8()?)
			} else {
				r.read_u32_le()?
			};
			log::debug!("commands in script {index}: {command_count}");

			if command_count as usize * 16 > r.remaining() {
				return Err(CruxError::corrupt(
					FileType::Script,
					r.pos(),
					format!("script {index} claims {command_count} commands past the resource"),
				));
			}
			let mut commands = Vec::with_capacity(command_count as usize);
			for _ in 0..command_count {
				commands.push(Command {
					opcode: r.read_u32_le()?,
					a1: r.read_u32_le()?,
					a2: r.read_u32_le()?,
					a3: r.read_u32_le()?,
				});
			}
			scripts.push(commands);
		}

		Ok(Self {
			script_type,
			strings,
			palettes,
			exits,
			animations,
			smc,
			themes,
			sounds,
			cursor_count,
			areas,
			scripts,
		})
	}
}

fn read_string_array(r: &mut ByteReader<'_>) -> Result<Vec<String>, CruxError> {
	let count = r.read_u32_le()? as usize;
	// each string needs at least its length byte
	if count > r.remaining() {
		return Err(CruxError::corrupt(
			FileType::Script,
			r.pos(),
			format!("string array of {count} entries runs past the resource"),
		));
	}
	let mut result = Vec::with_capacity(count);
	for _ in 0..count {
		result.push(r.read_pascal_string()?);
	}
	Ok(result)
}
