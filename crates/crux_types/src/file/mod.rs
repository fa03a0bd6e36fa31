//! File format support for the `crux-rs` project.
//!
//! Everything the game ships lives in two companion files: `ADVENT.IDX`
//! (the resource index, see [`idx`]) and `ADVENT.RES` (a packed blob of
//! typed resources). The modules here parse the index and decode each
//! resource type the engine core understands.

mod error;

pub mod ani;
pub mod bg;
pub mod fmv;
pub mod idx;
pub mod pal;
pub mod pic;
pub mod reader;
pub mod script;

/// Resource type identifiers used in `ADVENT.IDX`.
///
/// Types outside this set occur in the index and are stored, but the core
/// never decodes them.
pub mod res_type {
	/// Palette resource
	pub const PALETTE: u32 = 0x03;
	/// Script resource
	pub const SCRIPT: u32 = 0x04;
	/// Background resource
	pub const BACKGROUND: u32 = 0x06;
	/// Cursor / animation resource
	pub const ANIMATION: u32 = 0x07;
	/// FMV resource
	pub const VIDEO: u32 = 0x10;
}

// Re-export unified error type
pub use error::{CruxError, FileType};

// Re-export main file types
pub use ani::File as AnimationFile;
pub use fmv::Fmv;
pub use idx::{File as IndexFile, ResourceEntry, ResourceId};
pub use pic::picture4::Decoder as Picture4Decoder;
pub use reader::ByteReader;
pub use script::{File as ScriptFile, Listing};
