//! This crate provides core data types and file format support for the `crux-rs` project.
//!
//! # File Formats
//!
//! - **IDX**: Resource index mapping `(type, name)` keys to offsets inside `ADVENT.RES`
//! - **Palette**: 256-entry 6-bit RGB tables, standalone or as FMV chunks
//! - **Picture1**: Scan-line RLE pictures (backgrounds, sprites, simple video frames)
//! - **Picture4**: Block-coded pictures with the serpentine traversal (most FMV frames)
//! - **FMV**: Frame/chunk container driving the palette and picture codecs
//! - **Background / Animation**: Layered pictures over a base image
//! - **Script**: Section container with a 16-byte command stream and its disassembler
//!
//! # Examples
//!
//! ```rust
//! use crux_types::file::idx;
//!
//! // A one-entry index: 04 "MENU", type 4, offset 0, length 16
//! let mut data = 1u32.to_le_bytes().to_vec();
//! data.push(4);
//! data.extend_from_slice(b"MENU");
//! data.extend_from_slice(&4u32.to_le_bytes());
//! data.extend_from_slice(&0u32.to_le_bytes());
//! data.extend_from_slice(&16u32.to_le_bytes());
//!
//! let index = idx::File::from_bytes(&data).unwrap();
//! assert_eq!(index.len(), 1);
//! ```

pub mod file;
pub mod gfx;
pub mod prelude;

// Re-export commonly used types at crate root for convenience
pub use file::{
	AnimationFile, ByteReader, CruxError, FileType, Fmv, IndexFile, Listing, Picture4Decoder,
	ResourceEntry, ResourceId, ScriptFile,
};
pub use gfx::{Color, Palette, SCREEN_HEIGHT, SCREEN_WIDTH, Surface};
