//! Prelude module for `crux_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use crux_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let index = IndexFile::open("ADVENT.IDX").unwrap();
//! let mut framebuffer = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Animation types
	AnimationFile,
	// Reader
	ByteReader,

	// Errors
	CruxError,
	FileType,

	// FMV types
	Fmv,

	// Index types
	IndexFile,
	Listing,
	Picture4Decoder,
	ResourceEntry,
	ResourceId,

	// Script types
	ScriptFile,
	res_type,
};

// Graphics types
#[doc(inline)]
pub use crate::gfx::{Color, Palette, SCREEN_HEIGHT, SCREEN_WIDTH, Surface};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
