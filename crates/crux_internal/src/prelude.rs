//! Prelude module for `crux_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use crux_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let engine = Engine::open("ADVENT.IDX").unwrap();
//! let listing = engine.load_script("MENU").unwrap();
//! println!("{listing}");
//! ```

// Re-export everything from crux_types::prelude
#[doc(inline)]
pub use crux_types::prelude::*;

// Engine and catalog types
#[doc(inline)]
pub use crux_engine::{Background, Engine, FRAME_DELAY, Host, NullHost, render_animation};

#[doc(inline)]
pub use crux_vfs::{Catalog, DumpRecord};

// Re-export the crates for advanced usage
#[doc(inline)]
pub use crux_engine;

#[doc(inline)]
pub use crux_types;

#[doc(inline)]
pub use crux_vfs;
