//! Internal crate for `crux-rs`.
//!
//! This module gathers the workspace crates behind one face for the
//! `crux-rs` facade, and should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use crux_internal::prelude::*;
//!
//! // All commonly used types are available
//! let mut framebuffer = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
//! let palette = Palette::new();
//! ```

/// `use crux_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the workspace crates for convenience
pub use crux_engine;
pub use crux_types;
pub use crux_vfs;
