//! Graphics primitives shared by the decoders and the playback driver.
//!
//! The game renders into an 8-bit paletted 640x480 framebuffer; every
//! picture codec writes palette indices into a [`Surface`] and the active
//! [`Palette`] maps them to RGB at presentation time.

pub mod palette;
pub mod surface;

/// Width of the game screen in pixels.
pub const SCREEN_WIDTH: usize = 640;

/// Height of the game screen in pixels.
pub const SCREEN_HEIGHT: usize = 480;

pub use palette::{Color, Palette};
pub use surface::Surface;
