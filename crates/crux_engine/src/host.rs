//! The seam between the engine core and the platform.

use std::time::Duration;

use crux_types::gfx::{Palette, Surface};

/// Platform services the playback driver relies on.
///
/// The original engine drove a paletted screen, a millisecond timer and an
/// event pump; this trait is that surface reduced to what the core
/// actually calls. Implementations decide what "presenting" means: a
/// window blit, a PNG on disk, or nothing at all.
pub trait Host {
	/// Publishes the active palette.
	///
	/// Called whenever a palette chunk has been applied, before any
	/// pictures of the same frame are presented.
	fn set_palette(&mut self, palette: &Palette);

	/// Presents a completed frame.
	fn present(&mut self, frame: &Surface);

	/// Sleeps between frames; the driver requests 100 ms for 10 fps.
	fn delay(&mut self, duration: Duration);

	/// Polled once per frame; returning true aborts playback.
	fn poll_quit(&mut self) -> bool;

	/// Receives a raw audio chunk payload.
	fn audio(&mut self, payload: &[u8]);
}

/// Host that swallows everything, for headless use and tests.
#[derive(Debug, Default)]
pub struct NullHost;

impl Host for NullHost {
	fn set_palette(&mut self, _palette: &Palette) {}

	fn present(&mut self, _frame: &Surface) {}

	fn delay(&mut self, _duration: Duration) {}

	fn poll_quit(&mut self) -> bool {
		false
	}

	fn audio(&mut self, _payload: &[u8]) {}
}
