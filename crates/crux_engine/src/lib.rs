//! Engine core for the `crux-rs` project.
//!
//! This crate orchestrates the codecs in `crux_types` over the resource
//! catalog in `crux_vfs`: FMV playback with palette state and 10 fps
//! pacing, background and animation composition, and script listings.
//!
//! The platform surface (window, audio output, event pump) stays outside;
//! the driver talks to it through the [`Host`] trait only.
//!
//! # Examples
//!
//! ```no_run
//! use crux_engine::{Engine, NullHost};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::open("ADVENT.IDX")?;
//! engine.play_video("INTRO4", &mut NullHost)?;
//!
//! let listing = engine.load_script("MENU")?;
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```

mod engine;
mod host;
mod scene;
mod video;

pub use engine::Engine;
pub use host::{Host, NullHost};
pub use scene::{Background, render_animation};
pub use video::{FRAME_DELAY, play_stream};
