//! FMV playback driver.
//!
//! Frames are consumed in file order; within a frame, chunks are consumed
//! in file order too, so a palette chunk takes effect before the picture
//! chunks that follow it in the same frame. After a frame's chunks are
//! done the framebuffer is presented and the driver sleeps 100 ms for the
//! 10 fps target, then polls the host for a quit signal. A partially
//! decoded frame is never presented: any codec failure aborts the video
//! with the framebuffer still holding its last valid frame.

use std::time::Duration;

use crux_types::file::fmv::{Fmv, chunk_type};
use crux_types::file::{CruxError, FileType, pal, pic};
use crux_types::gfx::{Palette, SCREEN_HEIGHT, SCREEN_WIDTH, Surface};
use crux_types::Picture4Decoder;

use crate::host::Host;

/// Per-frame presentation delay (10 fps).
pub const FRAME_DELAY: Duration = Duration::from_millis(100);

/// Plays a loaded video resource against a host.
///
/// One picture4 decoder serves the whole stream, so color tables latch
/// across frames exactly like they latch across blocks.
pub fn play_stream(data: &[u8], host: &mut dyn Host) -> Result<(), CruxError> {
	let mut fmv = Fmv::new(data)?;
	log::debug!("{}", fmv.header());

	let mut framebuffer = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
	let mut palette = Palette::new();
	let mut decoder = Picture4Decoder::new();

	let mut frame_index = 0u32;
	while let Some(frame) = fmv.next_frame()? {
		log::debug!("frame {frame_index}: {} chunks", frame.chunks.len());

		for chunk in &frame.chunks {
			if chunk.payload.is_empty() {
				continue;
			}
			match chunk.chunk_type {
				chunk_type::AUDIO => host.audio(chunk.payload),
				chunk_type::PALETTE => {
					pal::apply_chunk(&mut palette, chunk.payload)?;
					host.set_palette(&palette);
				}
				chunk_type::PICTURE => {
					pic::decode_frame(chunk.payload, &mut framebuffer, &mut decoder)?;
				}
				other => {
					return Err(CruxError::UnknownOpcode {
						file_type: FileType::Fmv,
						opcode: u32::from(other),
						offset: chunk.offset,
					});
				}
			}
		}

		host.present(&framebuffer);
		host.delay(FRAME_DELAY);
		if host.poll_quit() {
			log::debug!("video aborted by host after frame {frame_index}");
			break;
		}
		frame_index += 1;
	}

	Ok(())
}
