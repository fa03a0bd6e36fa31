//! Background and animation composition.

use crux_types::file::pic::picture1;
use crux_types::file::CruxError;
use crux_types::gfx::{Palette, Surface};
use crux_types::AnimationFile;

/// A decoded background with its matching palette.
#[derive(Debug, Clone)]
pub struct Background {
	/// 640x480 surface with the background rendered at the origin
	pub surface: Surface,
	/// Palette from the same-named type 0x03 resource
	pub palette: Palette,
}

/// Renders every animation frame over a copy of `base`.
///
/// Frames do not accumulate: each one is composited onto a fresh copy of
/// the base image at its own `(x, y)`.
pub fn render_animation(
	animation: &AnimationFile,
	base: &Surface,
) -> Result<Vec<Surface>, CruxError> {
	let mut frames = Vec::with_capacity(animation.frame_count());
	for (entry, stream) in animation.frames() {
		let mut surface = base.clone();
		picture1::decode(stream, entry.x as usize, entry.y as usize, &mut surface)?;
		frames.push(surface);
	}
	Ok(frames)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Picture1 stream drawing one `color` pixel.
	fn dot_stream(color: u8) -> Vec<u8> {
		let mut stream = vec![0x01];
		stream.extend_from_slice(&1u16.to_le_bytes());
		stream.extend_from_slice(&1u16.to_le_bytes());
		stream.extend_from_slice(&0u16.to_le_bytes());
		stream.extend_from_slice(&1u16.to_le_bytes());
		stream.extend_from_slice(&[0x00, color]);
		stream
	}

	fn animation(frames: &[(u16, u16, Vec<u8>)]) -> AnimationFile {
		let mut data = vec![0u8; 12];
		data[0] = 0x10;
		data[1] = 0x01;
		data[7] = 0x08;
		data[3..5].copy_from_slice(&1u16.to_le_bytes());
		data[5..7].copy_from_slice(&1u16.to_le_bytes());
		data[8..10].copy_from_slice(&(frames.len() as u16).to_le_bytes());
		for (x, y, stream) in frames {
			data.extend_from_slice(&x.to_le_bytes());
			data.extend_from_slice(&y.to_le_bytes());
			data.extend_from_slice(&(stream.len() as u16).to_le_bytes());
			data.extend_from_slice(&0u16.to_le_bytes());
		}
		for (_, _, stream) in frames {
			data.extend_from_slice(stream);
		}
		AnimationFile::from_bytes(data).unwrap()
	}

	#[test]
	fn test_frames_composite_over_base_independently() {
		let animation = animation(&[(0, 0, dot_stream(0x11)), (2, 1, dot_stream(0x22))]);

		let mut base = Surface::new(4, 2);
		base.fill(0x99);
		let frames = render_animation(&animation, &base).unwrap();

		assert_eq!(frames.len(), 2);
		// first frame draws at (0, 0) only
		assert_eq!(frames[0].get_pixel(0, 0), Some(0x11));
		assert_eq!(frames[0].get_pixel(2, 1), Some(0x99));
		// second frame starts from the base again, draws at (2, 1)
		assert_eq!(frames[1].get_pixel(0, 0), Some(0x99));
		assert_eq!(frames[1].get_pixel(2, 1), Some(0x22));
	}
}
