//! Top-level engine operations over a resource catalog.

use std::path::Path;

use crux_types::file::pic::picture1;
use crux_types::file::{CruxError, bg, pal, res_type, script};
use crux_types::gfx::{Palette, SCREEN_HEIGHT, SCREEN_WIDTH, Surface};
use crux_types::{AnimationFile, Listing, ResourceId};
use crux_vfs::Catalog;

use crate::host::Host;
use crate::scene::Background;
use crate::video;

/// The engine core: a resource catalog plus the operations the game shell
/// calls into.
#[derive(Debug)]
pub struct Engine {
	catalog: Catalog,
}

impl Engine {
	/// Opens the engine over an `ADVENT.IDX` path; `ADVENT.RES` is
	/// expected next to it.
	pub fn open(index_path: impl AsRef<Path>) -> Result<Self, CruxError> {
		Ok(Self {
			catalog: Catalog::open(index_path)?,
		})
	}

	/// Opens the engine with explicit index and blob paths.
	pub fn with_paths(
		index_path: impl AsRef<Path>,
		res_path: impl AsRef<Path>,
	) -> Result<Self, CruxError> {
		Ok(Self {
			catalog: Catalog::with_paths(index_path, res_path)?,
		})
	}

	/// Returns the underlying catalog.
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// Plays a video resource against a host, pacing at 10 fps.
	pub fn play_video(&self, name: &str, host: &mut dyn Host) -> Result<(), CruxError> {
		log::debug!("playing video {name}");
		let data = self.catalog.load(&ResourceId::new(res_type::VIDEO, name))?;
		video::play_stream(&data, host)
	}

	/// Loads a standalone palette resource (type 0x03).
	pub fn load_palette(&self, name: &str) -> Result<Palette, CruxError> {
		let data = self.catalog.load(&ResourceId::new(res_type::PALETTE, name))?;
		pal::from_resource(&data)
	}

	/// Loads a background with its same-named palette, rendered at the
	/// origin of a fresh 640x480 surface.
	pub fn load_background(&self, name: &str) -> Result<Background, CruxError> {
		let palette = self.load_palette(name)?;
		let data = self.catalog.load(&ResourceId::new(res_type::BACKGROUND, name))?;
		let (header, stream) = bg::parse(&data)?;
		log::debug!(
			"background {name}: {}x{} at ({}, {}), {} byte stream",
			header.width,
			header.height,
			header.x,
			header.y,
			header.payload_size
		);

		let mut surface = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
		picture1::decode(stream, 0, 0, &mut surface)?;
		Ok(Background {
			surface,
			palette,
		})
	}

	/// Loads and parses an animation resource (type 0x07).
	///
	/// Frame composition over a base image is [`crate::render_animation`]'s
	/// job.
	pub fn load_animation(&self, name: &str) -> Result<AnimationFile, CruxError> {
		let data = self.catalog.load(&ResourceId::new(res_type::ANIMATION, name))?;
		AnimationFile::from_bytes(data)
	}

	/// Loads a script resource and renders its symbolic listing.
	pub fn load_script(&self, name: &str) -> Result<Listing, CruxError> {
		Ok(self.load_script_resource(name)?.disassemble(name))
	}

	/// Loads and parses a script resource without disassembling it.
	pub fn load_script_resource(&self, name: &str) -> Result<script::File, CruxError> {
		log::debug!("loading script {name}");
		let data = self.catalog.load(&ResourceId::new(res_type::SCRIPT, name))?;
		script::File::from_bytes(&data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::NullHost;
	use crux_types::gfx::Color;
	use std::path::PathBuf;
	use std::sync::atomic::{AtomicU32, Ordering};

	static TEST_DIR_SEQ: AtomicU32 = AtomicU32::new(0);

	struct PairBuilder {
		index: Vec<(String, u32, Vec<u8>)>,
	}

	impl PairBuilder {
		fn new() -> Self {
			Self {
				index: Vec::new(),
			}
		}

		fn add(&mut self, name: &str, type_id: u32, payload: Vec<u8>) -> &mut Self {
			self.index.push((name.to_string(), type_id, payload));
			self
		}

		fn write(&self) -> PathBuf {
			let dir = std::env::temp_dir().join(format!(
				"crux-engine-test-{}-{}",
				std::process::id(),
				TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed)
			));
			std::fs::create_dir_all(&dir).unwrap();

			let mut blob = Vec::new();
			let mut index = (self.index.len() as u32).to_le_bytes().to_vec();
			for (name, type_id, payload) in &self.index {
				index.push(name.len() as u8);
				index.extend_from_slice(name.as_bytes());
				index.extend_from_slice(&type_id.to_le_bytes());
				index.extend_from_slice(&(blob.len() as u32).to_le_bytes());
				index.extend_from_slice(&(payload.len() as u32).to_le_bytes());
				blob.extend_from_slice(payload);
			}

			std::fs::write(dir.join("ADVENT.IDX"), index).unwrap();
			std::fs::write(dir.join("ADVENT.RES"), blob).unwrap();
			dir
		}
	}

	fn palette_resource(r: u8, g: u8, b: u8) -> Vec<u8> {
		// 18-byte header, then entry 0 = (r, g, b) at 6-bit depth
		let mut data = vec![0u8; 786];
		data[18] = r;
		data[19] = g;
		data[20] = b;
		data
	}

	fn background_resource(stream: &[u8]) -> Vec<u8> {
		let mut data = vec![0u8; 20];
		data[0] = 0x10;
		data[1] = 0x01;
		data[8] = 0x01;
		data[3..5].copy_from_slice(&2u16.to_le_bytes());
		data[5..7].copy_from_slice(&1u16.to_le_bytes());
		data[16..20].copy_from_slice(&(stream.len() as u32).to_le_bytes());
		data.extend_from_slice(stream);
		data
	}

	fn tiny_picture1() -> Vec<u8> {
		let mut stream = vec![0x01];
		stream.extend_from_slice(&2u16.to_le_bytes());
		stream.extend_from_slice(&1u16.to_le_bytes());
		stream.extend_from_slice(&0u16.to_le_bytes());
		stream.extend_from_slice(&1u16.to_le_bytes());
		stream.extend_from_slice(&[0x00, 0xAA, 0xBB]);
		stream.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
		stream
	}

	fn script_resource() -> Vec<u8> {
		let mut data = 2u32.to_le_bytes().to_vec();
		for _ in 0..7 {
			data.extend_from_slice(&0u32.to_le_bytes());
		}
		data.extend_from_slice(&0u32.to_le_bytes()); // cursors
		data.extend_from_slice(&0u32.to_le_bytes()); // areas
		data.extend_from_slice(&[0u8; 15 * 4]); // reserved
		data.extend_from_slice(&1u32.to_le_bytes()); // one script
		data.extend_from_slice(&1u32.to_le_bytes()); // one command
		for value in [0x04u32, 5, 0xDEAD, 0] {
			data.extend_from_slice(&value.to_le_bytes());
		}
		data
	}

	fn video_resource() -> Vec<u8> {
		let picture = tiny_picture1();
		let mut data = vec![0u8; 4];
		data.extend_from_slice(&1u16.to_le_bytes()); // one frame
		data.extend_from_slice(&[0u8; 10]);
		data.extend_from_slice(&1u16.to_le_bytes()); // one chunk
		data.extend_from_slice(&(picture.len() as u32).to_le_bytes());
		data.extend_from_slice(&0x0010u16.to_le_bytes());
		data.extend_from_slice(&0u16.to_le_bytes());
		data.extend_from_slice(&picture);
		data
	}

	#[test]
	fn test_load_background_with_palette() {
		let dir = PairBuilder::new()
			.add("MENU", res_type::PALETTE, palette_resource(0x3F, 0, 0))
			.add("MENU", res_type::BACKGROUND, background_resource(&tiny_picture1()))
			.write();

		let engine = Engine::open(dir.join("ADVENT.IDX")).unwrap();
		let background = engine.load_background("MENU").unwrap();

		assert_eq!(background.surface.get_pixel(0, 0), Some(0xAA));
		assert_eq!(background.surface.get_pixel(1, 0), Some(0xBB));
		assert_eq!(background.palette.get(0), Color::new(0xFC, 0, 0));
	}

	#[test]
	fn test_play_video_end_to_end() {
		let dir = PairBuilder::new().add("INTRO", res_type::VIDEO, video_resource()).write();

		let engine = Engine::open(dir.join("ADVENT.IDX")).unwrap();
		engine.play_video("INTRO", &mut NullHost).unwrap();
	}

	#[test]
	fn test_load_script_listing() {
		let dir = PairBuilder::new().add("MENU", res_type::SCRIPT, script_resource()).write();

		let engine = Engine::open(dir.join("ADVENT.IDX")).unwrap();
		let listing = engine.load_script("MENU").unwrap();

		assert_eq!(listing.scripts.len(), 1);
		assert_eq!(listing.scripts[0][0].text, "vars[0x5] = 0x0000dead");
	}

	#[test]
	fn test_missing_video_reports_resource() {
		let dir = PairBuilder::new().write();
		let engine = Engine::open(dir.join("ADVENT.IDX")).unwrap();

		let err = engine.play_video("NOPE", &mut NullHost).unwrap_err();
		assert!(matches!(err, CruxError::MissingResource { type_id, .. } if type_id == res_type::VIDEO));
	}
}
