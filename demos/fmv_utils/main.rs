//! FMV utilities: decode a video resource into numbered PNG frames.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use image::{ImageBuffer, Rgb};

use crux_rs::prelude::*;

#[derive(Parser)]
#[command(about = "Decode an FMV resource to PNG frames")]
struct Cli {
	/// Path to ADVENT.IDX (ADVENT.RES is expected next to it)
	#[arg(long, default_value = "ADVENT.IDX")]
	index: PathBuf,

	/// Video resource name (e.g. INTRO4)
	name: String,

	/// Output directory for the frame PNGs
	#[arg(long, default_value = ".")]
	out: PathBuf,
}

/// Host that writes every presented frame as a PNG instead of blitting.
struct PngHost {
	out: PathBuf,
	name: String,
	palette: Palette,
	frame_index: u32,
	audio_bytes: usize,
	error: Option<anyhow::Error>,
}

impl PngHost {
	fn write_frame(&mut self, frame: &Surface) -> anyhow::Result<()> {
		let mut rgb = Vec::with_capacity(frame.width() * frame.height() * 3);
		for &index in frame.data() {
			let color = self.palette.get(index);
			rgb.extend_from_slice(&[color.r, color.g, color.b]);
		}
		let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
			ImageBuffer::from_raw(frame.width() as u32, frame.height() as u32, rgb)
				.context("building image buffer")?;
		let path = self.out.join(format!("{}-{:03}.png", self.name, self.frame_index));
		img.save(&path).with_context(|| format!("writing {}", path.display()))?;
		Ok(())
	}
}

impl Host for PngHost {
	fn set_palette(&mut self, palette: &Palette) {
		self.palette = palette.clone();
	}

	fn present(&mut self, frame: &Surface) {
		if self.error.is_none() {
			self.error = self.write_frame(frame).err();
		}
		self.frame_index += 1;
	}

	fn delay(&mut self, _duration: Duration) {
		// frames go to disk, no pacing needed
	}

	fn poll_quit(&mut self) -> bool {
		self.error.is_some()
	}

	fn audio(&mut self, payload: &[u8]) {
		self.audio_bytes += payload.len();
	}
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let engine = Engine::open(&cli.index)?;
	std::fs::create_dir_all(&cli.out)?;

	let mut host = PngHost {
		out: cli.out,
		name: cli.name.clone(),
		palette: Palette::new(),
		frame_index: 0,
		audio_bytes: 0,
		error: None,
	};
	engine.play_video(&cli.name, &mut host)?;

	if let Some(error) = host.error {
		return Err(error);
	}
	println!(
		"decoded {} frames ({} bytes of audio skipped)",
		host.frame_index, host.audio_bytes
	);
	Ok(())
}
