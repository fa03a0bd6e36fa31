//! Resource catalog utilities: list the index, extract raw payloads, and
//! export backgrounds as PNG.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use image::{ImageBuffer, Rgb};

use crux_rs::prelude::*;

#[derive(Parser)]
#[command(about = "Inspect and extract ADVENT.IDX / ADVENT.RES resources")]
struct Cli {
	/// Path to ADVENT.IDX (ADVENT.RES is expected next to it)
	#[arg(long, default_value = "ADVENT.IDX")]
	index: PathBuf,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// List every index entry in file order
	List {
		/// Emit the listing as JSON
		#[arg(long)]
		json: bool,
	},

	/// Write a resource's raw payload to a file
	Extract {
		/// Numeric resource type (e.g. 4 for scripts, 0x10 for video)
		type_id: String,
		/// Resource name as stored in the index
		name: String,
		/// Output path
		out: PathBuf,
	},

	/// Decode a background resource and save it as PNG
	Background {
		/// Background resource name
		name: String,
		/// Output PNG path
		out: PathBuf,
	},
}

fn parse_type_id(text: &str) -> anyhow::Result<u32> {
	let parsed = match text.strip_prefix("0x") {
		Some(hex) => u32::from_str_radix(hex, 16)?,
		None => text.parse()?,
	};
	Ok(parsed)
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	match cli.command {
		Command::List {
			json,
		} => {
			let catalog = Catalog::open(&cli.index)?;
			let records = catalog.dump_records();
			if json {
				println!("{}", serde_json::to_string_pretty(&records)?);
			} else {
				for record in &records {
					println!(
						"{:<12} type=0x{:02x} offset={:<10} size={}",
						record.name, record.type_id, record.offset, record.length
					);
				}
				println!("{} resources", records.len());
			}
		}

		Command::Extract {
			type_id,
			name,
			out,
		} => {
			let catalog = Catalog::open(&cli.index)?;
			let id = ResourceId::new(parse_type_id(&type_id)?, name);
			catalog.dump(&id, &out).with_context(|| format!("extracting {id}"))?;
			println!("wrote {}", out.display());
		}

		Command::Background {
			name,
			out,
		} => {
			let engine = Engine::open(&cli.index)?;
			let background = engine.load_background(&name)?;

			let mut rgb = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 3);
			for &index in background.surface.data() {
				let color = background.palette.get(index);
				rgb.extend_from_slice(&[color.r, color.g, color.b]);
			}
			let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
				ImageBuffer::from_raw(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, rgb)
					.context("building image buffer")?;
			img.save(&out)?;
			println!("wrote {}", out.display());
		}
	}

	Ok(())
}
