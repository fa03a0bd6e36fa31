//! Script utilities: disassemble a script resource.

use std::path::PathBuf;

use clap::Parser;

use crux_rs::prelude::*;

#[derive(Parser)]
#[command(about = "Disassemble a script resource")]
struct Cli {
	/// Path to ADVENT.IDX (ADVENT.RES is expected next to it)
	#[arg(long, default_value = "ADVENT.IDX")]
	index: PathBuf,

	/// Script resource name (e.g. MENU, ENTRY)
	name: String,

	/// Emit the listing as JSON
	#[arg(long)]
	json: bool,

	/// Also print the string-array sections
	#[arg(long)]
	sections: bool,
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let engine = Engine::open(&cli.index)?;
	let script = engine.load_script_resource(&cli.name)?;
	let listing = script.disassemble(&cli.name);

	if cli.json {
		println!("{}", serde_json::to_string_pretty(&listing)?);
		return Ok(());
	}

	if cli.sections {
		println!("strings:    {:?}", script.strings);
		println!("palettes:   {:?}", script.palettes);
		println!("exits:      {:?}", script.exits);
		println!("animations: {:?}", script.animations);
		println!("smc:        {:?}", script.smc);
		println!("themes:     {:?}", script.themes);
		println!("sounds:     {:?}", script.sounds);
		println!("cursors:    {}", script.cursor_count);
		println!("areas:      {}", script.areas.len());
	}

	print!("{listing}");

	if !listing.missing_opcodes.is_empty() {
		let formatted: Vec<String> =
			listing.missing_opcodes.iter().map(|op| format!("0x{op:x}")).collect();
		println!("missing opcodes: {}", formatted.join(", "));
	}

	Ok(())
}
