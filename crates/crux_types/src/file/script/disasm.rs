//! Symbolic rendering of script command streams.
//!
//! The opcode vocabulary is open: the commands below are the ones whose
//! behavior has been identified, everything else is rendered as a raw hex
//! quad and collected into [`Listing::missing_opcodes`]. Unknown opcodes
//! are logged but never fatal.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::{Command, File};

/// One rendered command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
	/// Command index inside its script
	pub index: u32,
	/// Symbolic text of the command
	pub text: String,
}

impl fmt::Display for Line {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:04x}: {}", self.index, self.text)
	}
}

/// Disassembly of a whole script resource.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
	/// Name of the script resource
	pub name: String,
	/// One line list per script in the resource
	pub scripts: Vec<Vec<Line>>,
	/// Opcodes the disassembler did not recognize, sorted
	pub missing_opcodes: BTreeSet<u32>,
}

impl fmt::Display for Listing {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, script) in self.scripts.iter().enumerate() {
			writeln!(f, "script {index} ({} commands):", script.len())?;
			for line in script {
				writeln!(f, "\t{line}")?;
			}
		}
		Ok(())
	}
}

/// Looks up a symbolic name in a section array, degrading to `?`.
fn sym(section: &[String], index: u32) -> &str {
	section.get(index as usize).map_or("?", String::as_str)
}

impl File {
	/// Renders the resource's command streams as a symbolic listing.
	///
	/// `name` is the resource name the script was loaded under; the 0x0c
	/// opcode is a terminator in the script named "ENTRY" and an inventory
	/// op everywhere else.
	pub fn disassemble(&self, name: &str) -> Listing {
		let mut missing_opcodes = BTreeSet::new();
		let scripts = self
			.scripts
			.iter()
			.map(|commands| {
				commands
					.iter()
					.enumerate()
					.map(|(index, command)| {
						let index = index as u32;
						let text = self.render(command, name, &mut missing_opcodes);
						Line {
							index,
							text,
						}
					})
					.collect()
			})
			.collect();

		Listing {
			name: name.to_string(),
			scripts,
			missing_opcodes,
		}
	}

	fn render(&self, command: &Command, name: &str, missing: &mut BTreeSet<u32>) -> String {
		let &Command {
			opcode,
			a1,
			a2,
			a3,
		} = command;

		match opcode {
			0x03 => {
				format!("exit_value = exit_table_values[{a1}] /* {} */", sym(&self.exits, a1))
			}
			0x04 => format!("vars[0x{a1:x}] = 0x{a2:08x}"),
			0x05 => format!("vars[0x{a1:x}]++"),
			0x06 => format!("vars[0x{a1:x}]--"),
			0x07 => format!("cursor_disable({a1})"),
			0x08 => format!("cursor_enable({a1})"),
			// the original player skips the guarded commands on the
			// inverted condition; the listing shows the condition itself
			0x09 => format!("if vars[0x{a1:x}] > 0x{a2:x} {{"),
			0x0a => format!("if vars[0x{a1:x}] == 0x{a2:x} {{"),
			0x0b => format!("if vars[0x{a1:x}] < 0x{a2:x} {{"),
			0x0e => format!("if vars[0x{a1:x}] != 0x{a2:x} {{"),
			0x0c => {
				if name == "ENTRY" {
					"/* 0xc in ENTRY script, code ends */".to_string()
				} else {
					"(something with inventory)".to_string()
				}
			}
			0x0f => "}".to_string(),
			0x10 => "} else {".to_string(),
			0x13 => format!("ani_rem_onscreen(0x{a1:x})"),
			0x14 => format!("thm_play(0x{a1:x})"),
			0x15 => format!("sfx_play(0x{a1:x})"),
			0x16 | 0x17 | 0xff | 0x100 => "nop".to_string(),
			0x19 => {
				format!("ani_add_by_num(0x{a1:x}) /* {} */", sym(&self.animations, a1))
			}
			0x49 => "wait_frames_no_async()".to_string(),
			0x65 => format!("call_script {a1}"),
			0x70 => "exit() /* ?? */".to_string(),
			0x71 => {
				format!(
					"intro_play(0x{a1:x}, 0x{a2:x}, 0x{a3:x}) /* {} */",
					sym(&self.smc, a1)
				)
			}
			0x77 | 0x78 => format!("smc_add(0x{a1:x}) /* \"{}\" */", sym(&self.smc, a1)),
			0xcd => format!("nwspeak(0x{a1:x})"),
			0x12f => "refpal()".to_string(),
			0x13c => {
				format!("ani_set_frame(0x{a1:x}, {a2}) /* {} */", sym(&self.animations, a1))
			}
			0x16c => format!("thm_event(0x{a1:x})"),
			0x170 => format!("fx_setvol(0x{a1:x})"),
			0x171 => format!("si_snd_setvol(0x{a1:x})"),
			0x172 => format!("si_spk_setvol(0x{a1:x})"),
			0x17a => "spk_stop()".to_string(),
			0x191 => format!("ani_suspend(0x{a1:x})"),
			0x195 => format!("ani_clear_suspended(0x{a1:x})"),
			// the timer arguments are stored swapped
			0x196 => format!("async_add_timer(0x{a2:x}, 0x{a1:x})"),
			0x901 => format!("gv_addbutton({a1}, 0)"),
			0x902 => "gv_update_buttons()".to_string(),
			// a1 ignored
			0x903 => format!("gv_addbutton(-1, {a2})"),
			0x905 => "sav_select_load()".to_string(),
			0x84c => format!("vars[0x{a1:x}] = si_get_vol()"),
			0x850 => format!("vars[0x{a1:x}] = txt_get_speed()"),
			0x852 => format!("txt_set_on(0x{a1:x})"),
			0x855 => format!("vars[0x{a1:x}] = unknown_0x855()"),
			0x856 => format!("vars[0x{a1:x}] = txt_get_on()"),
			0x857 => format!("vars[0x{a1:x}] = unknown_0x857()"),
			0x858 => format!("vars[0x{a1:x}] = pal_get_brightness()"),
			0x1004 => "initialize_script()".to_string(),
			0x13ba => {
				format!(
					"ani_add_by_num(num=0x{a1:x}, prio=0x{a2:x}) /* {} */",
					sym(&self.animations, a1)
				)
			}
			0x1838 => "gran_diary_init()".to_string(),
			other => {
				log::debug!("unknown script opcode 0x{other:08x}");
				missing.insert(other);
				format!("0x{other:08x} 0x{a1:08x} 0x{a2:08x} 0x{a3:08x}")
			}
		}
	}
}
