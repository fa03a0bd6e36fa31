//! The five picture4 block codecs.
//!
//! All of the RLE codecs (`brun16`, `skip64`, `skip16`, `skip8`) share the
//! serpentine traversal and a per-block color table of up to 64 palette
//! indices. A block whose `total_count` byte is 0xFF inherits the previous
//! block's table and count from the [`DecoderContext`] latch.

use crate::file::error::{CruxError, FileType};
use crate::file::reader::ByteReader;

use super::serpentine::{BlockWriter, Serpentine};

/// Color-table latch shared by consecutive blocks.
///
/// A non-0xFF block overwrites the latch; a 0xFF block reuses it. The
/// latch outlives individual pictures: the decoder resets the count to the
/// "none" sentinel per picture while the table bytes persist, exactly like
/// the original's file-scope state.
#[derive(Debug)]
pub(super) struct DecoderContext {
	table: [u8; 64],
	table_len: usize,
	total_count: i32,
}

impl DecoderContext {
	pub(super) fn new() -> Self {
		Self {
			table: [0; 64],
			table_len: 0,
			total_count: -1,
		}
	}

	/// Forgets the previous picture's count while keeping the table bytes.
	pub(super) fn reset_count(&mut self) {
		self.total_count = -1;
	}

	/// Latches a block's own color table: `min(total, cap)` bytes.
	fn latch(
		&mut self,
		total: u8,
		cap: usize,
		r: &mut ByteReader<'_>,
	) -> Result<(), CruxError> {
		let len = (total as usize).min(cap);
		let bytes = r.take(len)?;
		self.table[..len].copy_from_slice(bytes);
		self.table_len = len;
		self.total_count = i32::from(total);
		Ok(())
	}

	/// Fetches a color by table index.
	fn color(&self, index: usize, offset: usize) -> Result<u8, CruxError> {
		if index < self.table_len {
			Ok(self.table[index])
		} else {
			Err(CruxError::corrupt(
				FileType::Picture4,
				offset,
				format!("color index {index} outside table of {} entries", self.table_len),
			))
		}
	}
}

/// Big-endian nibble reader over the byte stream.
///
/// `brun16` consumes its commands nibble by nibble, high nibble first.
/// The reader consumes whole bytes eagerly; the half-byte realignment the
/// original performs on exit is thereby already accounted for.
struct NibbleReader<'r, 'a> {
	r: &'r mut ByteReader<'a>,
	current: u8,
	half: bool,
}

impl<'r, 'a> NibbleReader<'r, 'a> {
	fn new(r: &'r mut ByteReader<'a>) -> Self {
		Self {
			r,
			current: 0,
			half: false,
		}
	}

	fn read(&mut self) -> Result<u8, CruxError> {
		if self.half {
			self.half = false;
			Ok(self.current & 0x0F)
		} else {
			self.current = self.r.read_u8()?;
			self.half = true;
			Ok(self.current >> 4)
		}
	}

	fn pos(&self) -> usize {
		self.r.pos()
	}
}

/// Block code 0x01: raw copy in boustrophedon order.
///
/// Rows are consumed in pairs, forward then backward; an odd block height
/// still writes the trailing backward row, as the original did.
pub(super) fn copy(
	r: &mut ByteReader<'_>,
	writer: &mut BlockWriter<'_>,
	block_width: usize,
	block_height: usize,
) -> Result<(), CruxError> {
	let block_width = block_width as i32;
	let mut row = 0i32;
	let mut rows_left = block_height as i32;

	while rows_left > 0 {
		for col in 0..block_width {
			writer.put(row, col, r.read_u8()?)?;
		}
		row += 1;
		for col in (0..block_width).rev() {
			writer.put(row, col, r.read_u8()?)?;
		}
		row += 1;
		rows_left -= 2;
	}
	Ok(())
}

/// Block code 0x03: byte commands over a 64-entry color table.
///
/// `b & 0xC0 == 0` skips `b` pixels; otherwise `(b >> 6)` (1..3) copies of
/// `table[b & 0x3F]`. Terminated by 0x00, then `(total_count - 64)`
/// single-column streams follow.
pub(super) fn skip64(
	r: &mut ByteReader<'_>,
	writer: &mut BlockWriter<'_>,
	ctx: &mut DecoderContext,
	block_width: usize,
) -> Result<(), CruxError> {
	let total = r.read_u8()?;
	if total != 0xFF {
		ctx.latch(total, 64, r)?;
	}
	let total = ctx.total_count;

	let mut cur = Serpentine::new(block_width);
	loop {
		let b = r.read_u8()?;
		if b == 0 {
			break;
		}
		if b & 0xC0 == 0 {
			cur.skip(i32::from(b));
		} else {
			let color = ctx.color((b & 0x3F) as usize, r.pos())?;
			let mut count = i32::from((b >> 6) & 0x03);
			let mut remaining = cur.remaining();
			while remaining <= count {
				cur.draw(writer, color, remaining)?;
				cur.wrap();
				count -= remaining;
				remaining = cur.remaining();
			}
			cur.draw(writer, color, count)?;
		}
	}

	for _ in 64..total {
		put_single_col(r, writer, block_width)?;
	}
	Ok(())
}

/// Block code 0x04: byte commands over a 16-entry color table.
///
/// `b & 0xF0 == 0` skips `b` pixels; otherwise `(b >> 4)` copies of
/// `table[b & 0x0F]`. The draw wraps at most once per command.
pub(super) fn skip16(
	r: &mut ByteReader<'_>,
	writer: &mut BlockWriter<'_>,
	ctx: &mut DecoderContext,
	block_width: usize,
) -> Result<(), CruxError> {
	let total = r.read_u8()?;
	if total != 0xFF {
		ctx.latch(total, 16, r)?;
	}
	let total = ctx.total_count;

	let mut cur = Serpentine::new(block_width);
	loop {
		let cmd = r.read_u8()?;
		if cmd == 0 {
			break;
		}
		if cmd & 0xF0 == 0 {
			cur.skip(i32::from(cmd));
		} else {
			let color = ctx.color((cmd & 0x0F) as usize, r.pos())?;
			let mut count = i32::from((cmd >> 4) & 0x0F);
			let remaining = cur.remaining();
			if remaining <= count {
				cur.draw(writer, color, remaining)?;
				cur.wrap();
				count -= remaining;
			}
			cur.draw(writer, color, count)?;
		}
	}

	for _ in 16..total {
		put_single_col(r, writer, block_width)?;
	}
	Ok(())
}

/// Block code 0x08: byte commands over an 8-entry color table.
///
/// `b & 0xF8 == 0` skips `b` pixels; otherwise `(b >> 3) & 0x1F` copies of
/// `table[b & 0x07]`.
pub(super) fn skip8(
	r: &mut ByteReader<'_>,
	writer: &mut BlockWriter<'_>,
	ctx: &mut DecoderContext,
	block_width: usize,
) -> Result<(), CruxError> {
	let total = r.read_u8()?;
	if total != 0xFF {
		ctx.latch(total, 8, r)?;
	}
	let total = ctx.total_count;

	let mut cur = Serpentine::new(block_width);
	loop {
		let cmd = r.read_u8()?;
		if cmd == 0 {
			break;
		}
		if cmd & 0xF8 == 0 {
			cur.skip(i32::from(cmd));
		} else {
			let color = ctx.color((cmd & 0x07) as usize, r.pos())?;
			let mut count = i32::from((cmd >> 3) & 0x1F);
			let remaining = cur.remaining();
			if remaining <= count {
				cur.draw(writer, color, remaining)?;
				cur.wrap();
				count -= remaining;
			}
			cur.draw(writer, color, count)?;
		}
	}

	for _ in 8..total {
		put_single_col(r, writer, block_width)?;
	}
	Ok(())
}

/// Block code 0x02: nibble-packed commands over a 16-entry color table.
///
/// Each command is a nibble pair `(literal_count, run_count)`; both zero
/// terminates the block. A nonzero run count first fetches one
/// nibble-indexed run color. The literal segment paints `literal_count`
/// pixels, each with a freshly fetched nibble-indexed color, wrapping at
/// most once; the run segment then paints `run_count` pixels of the run
/// color, also wrapping at most once. There is no single-column tail.
pub(super) fn brun16(
	r: &mut ByteReader<'_>,
	writer: &mut BlockWriter<'_>,
	ctx: &mut DecoderContext,
	block_width: usize,
) -> Result<(), CruxError> {
	let total = r.read_u8()?;
	if total != 0xFF {
		ctx.latch(total, 16, r)?;
	}

	let mut nibbles = NibbleReader::new(r);
	let mut cur = Serpentine::new(block_width);
	let mut run_color = 0u8;

	loop {
		let mut literal = i32::from(nibbles.read()?);
		let run = i32::from(nibbles.read()?);
		if literal == 0 && run == 0 {
			break;
		}

		if run != 0 {
			let index = nibbles.read()? as usize;
			run_color = ctx.color(index, nibbles.pos())?;
		}

		let remaining = cur.remaining();
		if literal != 0 && remaining <= literal {
			for _ in 0..remaining {
				let index = nibbles.read()? as usize;
				let color = ctx.color(index, nibbles.pos())?;
				cur.put(writer, color)?;
			}
			cur.wrap();
			literal -= remaining;
		}
		for _ in 0..literal {
			let index = nibbles.read()? as usize;
			let color = ctx.color(index, nibbles.pos())?;
			cur.put(writer, color)?;
		}

		if run != 0 {
			let remaining = cur.remaining();
			let mut run = run;
			if run < remaining {
				cur.draw(writer, run_color, run)?;
			} else {
				cur.draw(writer, run_color, remaining)?;
				cur.wrap();
				run -= remaining;
				cur.draw(writer, run_color, run)?;
			}
		}
	}

	Ok(())
}

/// Single-column escape stream appended after a `skip*` block's commands.
///
/// The stream's first byte is its only color; each command byte `b`
/// either skips `b` pixels (`b <= 0xEE`) or draws `b - 0xEE` copies of the
/// color, both along the same serpentine path from the block origin.
/// Terminated by 0xFF.
pub(super) fn put_single_col(
	r: &mut ByteReader<'_>,
	writer: &mut BlockWriter<'_>,
	block_width: usize,
) -> Result<(), CruxError> {
	let color = r.read_u8()?;
	let mut cur = Serpentine::new(block_width);

	loop {
		let b = r.read_u8()?;
		if b == 0xFF {
			break;
		}
		if b <= 0xEE {
			cur.skip(i32::from(b));
		} else {
			let mut count = i32::from(b - 0xEE);
			let mut remaining = cur.remaining();
			while remaining <= count {
				cur.draw(writer, color, remaining)?;
				cur.wrap();
				count -= remaining;
				remaining = cur.block_width();
			}
			cur.draw(writer, color, count)?;
		}
	}
	Ok(())
}
