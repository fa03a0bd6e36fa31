//! Resource catalog.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crux_types::file::{CruxError, FileType, idx};
use crux_types::{ResourceEntry, ResourceId};

/// Lookup and loading front end for the `ADVENT.IDX` / `ADVENT.RES` pair.
#[derive(Debug)]
pub struct Catalog {
	index: idx::File,
	res_path: PathBuf,
}

/// One row of a diagnostic index dump, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpRecord {
	/// Resource name
	pub name: String,
	/// Numeric resource type
	pub type_id: u32,
	/// Absolute offset in `ADVENT.RES`
	pub offset: u32,
	/// Payload length in bytes
	pub length: u32,
}

impl Catalog {
	/// Opens a catalog from an index path; the blob is expected next to it
	/// with the `.RES` extension (`ADVENT.IDX` -> `ADVENT.RES`).
	pub fn open(index_path: impl AsRef<Path>) -> Result<Self, CruxError> {
		let index_path = index_path.as_ref();
		let mut res_path = index_path.to_path_buf();
		res_path.set_extension("RES");
		Self::with_paths(index_path, res_path)
	}

	/// Opens a catalog with explicit index and blob paths.
	pub fn with_paths(
		index_path: impl AsRef<Path>,
		res_path: impl AsRef<Path>,
	) -> Result<Self, CruxError> {
		let index = idx::File::open(index_path)?;
		Ok(Self {
			index,
			res_path: res_path.as_ref().to_path_buf(),
		})
	}

	/// Returns the parsed index.
	pub fn index(&self) -> &idx::File {
		&self.index
	}

	/// Looks up an index entry without touching the blob.
	pub fn entry(&self, id: &ResourceId) -> Result<ResourceEntry, CruxError> {
		self.index.get(id).ok_or_else(|| CruxError::MissingResource {
			type_id: id.type_id(),
			name: id.name().to_string(),
		})
	}

	/// Loads a resource payload as an independent byte vector.
	///
	/// The blob is opened per call and released before returning.
	pub fn load(&self, id: &ResourceId) -> Result<Vec<u8>, CruxError> {
		let entry = self.entry(id)?;

		let mut file = fs::File::open(&self.res_path)?;
		let blob_size = file.metadata()?.len();
		let end = u64::from(entry.offset) + u64::from(entry.length);
		if end > blob_size {
			return Err(CruxError::corrupt(
				FileType::Index,
				entry.offset as usize,
				format!(
					"entry for {id} runs to byte {end} of a {blob_size}-byte blob"
				),
			));
		}

		file.seek(SeekFrom::Start(u64::from(entry.offset)))?;
		let mut payload = vec![0u8; entry.length as usize];
		file.read_exact(&mut payload)?;

		log::debug!("loaded {id}: {} bytes at offset {}", entry.length, entry.offset);
		Ok(payload)
	}

	/// Writes a resource's raw payload to `path`.
	pub fn dump(&self, id: &ResourceId, path: impl AsRef<Path>) -> Result<(), CruxError> {
		let payload = self.load(id)?;
		fs::write(path, payload)?;
		Ok(())
	}

	/// Returns the index contents in insertion order for diagnostics.
	pub fn dump_records(&self) -> Vec<DumpRecord> {
		self.index
			.iter()
			.map(|(id, entry)| DumpRecord {
				name: id.name().to_string(),
				type_id: id.type_id(),
				offset: entry.offset,
				length: entry.length,
			})
			.collect()
	}
}
