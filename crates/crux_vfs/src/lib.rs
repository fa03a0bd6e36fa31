//! Virtual file system over the game's `ADVENT.IDX` / `ADVENT.RES` pair.
//!
//! The [`Catalog`] owns the parsed index and hands out resource payloads
//! as independent byte vectors. Each load opens `ADVENT.RES`, seeks to
//! the entry's offset, reads exactly its length and closes the file again,
//! the way the original engine did.

mod catalog;

pub use catalog::{Catalog, DumpRecord};
