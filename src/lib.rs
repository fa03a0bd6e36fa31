#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `crux-rs` is a reimplementation of the engine behind the 1990s
//! point-and-click adventure "Armed & Delirious", built around its two
//! resource files `ADVENT.IDX` and `ADVENT.RES`.
//!
pub use crux_internal::*;
