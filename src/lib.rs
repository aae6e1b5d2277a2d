#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `bam-rs` decodes BAM sprite animation containers and plays them back.
//!
//! Containers are parsed into frame, cycle and palette tables, frames are
//! decoded from their RLE8 form into shared sprites, and animations advance
//! through them at a fixed frame rate against a wall or game clock.
//!
pub use bam_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use bam_dylib;
