//! File type support for `bam-rs` project.

mod error;

pub mod bam;

// Re-export unified error type
pub use error::{BamError, Table};

// Re-export main file types
pub use bam::{
	Color, ColorRamps, CycleEntry, DecompressionCache, Decompressor, File as BamFile, Format,
	FrameEntry, Header as BamHeader, ImportConfig, Palette, Paperdoll, ZlibDecompressor,
};
