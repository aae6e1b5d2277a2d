//! `.BAM` sprite container support.
//!
//! A container stores a table of frames, a table of cycles grouping those
//! frames through a lookup table, and one shared 256-color palette. Frame
//! pixels are palette indices, usually RLE8 compressed against the
//! container's color key.
//!
//! Containers may additionally be wrapped in a zlib stream. Wrapped files are
//! expanded once into a [`DecompressionCache`] and read from there afterwards.
//!
//! # Example
//!
//! ```no_run
//! use bam_types::file::bam::{File, ImportConfig};
//! use bam_types::sprite::SoftwareRenderer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bam = File::open("CGAMEANI.BAM", &ImportConfig::default())?;
//! let factory = bam.animation_factory(&SoftwareRenderer, "CGAMEANI")?;
//! let walk = factory.animation(0);
//! # Ok(())
//! # }
//! ```

mod cache;
mod config;
mod entry;
mod file;
mod header;
mod palette;
pub mod rle;


pub use cache::{DecompressionCache, Decompressor, ZlibDecompressor};
pub use config::ImportConfig;
pub use entry::{CycleEntry, FrameEntry};
pub use file::{File, Paperdoll, Source};
pub use header::Header;
pub use palette::{Color, ColorRamps, Palette, RAMP_LEN};

/// Layout constants of the container format.
pub mod constants {
	/// Signature of a plain container
	pub const SIGNATURE: [u8; 8] = *b"BAM V1  ";

	/// Signature of a zlib wrapped container
	pub const COMPRESSED_SIGNATURE: [u8; 8] = *b"BAMCV1  ";

	/// Size of the plain container header
	pub const HEADER_SIZE: usize = 24;

	/// Size of the wrapper header (signature + uncompressed length)
	pub const COMPRESSED_HEADER_SIZE: usize = 12;

	/// Size of a single frame table record
	pub const FRAME_ENTRY_SIZE: usize = 12;

	/// Size of a single cycle table record
	pub const CYCLE_ENTRY_SIZE: usize = 4;

	/// Size of a single frame lookup table entry
	pub const LOOKUP_ENTRY_SIZE: usize = 2;

	/// Set in a frame's data field when its pixels are stored uncompressed
	pub const UNCOMPRESSED_FLAG: u32 = 0x8000_0000;
}

/// Container flavours recognised by their 8-byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
	/// Plain container, tables can be read directly
	Plain,

	/// Container wrapped in a zlib stream
	Compressed,
}

impl Format {
	/// Identifies a container by its signature.
	pub fn detect(signature: &[u8; 8]) -> Option<Self> {
		match *signature {
			constants::SIGNATURE => Some(Self::Plain),
			constants::COMPRESSED_SIGNATURE => Some(Self::Compressed),
			_ => None,
		}
	}

	/// Returns the signature bytes of this format.
	pub const fn signature(&self) -> [u8; 8] {
		match self {
			Self::Plain => constants::SIGNATURE,
			Self::Compressed => constants::COMPRESSED_SIGNATURE,
		}
	}
}

impl std::fmt::Display for Format {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Plain => write!(f, "BAM V1"),
			Self::Compressed => write!(f, "BAMC V1"),
		}
	}
}
