//! This crate provides the data types, decoders and playback runtime of the
//! `bam-rs` project.
//!
//! # Modules
//!
//! - **`file::bam`**: `.BAM` sprite containers, plain or zlib wrapped, with
//!   the RLE8 pixel codec and the decompression cache
//! - **`sprite`**: decoded 8-bit indexed frame images and the renderer
//!   capability that creates them
//! - **`anim`**: deduplicated animation assets and the playback state machine
//! - **`font`**: glyph sets extracted from font containers
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use bam_types::prelude::*;
//!
//! # fn main() -> Result<(), BamError> {
//! let mut bam = BamFile::open("WALK.BAM", &ImportConfig::default())?;
//! let factory = bam.animation_factory(&SoftwareRenderer, "WALK")?;
//!
//! let clock = SystemClock::new();
//! if let Some(mut walk) = factory.animation(0) {
//!     let _frame = walk.next_frame(&clock);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use bam_types::file::bam::{File, ImportConfig};
//!
//! # fn main() -> Result<(), bam_types::file::BamError> {
//! let mut font = File::open("NUMBERS.BAM", &ImportConfig::in_memory())?;
//! let glyphs = font.font()?;
//! println!("{} glyphs, {}px tall", glyphs.len(), glyphs.max_height());
//! # Ok(())
//! # }
//! ```

pub mod anim;
pub mod file;
pub mod font;
pub mod sprite;

/// `use bam_types::prelude::*;` to import commonly used items.
pub mod prelude;
