//! Prelude module for `bam_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use bam_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let config = ImportConfig::default();
//! let clock = ManualClock::new(0);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Errors
	BamError,
	// Container types
	BamFile,
	BamHeader,
	Color,
	ColorRamps,
	CycleEntry,
	DecompressionCache,
	Decompressor,
	Format,
	FrameEntry,
	ImportConfig,
	Palette,
	Paperdoll,
	Table,
	ZlibDecompressor,
};

// Sprite types
#[doc(inline)]
pub use crate::sprite::{Region, Renderer, SoftwareRenderer, Sprite};

// Animation types
#[doc(inline)]
pub use crate::anim::{
	Animation, AnimationFactory, Clock, FrameOwnership, ManualClock, PaletteMode, PlaybackState,
	SystemClock,
};

// Font types
#[doc(inline)]
pub use crate::font::{Glyph, GlyphSet};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
