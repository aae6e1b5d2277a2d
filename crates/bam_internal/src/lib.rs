//! This module is separated into its own crate to enable simple dynamic linking for `bam-rs`, and should not be used directly.

/// `use bam_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export bam_types for convenience
pub use bam_types;

// Re-export commonly used types at crate root
pub use bam_types::anim::{Animation, AnimationFactory};
pub use bam_types::file::{BamError, BamFile, ImportConfig};
