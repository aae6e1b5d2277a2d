//! Prelude module for `bam_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use bam_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let config = ImportConfig::in_memory();
//! let clock = ManualClock::new(0);
//! let mut animation = Animation::new(4);
//! assert!(animation.next_frame(&clock).is_none());
//! ```

// Re-export everything from bam_types::prelude
#[doc(inline)]
pub use bam_types::prelude::*;

// Re-export the entire bam_types module for advanced usage
#[doc(inline)]
pub use bam_types;
