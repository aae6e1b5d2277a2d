//! Rendering capability.

use std::sync::Arc;

use crate::file::bam::Palette;

use super::Sprite;

/// Backend creating and transforming sprites.
///
/// Decoders and playback take the renderer as an explicit parameter instead
/// of reaching for a global video context. The default methods build plain
/// software sprites, backends override them to upload or convert images.
pub trait Renderer {
	/// Creates an 8-bit indexed sprite.
	fn create_sprite8(
		&self,
		width: u16,
		height: u16,
		pixels: Vec<u8>,
		palette: Arc<Palette>,
		color_key: u8,
	) -> Sprite {
		Sprite::new(width, height, pixels, palette, color_key)
	}

	/// Returns a horizontally mirrored copy of `sprite`.
	fn mirror_horizontal(&self, sprite: &Sprite) -> Sprite {
		sprite.mirrored_horizontal()
	}
}

/// In-memory renderer using the default sprite operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftwareRenderer;

impl Renderer for SoftwareRenderer {}
