//! Glyph bitmaps.

use crate::sprite::{RowIterator, Sprite};

/// Single glyph, an 8-bit indexed bitmap with its metrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Glyph {
	width: u16,
	height: u16,
	x: i32,
	y: i32,

	/// Palette indices, row-major
	pixels: Vec<u8>,
}

impl Glyph {
	/// Creates a glyph. `pixels` must hold `width * height` entries.
	pub fn new(width: u16, height: u16, x: i32, y: i32, pixels: Vec<u8>) -> Self {
		Self {
			width,
			height,
			x,
			y,
			pixels,
		}
	}

	/// Creates a zero-sized placeholder glyph.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Returns `true` for a placeholder glyph.
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns the advance width in pixels.
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the height in pixels.
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the anchor X coordinate.
	pub fn x(&self) -> i32 {
		self.x
	}

	/// Returns the anchor Y coordinate.
	pub fn y(&self) -> i32 {
		self.y
	}

	/// Returns the glyph pixel data.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Gets the palette index at (x, y).
	pub fn get_pixel(&self, x: u16, y: u16) -> Option<u8> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get(y as usize * self.width as usize + x as usize).copied()
	}

	/// Returns an iterator over pixel rows.
	pub fn rows(&self) -> RowIterator<'_> {
		RowIterator::new(&self.pixels, self.width as usize)
	}

	/// Converts the glyph to an ASCII art representation.
	pub fn to_ascii_art(&self, color_key: u8, one: char, zero: char) -> String {
		let mut art = String::new();

		for row in self.rows() {
			for &pixel in row {
				art.push(if pixel != color_key {
					one
				} else {
					zero
				});
			}
			art.push('\n');
		}

		art
	}
}

impl From<&Sprite> for Glyph {
	fn from(sprite: &Sprite) -> Self {
		Self {
			width: sprite.width(),
			height: sprite.height(),
			x: sprite.x(),
			y: sprite.y(),
			pixels: sprite.pixels().to_vec(),
		}
	}
}

impl From<Sprite> for Glyph {
	fn from(sprite: Sprite) -> Self {
		Self::from(&sprite)
	}
}
