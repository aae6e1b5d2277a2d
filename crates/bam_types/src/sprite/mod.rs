//! Decoded frame images.
//!
//! A [`Sprite`] is an 8-bit indexed image with an anchor point, a shared
//! palette and the color key marking transparent pixels. Sprites are created
//! through a [`Renderer`], which stands in for the host's rendering backend.

mod renderer;

use std::fmt;
use std::sync::Arc;

use crate::file::bam::{Color, Palette};

pub use renderer::{Renderer, SoftwareRenderer};

/// Axis-aligned rectangle in anchor-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
	/// Left edge
	pub x: i32,

	/// Top edge
	pub y: i32,

	/// Width
	pub w: i32,

	/// Height
	pub h: i32,
}

impl Region {
	/// Creates a region.
	pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
		Self {
			x,
			y,
			w,
			h,
		}
	}

	/// Returns the right edge (exclusive).
	#[inline]
	pub fn right(&self) -> i32 {
		self.x + self.w
	}

	/// Returns the bottom edge (exclusive).
	#[inline]
	pub fn bottom(&self) -> i32 {
		self.y + self.h
	}

	/// Returns `true` for a region without area.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.w <= 0 || self.h <= 0
	}

	/// Grows this region to cover `other`.
	pub fn expand(&mut self, other: &Region) {
		let left = self.x.min(other.x);
		let top = self.y.min(other.y);
		let right = self.right().max(other.right());
		let bottom = self.bottom().max(other.bottom());
		*self = Self::new(left, top, right - left, bottom - top);
	}

	/// Reflects the region about the vertical axis through the anchor.
	pub fn mirrored_horizontal(&self) -> Self {
		Self::new(-self.w - self.x, self.y, self.w, self.h)
	}
}

impl fmt::Display for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}) {}×{}", self.x, self.y, self.w, self.h)
	}
}

/// 8-bit indexed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
	width: u16,
	height: u16,
	x: i32,
	y: i32,
	pixels: Vec<u8>,
	palette: Arc<Palette>,
	color_key: u8,
}

impl Sprite {
	/// Creates a sprite with its anchor at the origin.
	///
	/// `pixels` is padded with `color_key` or truncated to `width * height`.
	pub fn new(width: u16, height: u16, mut pixels: Vec<u8>, palette: Arc<Palette>, color_key: u8) -> Self {
		pixels.resize(width as usize * height as usize, color_key);
		Self {
			width,
			height,
			x: 0,
			y: 0,
			pixels,
			palette,
			color_key,
		}
	}

	/// Creates a zero-sized sprite.
	pub fn empty(palette: Arc<Palette>, color_key: u8) -> Self {
		Self::new(0, 0, Vec::new(), palette, color_key)
	}

	/// Returns the width in pixels.
	#[inline]
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the height in pixels.
	#[inline]
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the anchor X coordinate.
	#[inline]
	pub fn x(&self) -> i32 {
		self.x
	}

	/// Returns the anchor Y coordinate.
	#[inline]
	pub fn y(&self) -> i32 {
		self.y
	}

	/// Moves the anchor.
	pub fn set_anchor(&mut self, x: i32, y: i32) {
		self.x = x;
		self.y = y;
	}

	/// Returns `true` for a zero-sized sprite.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}

	/// Returns the palette indices in row-major order.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Returns the palette shared with other sprites of the same container.
	#[inline]
	pub fn palette(&self) -> &Arc<Palette> {
		&self.palette
	}

	/// Replaces the palette handle.
	pub fn set_palette(&mut self, palette: Arc<Palette>) {
		self.palette = palette;
	}

	/// Returns a private copy of the palette for modification.
	pub fn palette_mut(&mut self) -> &mut Palette {
		Arc::make_mut(&mut self.palette)
	}

	/// Returns the transparent palette index.
	#[inline]
	pub fn color_key(&self) -> u8 {
		self.color_key
	}

	/// Gets the palette index at the given coordinates.
	pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get(y as usize * self.width as usize + x as usize).copied()
	}

	/// Gets the color at the given coordinates, transparent for the color key.
	pub fn color_at(&self, x: u16, y: u16) -> Option<Color> {
		self.pixel(x, y).map(|index| self.resolve(index))
	}

	fn resolve(&self, index: u8) -> Color {
		if index == self.color_key {
			Color::transparent()
		} else {
			self.palette.get(index)
		}
	}

	/// Returns the area covered by this sprite relative to its anchor.
	pub fn footprint(&self) -> Region {
		Region::new(-self.x, -self.y, self.width as i32, self.height as i32)
	}

	/// Returns an iterator over pixel rows.
	pub fn rows(&self) -> RowIterator<'_> {
		RowIterator::new(&self.pixels, self.width as usize)
	}

	/// Returns a horizontally flipped copy with the anchor reflected.
	pub fn mirrored_horizontal(&self) -> Self {
		let mut pixels = Vec::with_capacity(self.pixels.len());
		for row in self.rows() {
			pixels.extend(row.iter().rev());
		}
		Self {
			width: self.width,
			height: self.height,
			x: self.width as i32 - self.x,
			y: self.y,
			pixels,
			palette: Arc::clone(&self.palette),
			color_key: self.color_key,
		}
	}

	/// Converts the sprite to RGBA bytes, color key pixels fully transparent.
	pub fn to_rgba(&self) -> Vec<u8> {
		self.to_rgba_with(&self.palette)
	}

	/// Converts the sprite to RGBA bytes using another palette.
	pub fn to_rgba_with(&self, palette: &Palette) -> Vec<u8> {
		let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
		for &index in &self.pixels {
			let color = if index == self.color_key {
				Color::transparent()
			} else {
				let color = palette.get(index);
				Color::rgb(color.r, color.g, color.b)
			};
			rgba.extend_from_slice(&[color.r, color.g, color.b, color.a]);
		}
		rgba
	}

	/// Renders the sprite as ASCII art, `.` for transparent pixels.
	pub fn to_ascii_art(&self) -> String {
		let mut result = String::new();
		for row in self.rows() {
			for &index in row {
				result.push(if index == self.color_key {
					'.'
				} else {
					'#'
				});
			}
			result.push('\n');
		}
		result
	}
}

impl fmt::Display for Sprite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} (anchor: {}, {})", self.width, self.height, self.x, self.y)
	}
}

/// Iterator over rows of pixel data.
#[derive(Debug, Clone)]
pub struct RowIterator<'a> {
	pixels: &'a [u8],
	width: usize,
	current_row: usize,
	total_rows: usize,
}

impl<'a> RowIterator<'a> {
	/// Creates a row iterator over `pixels` split into rows of `width`.
	pub fn new(pixels: &'a [u8], width: usize) -> Self {
		let total_rows = if width > 0 {
			pixels.len() / width
		} else {
			0
		};

		Self {
			pixels,
			width,
			current_row: 0,
			total_rows,
		}
	}
}

impl<'a> Iterator for RowIterator<'a> {
	type Item = &'a [u8];

	fn next(&mut self) -> Option<Self::Item> {
		if self.current_row >= self.total_rows {
			return None;
		}

		let start = self.current_row * self.width;
		let end = start + self.width;
		self.current_row += 1;

		Some(&self.pixels[start..end])
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.total_rows - self.current_row;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for RowIterator<'_> {}
