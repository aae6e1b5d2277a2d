//! Bitmap fonts extracted from sprite containers.
//!
//! Fonts reuse the container layout: either every cycle holds one glyph
//! (its first frame), or a single cycle lists one glyph per frame.

use std::sync::Arc;

use crate::file::bam::Palette;

pub mod glyph;

pub use glyph::Glyph;

/// Ordered glyphs of one font with overall metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
	glyphs: Vec<Glyph>,
	total_width: u32,
	max_height: u16,
	palette: Arc<Palette>,
	color_key: u8,
}

impl GlyphSet {
	/// Creates a glyph set, computing its metrics.
	///
	/// Placeholder glyphs take part in neither metric.
	pub fn new(glyphs: Vec<Glyph>, palette: Arc<Palette>, color_key: u8) -> Self {
		let mut total_width = 0u32;
		let mut max_height = 0u16;
		for glyph in glyphs.iter().filter(|g| !g.is_empty()) {
			total_width += glyph.width() as u32;
			max_height = max_height.max(glyph.height());
		}

		Self {
			glyphs,
			total_width,
			max_height,
			palette,
			color_key,
		}
	}

	/// Creates a glyph set with metrics measured by the caller.
	pub fn with_metrics(
		glyphs: Vec<Glyph>,
		total_width: u32,
		max_height: u16,
		palette: Arc<Palette>,
		color_key: u8,
	) -> Self {
		Self {
			glyphs,
			total_width,
			max_height,
			palette,
			color_key,
		}
	}

	/// Returns the number of glyphs, placeholders included.
	pub fn len(&self) -> usize {
		self.glyphs.len()
	}

	/// Returns `true` when the set has no glyphs.
	pub fn is_empty(&self) -> bool {
		self.glyphs.is_empty()
	}

	/// Returns glyph `index`.
	pub fn get(&self, index: usize) -> Option<&Glyph> {
		self.glyphs.get(index)
	}

	/// Returns all glyphs.
	pub fn glyphs(&self) -> &[Glyph] {
		&self.glyphs
	}

	/// Returns the summed width of all glyphs.
	pub fn total_width(&self) -> u32 {
		self.total_width
	}

	/// Returns the height of the tallest glyph.
	pub fn max_height(&self) -> u16 {
		self.max_height
	}

	/// Returns the font palette.
	pub fn palette(&self) -> &Arc<Palette> {
		&self.palette
	}

	/// Returns the transparent palette index.
	pub fn color_key(&self) -> u8 {
		self.color_key
	}

	/// Returns the advance width of a run of glyph indices.
	///
	/// Unknown indices advance by zero.
	pub fn measure(&self, indices: impl IntoIterator<Item = usize>) -> u32 {
		indices.into_iter().filter_map(|i| self.glyphs.get(i)).map(|g| g.width() as u32).sum()
	}

	/// Returns an iterator over the glyphs.
	pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
		self.glyphs.iter()
	}
}

impl<'a> IntoIterator for &'a GlyphSet {
	type Item = &'a Glyph;
	type IntoIter = std::slice::Iter<'a, Glyph>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_metrics_skip_placeholders() {
		let glyphs = vec![
			Glyph::new(3, 5, 0, 0, vec![1; 15]),
			Glyph::empty(),
			Glyph::new(4, 7, 0, 0, vec![1; 28]),
		];
		let set = GlyphSet::new(glyphs, Arc::new(Palette::new()), 0);
		assert_eq!(set.len(), 3);
		assert_eq!(set.total_width(), 7);
		assert_eq!(set.max_height(), 7);
		assert!(set.get(1).unwrap().is_empty());
		assert_eq!(set.measure([0, 2, 0, 9]), 10);
	}

	#[test]
	fn test_glyph_ascii_art() {
		let glyph = Glyph::new(2, 2, 0, 0, vec![0, 1, 1, 0]);
		assert_eq!(glyph.to_ascii_art(0, '#', '.'), ".#\n#.\n");
		assert_eq!(glyph.get_pixel(1, 0), Some(1));
		assert_eq!(glyph.get_pixel(2, 0), None);
	}
}
