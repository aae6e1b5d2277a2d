//! BAM palette support.
//!
//! Every container carries a single 256-entry palette. On disk each entry is
//! 4 bytes in B, G, R, A order.

use std::fmt;
use std::io::Read;

use crate::file::BamError;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a new grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::rgb(value, value, value)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Decodes a color from its on-disk representation (B, G, R, A).
	pub const fn from_bgra(bytes: [u8; 4]) -> Self {
		Self::new(bytes[2], bytes[1], bytes[0], bytes[3])
	}

	/// Encodes the color into its on-disk representation (B, G, R, A).
	pub const fn to_bgra(&self) -> [u8; 4] {
		[self.b, self.g, self.r, self.a]
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Number of colors in a single equipment ramp.
pub const RAMP_LEN: usize = 12;

/// Per-channel color ramps used to recolor character art.
///
/// Ramp generation belongs to the host; this type only carries the seven
/// 12-entry tables that get written into the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamps {
	/// Metal parts (weapons, buckles)
	pub metal: [Color; RAMP_LEN],
	/// Minor cloth color
	pub minor: [Color; RAMP_LEN],
	/// Major cloth color
	pub major: [Color; RAMP_LEN],
	/// Skin
	pub skin: [Color; RAMP_LEN],
	/// Leather
	pub leather: [Color; RAMP_LEN],
	/// Armor
	pub armor: [Color; RAMP_LEN],
	/// Hair
	pub hair: [Color; RAMP_LEN],
}

/// 256-color palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; 256],
}

impl Palette {
	/// Total palette size
	pub const PALETTE_SIZE: usize = 256;

	/// Size of the palette block in a container (256 colors × 4 bytes)
	pub const BYTE_SIZE: usize = Self::PALETTE_SIZE * 4;

	/// Creates a new empty palette with all colors set to transparent black.
	pub fn new() -> Self {
		Self {
			colors: [Color::transparent(); 256],
		}
	}

	/// Creates a palette from a full color table.
	pub fn from_colors(colors: [Color; 256]) -> Self {
		Self {
			colors,
		}
	}

	/// Loads a palette from a byte slice (at least 1024 bytes).
	pub fn from_bytes(data: &[u8]) -> Result<Self, BamError> {
		if data.len() < Self::BYTE_SIZE {
			return Err(BamError::InsufficientData {
				expected: Self::BYTE_SIZE,
				actual: data.len(),
			});
		}
		let mut reader = std::io::Cursor::new(data);
		Self::from_reader(&mut reader)
	}

	/// Reads 256 four-byte records in source order.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, BamError> {
		let mut palette = Self::new();
		for color in palette.colors.iter_mut() {
			let mut bgra = [0u8; 4];
			reader.read_exact(&mut bgra)?;
			*color = Color::from_bgra(bgra);
		}
		Ok(palette)
	}

	/// Creates a default grayscale palette.
	pub fn grayscale() -> Self {
		let mut palette = Self::new();
		for (i, color) in palette.colors.iter_mut().enumerate() {
			*color = Color::gray(i as u8);
		}
		palette
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[index as usize]
	}

	/// Sets a color at the specified index.
	#[inline]
	pub fn set(&mut self, index: u8, color: Color) {
		self.colors[index as usize] = color;
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; 256] {
		&self.colors
	}

	/// Returns a mutable reference to the color array.
	#[inline]
	pub fn colors_mut(&mut self) -> &mut [Color; 256] {
		&mut self.colors
	}

	/// Copies a full color table over this palette.
	pub fn copy_from(&mut self, other: &Palette) {
		self.colors = other.colors;
	}

	/// Writes equipment ramps into the fixed layout used by character art.
	///
	/// Indices 0x04-0x57 receive the seven full ramps. The shading bands from
	/// 0x58 up take the 8 middle entries (1..9) of selected ramps, leather
	/// filling every remaining band.
	pub fn apply_ramps(&mut self, ramps: &ColorRamps) {
		let full = [
			(0x04, &ramps.metal),
			(0x10, &ramps.minor),
			(0x1C, &ramps.major),
			(0x28, &ramps.skin),
			(0x34, &ramps.leather),
			(0x40, &ramps.armor),
			(0x4C, &ramps.hair),
		];
		for (start, ramp) in full {
			self.colors[start..start + RAMP_LEN].copy_from_slice(ramp);
		}

		let bands = [
			(0x58, &ramps.minor),
			(0x60, &ramps.major),
			(0x68, &ramps.minor),
			(0x70, &ramps.metal),
			(0x78, &ramps.leather),
			(0x80, &ramps.leather),
			(0x88, &ramps.minor),
			(0x90, &ramps.leather),
			(0x98, &ramps.leather),
			(0xA0, &ramps.leather),
			(0xB0, &ramps.skin),
		];
		for (start, ramp) in bands {
			self.copy_band(start, ramp);
		}
		for start in (0xB8..0xFF).step_by(8) {
			self.copy_band(start, &ramps.leather);
		}
	}

	fn copy_band(&mut self, start: usize, ramp: &[Color; RAMP_LEN]) {
		let end = (start + 8).min(Self::PALETTE_SIZE);
		let len = end - start;
		self.colors[start..end].copy_from_slice(&ramp[1..1 + len]);
	}

	/// Converts the palette to its on-disk representation.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data = Vec::with_capacity(Self::BYTE_SIZE);
		for color in &self.colors {
			data.extend_from_slice(&color.to_bgra());
		}
		data
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let opaque = self.colors.iter().filter(|c| c.a != 0).count();
		write!(f, "Palette: {} colors ({} with non-zero alpha)", Self::PALETTE_SIZE, opaque)
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}

impl std::ops::IndexMut<u8> for Palette {
	fn index_mut(&mut self, index: u8) -> &mut Self::Output {
		&mut self.colors[index as usize]
	}
}
