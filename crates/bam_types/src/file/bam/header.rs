//! Plain container header.

use std::fmt::Display;
use std::io::Read;

use crate::file::BamError;

use super::constants::{HEADER_SIZE, SIGNATURE};

/// Header of a plain `.BAM` container (24 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	frame_count: u16,
	cycle_count: u8,
	color_key: u8,
	frames_offset: u32,
	palette_offset: u32,
	lookup_offset: u32,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = HEADER_SIZE;

	/// Creates a header from its fields.
	pub fn new(
		frame_count: u16,
		cycle_count: u8,
		color_key: u8,
		frames_offset: u32,
		palette_offset: u32,
		lookup_offset: u32,
	) -> Self {
		Self {
			frame_count,
			cycle_count,
			color_key,
			frames_offset,
			palette_offset,
			lookup_offset,
		}
	}

	/// Returns the number of records in the frame table.
	pub fn frame_count(&self) -> u16 {
		self.frame_count
	}

	/// Returns the number of records in the cycle table.
	pub fn cycle_count(&self) -> u8 {
		self.cycle_count
	}

	/// Returns the palette index used as RLE run marker and transparent color.
	pub fn color_key(&self) -> u8 {
		self.color_key
	}

	/// Returns the offset of the frame table. The cycle table follows it.
	pub fn frames_offset(&self) -> u32 {
		self.frames_offset
	}

	/// Returns the offset of the palette.
	pub fn palette_offset(&self) -> u32 {
		self.palette_offset
	}

	/// Returns the offset of the frame lookup table.
	pub fn lookup_offset(&self) -> u32 {
		self.lookup_offset
	}

	/// Parses a header from the given byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, BamError> {
		if data.len() < HEADER_SIZE {
			return Err(BamError::InsufficientData {
				expected: HEADER_SIZE,
				actual: data.len(),
			});
		}

		let mut signature = [0u8; 8];
		signature.copy_from_slice(&data[0..8]);
		if signature != SIGNATURE {
			return Err(BamError::InvalidSignature {
				expected: SIGNATURE,
				actual: signature,
			});
		}

		Ok(Self {
			frame_count: u16::from_le_bytes([data[8], data[9]]),
			cycle_count: data[10],
			color_key: data[11],
			frames_offset: u32::from_le_bytes([data[12], data[13], data[14], data[15]]),
			palette_offset: u32::from_le_bytes([data[16], data[17], data[18], data[19]]),
			lookup_offset: u32::from_le_bytes([data[20], data[21], data[22], data[23]]),
		})
	}

	/// Reads a header from any reader positioned at the signature.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, BamError> {
		let mut buffer = Vec::with_capacity(HEADER_SIZE);
		reader.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut buffer)?;
		Self::from_bytes(&buffer)
	}

	/// Converts the header to bytes.
	pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
		let mut bytes = [0u8; HEADER_SIZE];

		bytes[0..8].copy_from_slice(&SIGNATURE);
		bytes[8..10].copy_from_slice(&self.frame_count.to_le_bytes());
		bytes[10] = self.cycle_count;
		bytes[11] = self.color_key;
		bytes[12..16].copy_from_slice(&self.frames_offset.to_le_bytes());
		bytes[16..20].copy_from_slice(&self.palette_offset.to_le_bytes());
		bytes[20..24].copy_from_slice(&self.lookup_offset.to_le_bytes());

		bytes
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			".BAM Header:\n\
			- Frames: {} (table at 0x{:08X})\n\
			- Cycles: {}\n\
			- Color Key: {}\n\
			- Palette Offset: 0x{:08X}\n\
			- Lookup Table Offset: 0x{:08X}",
			self.frame_count,
			self.frames_offset,
			self.cycle_count,
			self.color_key,
			self.palette_offset,
			self.lookup_offset
		)
	}
}
