//! Frame and cycle table records.

use std::fmt;
use std::io::Read;
use std::ops::Range;

use crate::file::BamError;

use super::constants::{CYCLE_ENTRY_SIZE, FRAME_ENTRY_SIZE, UNCOMPRESSED_FLAG};

/// Frame table record (12 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameEntry {
	/// Frame width in pixels
	pub width: u16,

	/// Frame height in pixels
	pub height: u16,

	/// Anchor X coordinate
	pub x: i16,

	/// Anchor Y coordinate
	pub y: i16,

	/// Data offset, the high bit marks uncompressed pixels
	pub data: u32,
}

impl FrameEntry {
	/// Size of the record in bytes
	pub const SIZE: usize = FRAME_ENTRY_SIZE;

	/// Creates a frame entry.
	pub fn new(width: u16, height: u16, x: i16, y: i16, data_offset: u32, compressed: bool) -> Self {
		let mut data = data_offset & !UNCOMPRESSED_FLAG;
		if !compressed {
			data |= UNCOMPRESSED_FLAG;
		}
		Self {
			width,
			height,
			x,
			y,
			data,
		}
	}

	/// Returns the 31-bit offset of the frame's pixel data.
	#[inline]
	pub fn data_offset(&self) -> u32 {
		self.data & !UNCOMPRESSED_FLAG
	}

	/// Returns `true` when the pixel data is RLE8 compressed.
	#[inline]
	pub fn is_compressed(&self) -> bool {
		self.data & UNCOMPRESSED_FLAG == 0
	}

	/// Returns the total number of pixels in this frame.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Decodes a record from its on-disk representation.
	pub fn from_bytes(bytes: &[u8; FRAME_ENTRY_SIZE]) -> Self {
		Self {
			width: u16::from_le_bytes([bytes[0], bytes[1]]),
			height: u16::from_le_bytes([bytes[2], bytes[3]]),
			x: i16::from_le_bytes([bytes[4], bytes[5]]),
			y: i16::from_le_bytes([bytes[6], bytes[7]]),
			data: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
		}
	}

	/// Reads one record.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, BamError> {
		let mut buffer = [0u8; FRAME_ENTRY_SIZE];
		reader.read_exact(&mut buffer)?;
		Ok(Self::from_bytes(&buffer))
	}

	/// Encodes the record.
	pub fn to_bytes(&self) -> [u8; FRAME_ENTRY_SIZE] {
		let mut bytes = [0u8; FRAME_ENTRY_SIZE];
		bytes[0..2].copy_from_slice(&self.width.to_le_bytes());
		bytes[2..4].copy_from_slice(&self.height.to_le_bytes());
		bytes[4..6].copy_from_slice(&self.x.to_le_bytes());
		bytes[6..8].copy_from_slice(&self.y.to_le_bytes());
		bytes[8..12].copy_from_slice(&self.data.to_le_bytes());
		bytes
	}
}

impl fmt::Display for FrameEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}×{} (anchor: {}, {}) @ 0x{:08X}{}",
			self.width,
			self.height,
			self.x,
			self.y,
			self.data_offset(),
			if self.is_compressed() {
				" rle"
			} else {
				""
			}
		)
	}
}

/// Cycle table record (4 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CycleEntry {
	/// Number of lookup table slots in this cycle
	pub frame_count: u16,

	/// First lookup table slot of this cycle
	pub first_frame: u16,
}

impl CycleEntry {
	/// Size of the record in bytes
	pub const SIZE: usize = CYCLE_ENTRY_SIZE;

	/// Creates a cycle entry.
	pub fn new(frame_count: u16, first_frame: u16) -> Self {
		Self {
			frame_count,
			first_frame,
		}
	}

	/// Returns the lookup table slots covered by this cycle.
	#[inline]
	pub fn range(&self) -> Range<usize> {
		let start = self.first_frame as usize;
		start..start + self.frame_count as usize
	}

	/// Returns the slot one past the end of this cycle.
	#[inline]
	pub fn end(&self) -> usize {
		self.first_frame as usize + self.frame_count as usize
	}

	/// Decodes a record from its on-disk representation.
	pub fn from_bytes(bytes: &[u8; CYCLE_ENTRY_SIZE]) -> Self {
		Self {
			frame_count: u16::from_le_bytes([bytes[0], bytes[1]]),
			first_frame: u16::from_le_bytes([bytes[2], bytes[3]]),
		}
	}

	/// Reads one record.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, BamError> {
		let mut buffer = [0u8; CYCLE_ENTRY_SIZE];
		reader.read_exact(&mut buffer)?;
		Ok(Self::from_bytes(&buffer))
	}

	/// Encodes the record.
	pub fn to_bytes(&self) -> [u8; CYCLE_ENTRY_SIZE] {
		let mut bytes = [0u8; CYCLE_ENTRY_SIZE];
		bytes[0..2].copy_from_slice(&self.frame_count.to_le_bytes());
		bytes[2..4].copy_from_slice(&self.first_frame.to_le_bytes());
		bytes
	}
}

impl fmt::Display for CycleEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} slots from {}", self.frame_count, self.first_frame)
	}
}
