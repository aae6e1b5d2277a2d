//! Error types for container parsing and frame decoding.

use std::fmt;

use thiserror::Error;

/// Table addressed by an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
	/// Frame entry table
	Frame,
	/// Cycle entry table
	Cycle,
	/// Frame lookup table
	Lookup,
	/// Slot range inside a single cycle
	Slot,
}

impl fmt::Display for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Table::Frame => write!(f, "frame"),
			Table::Cycle => write!(f, "cycle"),
			Table::Lookup => write!(f, "frame lookup"),
			Table::Slot => write!(f, "cycle slot"),
		}
	}
}

/// Errors that can occur when loading or decoding BAM containers
#[derive(Debug, Error)]
pub enum BamError {
	/// Not enough data to parse a fixed-size structure
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// The stream does not start with a known signature
	#[error("Invalid signature: expected {:?}, got {:?}", String::from_utf8_lossy(expected), String::from_utf8_lossy(actual))]
	InvalidSignature {
		/// Signature that was expected at this point
		expected: [u8; 8],
		/// Signature found in the stream
		actual: [u8; 8],
	},

	/// The container is outer-compressed but no decompressor is configured
	#[error("No decompressor available, cannot load compressed container")]
	DecompressorUnavailable,

	/// A cache identity cannot be mapped to a cache file name
	#[error("Invalid cache identity: {0:?}")]
	InvalidCacheIdentity(String),

	/// Index outside of a table
	#[error("{table} index {index} out of range (total: {len})")]
	IndexOutOfRange {
		/// Table that was addressed
		table: Table,
		/// Requested index
		index: usize,
		/// Number of entries in the table
		len: usize,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl BamError {
	/// Shorthand for [`BamError::IndexOutOfRange`].
	pub fn out_of_range(table: Table, index: usize, len: usize) -> Self {
		Self::IndexOutOfRange {
			table,
			index,
			len,
		}
	}
}
