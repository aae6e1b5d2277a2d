//! Deduplicated animation assets.

use std::fmt;
use std::sync::Arc;

use log::warn;

use crate::file::bam::CycleEntry;
use crate::file::{BamError, Table};
use crate::sprite::Sprite;

use super::Animation;

/// Decoded frames of one container, shared by every animation built from it.
///
/// Each distinct source frame is stored once. Cycles address the stored
/// frames through a compacted lookup table.
#[derive(Debug, Clone)]
pub struct AnimationFactory {
	name: String,
	frames: Vec<Arc<Sprite>>,
	cycles: Vec<CycleEntry>,
	lookup: Vec<u16>,
}

impl AnimationFactory {
	/// Creates an asset, checking that every cycle and lookup entry resolves.
	pub fn new(
		name: impl Into<String>,
		frames: Vec<Arc<Sprite>>,
		cycles: Vec<CycleEntry>,
		lookup: Vec<u16>,
	) -> Result<Self, BamError> {
		for cycle in &cycles {
			if cycle.end() > lookup.len() {
				return Err(BamError::out_of_range(Table::Lookup, cycle.end() - 1, lookup.len()));
			}
		}
		if let Some(&index) = lookup.iter().find(|&&index| index as usize >= frames.len()) {
			return Err(BamError::out_of_range(Table::Frame, index as usize, frames.len()));
		}

		Ok(Self {
			name: name.into(),
			frames,
			cycles,
			lookup,
		})
	}

	/// Returns the asset name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the number of stored frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the number of cycles.
	pub fn cycle_count(&self) -> usize {
		self.cycles.len()
	}

	/// Returns the stored frames.
	pub fn frames(&self) -> &[Arc<Sprite>] {
		&self.frames
	}

	/// Returns the cycle table.
	pub fn cycles(&self) -> &[CycleEntry] {
		&self.cycles
	}

	/// Returns the compacted lookup table.
	pub fn lookup_table(&self) -> &[u16] {
		&self.lookup
	}

	/// Returns the number of slots in `cycle`.
	pub fn cycle_size(&self, cycle: usize) -> Option<u16> {
		self.cycles.get(cycle).map(|c| c.frame_count)
	}

	/// Returns stored frame `index`.
	pub fn frame(&self, index: usize) -> Option<&Arc<Sprite>> {
		self.frames.get(index)
	}

	/// Returns the frame shown in `slot` of `cycle`.
	pub fn frame_in_cycle(&self, cycle: usize, slot: usize) -> Option<&Arc<Sprite>> {
		let entry = self.cycles.get(cycle)?;
		if slot >= entry.frame_count as usize {
			return None;
		}
		let index = *self.lookup.get(entry.first_frame as usize + slot)?;
		self.frames.get(index as usize)
	}

	/// Builds a playback instance for `cycle` sharing this asset's frames.
	pub fn animation(&self, cycle: usize) -> Option<Animation> {
		let Some(entry) = self.cycles.get(cycle) else {
			warn!(
				"{}",
				BamError::out_of_range(Table::Cycle, cycle, self.cycles.len())
			);
			return None;
		};

		let frames = self.lookup[entry.range()]
			.iter()
			.filter_map(|&index| self.frames.get(index as usize))
			.map(Arc::clone);
		Some(Animation::from_frames(frames))
	}
}

impl fmt::Display for AnimationFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: {} frames, {} cycles, {} lookup entries",
			self.name,
			self.frames.len(),
			self.cycles.len(),
			self.lookup.len()
		)
	}
}
