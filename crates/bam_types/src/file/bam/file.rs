//! Container decoding.

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::anim::AnimationFactory;
use crate::file::{BamError, Table};
use crate::font::{Glyph, GlyphSet};
use crate::sprite::{Renderer, Sprite};

use super::config::ImportConfig;
use super::constants::LOOKUP_ENTRY_SIZE;
use super::entry::{CycleEntry, FrameEntry};
use super::header::Header;
use super::palette::{ColorRamps, Palette};
use super::{Format, rle};

/// Stream a container is decoded from.
#[derive(Debug)]
pub enum Source<R> {
	/// The caller's stream, holding a plain container
	Original(R),

	/// Decompressed copy in the disk cache
	Cached(BufReader<fs::File>),

	/// Decompressed copy held in memory
	Memory(Cursor<Vec<u8>>),
}

impl<R> Source<R> {
	/// Returns `true` when reading from the disk cache.
	pub fn is_cached(&self) -> bool {
		matches!(self, Self::Cached(_))
	}
}

impl<R: Read> Read for Source<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self {
			Self::Original(reader) => reader.read(buf),
			Self::Cached(reader) => reader.read(buf),
			Self::Memory(reader) => reader.read(buf),
		}
	}
}

impl<R: Seek> Seek for Source<R> {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		match self {
			Self::Original(reader) => reader.seek(pos),
			Self::Cached(reader) => reader.seek(pos),
			Self::Memory(reader) => reader.seek(pos),
		}
	}
}

/// Upper and lower halves of a paper doll image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paperdoll {
	/// Frame 0
	pub upper: Sprite,

	/// Frame 1, its X anchor holds the offset relative to the upper half
	pub lower: Sprite,
}

/// Decoded `.BAM` container.
///
/// Tables and the palette are loaded up front, frame pixels are read from
/// the stream on demand. A plain container may start anywhere in its stream,
/// table and data offsets are relative to the signature.
#[derive(Debug)]
pub struct File<R> {
	reader: Source<R>,
	base: u64,
	header: Header,
	frames: Vec<FrameEntry>,
	cycles: Vec<CycleEntry>,
	palette: Arc<Palette>,
}

impl File<BufReader<fs::File>> {
	/// Opens a container from disk, using its path as cache identity.
	pub fn open(path: impl AsRef<Path>, config: &ImportConfig) -> Result<Self, BamError> {
		let path = path.as_ref();
		let file = fs::File::open(path)?;
		Self::from_reader_with_identity(BufReader::new(file), path, config)
	}
}

impl<R: Read + Seek> File<R> {
	/// Reads a container from the given reader.
	///
	/// Wrapped containers are expanded in memory since the stream has no
	/// identity to cache under.
	pub fn from_reader(reader: R, config: &ImportConfig) -> Result<Self, BamError> {
		Self::load(reader, None, config)
	}

	/// Reads a container, caching a wrapped container under `identity`.
	pub fn from_reader_with_identity(
		reader: R,
		identity: impl AsRef<Path>,
		config: &ImportConfig,
	) -> Result<Self, BamError> {
		Self::load(reader, Some(identity.as_ref()), config)
	}

	fn load(mut reader: R, identity: Option<&Path>, config: &ImportConfig) -> Result<Self, BamError> {
		let start = reader.stream_position()?;
		let mut signature = Vec::with_capacity(8);
		reader.by_ref().take(8).read_to_end(&mut signature)?;

		let format = <[u8; 8]>::try_from(signature.as_slice()).ok().and_then(|s| Format::detect(&s));
		let (mut source, base) = match format {
			Some(Format::Compressed) => (Self::expand(reader, identity, config)?, 0),
			_ => {
				reader.seek(SeekFrom::Start(start))?;
				(Source::Original(reader), start)
			}
		};

		let header = Header::from_reader(&mut source)?;

		source.seek(SeekFrom::Start(base + header.frames_offset() as u64))?;
		let frames = (0..header.frame_count())
			.map(|_| FrameEntry::from_reader(&mut source))
			.collect::<Result<Vec<_>, _>>()?;
		let cycles = (0..header.cycle_count())
			.map(|_| CycleEntry::from_reader(&mut source))
			.collect::<Result<Vec<_>, _>>()?;

		source.seek(SeekFrom::Start(base + header.palette_offset() as u64))?;
		let palette = Palette::from_reader(&mut source)?;

		Ok(Self {
			reader: source,
			base,
			header,
			frames,
			cycles,
			palette: Arc::new(palette),
		})
	}

	fn expand(
		mut reader: R,
		identity: Option<&Path>,
		config: &ImportConfig,
	) -> Result<Source<R>, BamError> {
		// uncompressed length, unused
		reader.seek(SeekFrom::Current(4))?;

		if let (Some(cache), Some(identity)) = (config.cache(), identity) {
			let file = cache.open_or_populate(identity, &mut reader, config.decompressor())?;
			return Ok(Source::Cached(BufReader::new(file)));
		}

		let decompressor = config.decompressor().ok_or(BamError::DecompressorUnavailable)?;
		let mut data = Vec::new();
		let written = decompressor.decompress(&mut reader, &mut data)?;
		debug!("decompressed {} bytes in memory", written);
		Ok(Source::Memory(Cursor::new(data)))
	}

	/// Returns the container header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the stream the container is read from.
	pub fn source(&self) -> &Source<R> {
		&self.reader
	}

	/// Returns the frame table.
	pub fn frames(&self) -> &[FrameEntry] {
		&self.frames
	}

	/// Returns the cycle table.
	pub fn cycles(&self) -> &[CycleEntry] {
		&self.cycles
	}

	/// Returns the number of frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the number of cycles.
	pub fn cycle_count(&self) -> usize {
		self.cycles.len()
	}

	/// Returns the palette shared by all decoded frames.
	pub fn palette(&self) -> &Arc<Palette> {
		&self.palette
	}

	/// Returns the transparent palette index.
	pub fn color_key(&self) -> u8 {
		self.header.color_key()
	}

	/// Returns the number of slots in `cycle`.
	pub fn cycle_size(&self, cycle: usize) -> Option<u16> {
		match self.cycles.get(cycle) {
			Some(entry) => Some(entry.frame_count),
			None => {
				warn!("{}", BamError::out_of_range(Table::Cycle, cycle, self.cycles.len()));
				None
			}
		}
	}

	fn remaining(&mut self) -> Result<u64, BamError> {
		let pos = self.reader.stream_position()?;
		let end = self.reader.seek(SeekFrom::End(0))?;
		self.reader.seek(SeekFrom::Start(pos))?;
		Ok(end.saturating_sub(pos))
	}

	/// Reads the frame lookup table.
	///
	/// The table covers every slot addressed by a cycle. Entries past the end
	/// of the stream read as zero.
	pub fn frame_lookup_table(&mut self) -> Result<Vec<u16>, BamError> {
		let count = self.cycles.iter().map(CycleEntry::end).max().unwrap_or(0);
		let mut table = vec![0u16; count];

		self.reader.seek(SeekFrom::Start(self.base + self.header.lookup_offset() as u64))?;
		let mut raw = Vec::with_capacity(count * LOOKUP_ENTRY_SIZE);
		self.reader.by_ref().take((count * LOOKUP_ENTRY_SIZE) as u64).read_to_end(&mut raw)?;
		if raw.len() < count * LOOKUP_ENTRY_SIZE {
			warn!("frame lookup table truncated: {} of {} entries", raw.len() / 2, count);
		}

		for (entry, bytes) in table.iter_mut().zip(raw.chunks_exact(LOOKUP_ENTRY_SIZE)) {
			*entry = u16::from_le_bytes([bytes[0], bytes[1]]);
		}
		Ok(table)
	}

	/// Reads the palette indices of frame `index`.
	///
	/// Damaged RLE data is recovered and logged, short stored frames are
	/// padded with the color key.
	pub fn frame_pixels(&mut self, index: usize) -> Result<Vec<u8>, BamError> {
		let entry = *self
			.frames
			.get(index)
			.ok_or_else(|| BamError::out_of_range(Table::Frame, index, self.frames.len()))?;
		let key = self.header.color_key();
		let pixel_count = entry.pixel_count();

		self.reader.seek(SeekFrom::Start(self.base + entry.data_offset() as u64))?;

		if entry.is_compressed() {
			let available = self.remaining()?;
			let estimated = rle::estimated_size(entry.width, entry.height) as u64;
			let size = estimated.min(available) as usize;
			let mut input = vec![0u8; size];
			self.reader.read_exact(&mut input)?;

			let decoded = rle::decode(&input, pixel_count, key);
			if decoded.status.is_damaged() {
				warn!("broken frame {}: {:?}", index, decoded.status);
			}
			Ok(decoded.pixels)
		} else {
			let mut pixels = Vec::with_capacity(pixel_count);
			self.reader.by_ref().take(pixel_count as u64).read_to_end(&mut pixels)?;
			if pixels.len() < pixel_count {
				warn!("stored frame {} truncated: {} of {} pixels", index, pixels.len(), pixel_count);
				pixels.resize(pixel_count, key);
			}
			Ok(pixels)
		}
	}

	/// Decodes frame `index` into a sprite anchored at its frame entry.
	pub fn frame(&mut self, renderer: &dyn Renderer, index: usize) -> Result<Sprite, BamError> {
		let pixels = self.frame_pixels(index)?;
		let entry = self.frames[index];
		let mut sprite = renderer.create_sprite8(
			entry.width,
			entry.height,
			pixels,
			Arc::clone(&self.palette),
			self.header.color_key(),
		);
		sprite.set_anchor(entry.x as i32, entry.y as i32);
		Ok(sprite)
	}

	/// Decodes the frame shown in `slot` of `cycle`.
	///
	/// Invalid cycles, slots and frame references are skipped with a warning.
	pub fn frame_from_cycle(
		&mut self,
		renderer: &dyn Renderer,
		cycle: usize,
		slot: usize,
	) -> Result<Option<Sprite>, BamError> {
		let Some(entry) = self.cycles.get(cycle).copied() else {
			warn!("{}", BamError::out_of_range(Table::Cycle, cycle, self.cycles.len()));
			return Ok(None);
		};
		if slot >= entry.frame_count as usize {
			let error = BamError::out_of_range(Table::Slot, slot, entry.frame_count as usize);
			warn!("{} in cycle {}", error, cycle);
			return Ok(None);
		}

		let position = (entry.first_frame as usize + slot) * LOOKUP_ENTRY_SIZE;
		let offset = self.base + self.header.lookup_offset() as u64 + position as u64;
		self.reader.seek(SeekFrom::Start(offset))?;
		let mut bytes = [0u8; LOOKUP_ENTRY_SIZE];
		self.reader.read_exact(&mut bytes)?;

		let index = u16::from_le_bytes(bytes) as usize;
		if index >= self.frames.len() {
			warn!("{}", BamError::out_of_range(Table::Frame, index, self.frames.len()));
			return Ok(None);
		}
		self.frame(renderer, index).map(Some)
	}

	/// Decodes a frame for an asset, degrading failures to an empty sprite.
	fn frame_or_placeholder(&mut self, renderer: &dyn Renderer, index: usize) -> Sprite {
		match self.frame(renderer, index) {
			Ok(sprite) => sprite,
			Err(e) => {
				warn!("frame {} replaced by placeholder: {}", index, e);
				Sprite::empty(Arc::clone(&self.palette), self.header.color_key())
			}
		}
	}

	/// Builds a deduplicated animation asset.
	///
	/// Every distinct frame referenced by the lookup table is decoded once.
	/// Cycles keep their slot counts and are laid out back to back in the
	/// rewritten lookup table, which addresses the asset's own frame list.
	pub fn animation_factory(
		&mut self,
		renderer: &dyn Renderer,
		name: &str,
	) -> Result<AnimationFactory, BamError> {
		let lookup = self.frame_lookup_table()?;
		let cycles = self.cycles.clone();

		let mut seen: HashMap<u16, u16> = HashMap::new();
		let mut frames = Vec::new();
		let mut new_lookup = Vec::with_capacity(lookup.len());
		let mut new_cycles = Vec::with_capacity(cycles.len());

		for cycle in &cycles {
			let first = u16::try_from(new_lookup.len()).map_err(|_| {
				BamError::out_of_range(Table::Lookup, new_lookup.len(), u16::MAX as usize)
			})?;

			for slot in cycle.range() {
				let global = lookup[slot];
				let compact = match seen.get(&global) {
					Some(&compact) => compact,
					None => {
						let compact = u16::try_from(frames.len()).map_err(|_| {
							BamError::out_of_range(Table::Frame, frames.len(), u16::MAX as usize + 1)
						})?;
						frames.push(Arc::new(self.frame_or_placeholder(renderer, global as usize)));
						seen.insert(global, compact);
						compact
					}
				};
				new_lookup.push(compact);
			}
			new_cycles.push(CycleEntry::new(cycle.frame_count, first));
		}

		debug!(
			"{}: decoded {} distinct frames for {} slots in {} cycles",
			name,
			frames.len(),
			new_lookup.len(),
			new_cycles.len()
		);
		AnimationFactory::new(name, frames, new_cycles, new_lookup)
	}

	fn glyph(&mut self, index: usize) -> Glyph {
		match self.frame_pixels(index) {
			Ok(pixels) => {
				let entry = self.frames[index];
				Glyph::new(entry.width, entry.height, entry.x as i32, entry.y as i32, pixels)
			}
			Err(e) => {
				warn!("glyph for frame {} replaced by placeholder: {}", index, e);
				Glyph::empty()
			}
		}
	}

	/// Extracts the frames as a font.
	///
	/// With more than one cycle each cycle's first frame is a glyph, otherwise
	/// every frame is a glyph. Unresolvable glyphs become placeholders. Metrics
	/// come from the frame table, so a glyph whose pixels cannot be read still
	/// counts towards them.
	pub fn font(&mut self) -> Result<GlyphSet, BamError> {
		let sources: Vec<Option<usize>> = if self.cycles.len() > 1 {
			let lookup = self.frame_lookup_table()?;
			self.cycles
				.iter()
				.map(|cycle| {
					let first = cycle.first_frame as usize;
					match lookup.get(first).map(|&index| index as usize) {
						Some(index) if index < self.frames.len() => Some(index),
						Some(index) => {
							warn!("{}", BamError::out_of_range(Table::Frame, index, self.frames.len()));
							None
						}
						None => {
							warn!("{}", BamError::out_of_range(Table::Lookup, first, lookup.len()));
							None
						}
					}
				})
				.collect()
		} else {
			(0..self.frames.len()).map(Some).collect()
		};

		let mut total_width = 0u32;
		let mut max_height = 0u16;
		for &index in sources.iter().flatten() {
			total_width += self.frames[index].width as u32;
			max_height = max_height.max(self.frames[index].height);
		}

		let glyphs = sources
			.into_iter()
			.map(|source| source.map_or_else(Glyph::empty, |index| self.glyph(index)))
			.collect();

		Ok(GlyphSet::with_metrics(
			glyphs,
			total_width,
			max_height,
			Arc::clone(&self.palette),
			self.header.color_key(),
		))
	}

	/// Returns a 16×16 sprite showing every palette entry, index 0 top left.
	pub fn palette_sprite(&self, renderer: &dyn Renderer) -> Sprite {
		renderer.create_sprite8(
			16,
			16,
			(0..=255).collect(),
			Arc::clone(&self.palette),
			self.header.color_key(),
		)
	}

	/// Writes equipment color ramps into the container palette.
	///
	/// Sprites decoded earlier keep the palette they were created with.
	pub fn setup_colors(&mut self, ramps: &ColorRamps) {
		Arc::make_mut(&mut self.palette).apply_ramps(ramps);
	}

	/// Decodes the two halves of a paper doll.
	///
	/// Returns `None` for containers with fewer than two frames.
	pub fn paperdoll(
		&mut self,
		renderer: &dyn Renderer,
		ramps: Option<&ColorRamps>,
	) -> Result<Option<Paperdoll>, BamError> {
		if self.frames.len() < 2 {
			return Ok(None);
		}
		if let Some(ramps) = ramps {
			self.setup_colors(ramps);
		}

		let offset = self.frames[1].x as i32 - self.frames[0].x as i32;

		let mut lower = self.frame(renderer, 1)?;
		lower.set_anchor(offset, 0);
		let mut upper = self.frame(renderer, 0)?;
		upper.set_anchor(0, 0);

		Ok(Some(Paperdoll {
			upper,
			lower,
		}))
	}
}
