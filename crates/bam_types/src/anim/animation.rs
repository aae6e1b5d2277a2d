//! Animation playback.
//!
//! An [`Animation`] holds a fixed number of frame slots and advances a play
//! position from clock readings:
//!
//! - the first fetch captures a baseline and starts playback
//! - every fetch adds `elapsed * fps / 1000` frames, so slow rendering skips
//!   frames instead of slowing the animation down
//! - the baseline moves forward by exactly the time consumed, keeping the
//!   sub-frame remainder for the next fetch
//! - reaching the end wraps a looping animation and drops the baseline, a
//!   play-once animation freezes on its last frame

use std::sync::Arc;

use log::warn;
use rand::Rng;

use crate::file::bam::Palette;
use crate::file::{BamError, Table};
use crate::sprite::{Region, Renderer, Sprite};

use super::Clock;

/// Ownership of an animation's frame images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameOwnership {
	/// Frames are handles into an asset owned elsewhere
	Shared,

	/// Frames were produced for this instance alone
	Exclusive,
}

/// How [`Animation::set_palette`] applies a color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteMode {
	/// Copy into a private palette used for all frames
	Local,

	/// Write into every frame's own palette
	PerFrame,
}

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
	/// No frame fetched since construction or the last reposition
	Idle,

	/// Advancing with the clock
	Running,

	/// Play-once animation frozen on its last frame
	Completed,
}

/// Frame sequence with playback state.
#[derive(Debug, Clone)]
pub struct Animation {
	frames: Vec<Option<Arc<Sprite>>>,
	ownership: FrameOwnership,
	pos: usize,
	/// Clock reading scaled by the frame rate, `None` until the next fetch
	baseline: Option<u64>,
	fps: u32,
	active: bool,
	play_once: bool,
	reversed: bool,
	game_animation: bool,
	end_reached: bool,
	palette: Option<Arc<Palette>>,
	area: Region,
}

impl Animation {
	/// Frame rate of a new animation
	pub const DEFAULT_FPS: u32 = 15;

	/// Creates an animation with `count` empty frame slots.
	pub fn new(count: usize) -> Self {
		Self {
			frames: vec![None; count],
			ownership: FrameOwnership::Shared,
			pos: 0,
			baseline: None,
			fps: Self::DEFAULT_FPS,
			active: true,
			play_once: false,
			reversed: false,
			game_animation: false,
			end_reached: false,
			palette: None,
			area: Region::default(),
		}
	}

	/// Creates an animation from shared frame handles.
	pub fn from_frames(frames: impl IntoIterator<Item = Arc<Sprite>>) -> Self {
		let frames: Vec<_> = frames.into_iter().collect();
		let mut animation = Self::new(frames.len());
		for (index, frame) in frames.into_iter().enumerate() {
			animation.attach(frame, index);
		}
		animation
	}

	/// Stores `frame` in slot `index` and grows the animation area.
	pub fn add_frame(&mut self, frame: Arc<Sprite>, index: usize) -> Result<(), BamError> {
		if index >= self.frames.len() {
			return Err(BamError::out_of_range(Table::Slot, index, self.frames.len()));
		}
		self.attach(frame, index);
		Ok(())
	}

	fn attach(&mut self, frame: Arc<Sprite>, index: usize) {
		self.area.expand(&frame.footprint());
		self.frames[index] = Some(frame);
	}

	/// Returns the number of frame slots.
	#[inline]
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Returns `true` for an animation without frame slots.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Returns the frame in slot `index`.
	pub fn frame(&self, index: usize) -> Option<&Arc<Sprite>> {
		self.frames.get(index)?.as_ref()
	}

	/// Returns an iterator over the frame slots.
	pub fn frames(&self) -> impl Iterator<Item = Option<&Arc<Sprite>>> {
		self.frames.iter().map(Option::as_ref)
	}

	/// Returns how the frame images are owned.
	pub fn ownership(&self) -> FrameOwnership {
		self.ownership
	}

	/// Returns the rectangle covering every frame relative to the common anchor.
	pub fn area(&self) -> Region {
		self.area
	}

	/// Returns the play position.
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Returns the slot shown at the current position, honouring reversal.
	pub fn current_frame_index(&self) -> usize {
		if self.reversed {
			self.frames.len().saturating_sub(self.pos + 1)
		} else {
			self.pos
		}
	}

	/// Returns the frame shown at the current position.
	pub fn current_frame(&self) -> Option<&Arc<Sprite>> {
		self.frame(self.current_frame_index())
	}

	/// Moves to `index` and restarts timing. Positions past the end keep the
	/// current position.
	pub fn set_position(&mut self, index: usize) {
		if index < self.frames.len() {
			self.pos = index;
		}
		self.baseline = None;
		self.end_reached = false;
	}

	/// Moves to a random position so neighbouring ambient animations drift apart.
	pub fn randomize_position<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		if !self.frames.is_empty() {
			self.pos = rng.random_range(0..self.frames.len());
		}
	}

	/// Returns the frame rate.
	pub fn fps(&self) -> u32 {
		self.fps
	}

	/// Sets the frame rate. A rate of 0 stops advancing.
	pub fn set_fps(&mut self, fps: u32) {
		if fps != self.fps {
			self.fps = fps;
			self.baseline = None;
		}
	}

	/// Returns `true` when fetches are allowed.
	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Enables or disables fetching.
	pub fn set_active(&mut self, active: bool) {
		self.active = active;
	}

	/// Returns `true` for play-once animations.
	pub fn is_play_once(&self) -> bool {
		self.play_once
	}

	/// Makes the animation stop on its last frame instead of looping.
	pub fn set_play_once(&mut self, play_once: bool) {
		self.play_once = play_once;
	}

	/// Returns `true` when frames are read back to front.
	pub fn is_reversed(&self) -> bool {
		self.reversed
	}

	/// Reads frames back to front.
	pub fn set_reversed(&mut self, reversed: bool) {
		self.reversed = reversed;
	}

	/// Returns `true` when timing follows simulation time.
	pub fn is_game_animation(&self) -> bool {
		self.game_animation
	}

	/// Follows simulation time instead of wall-clock time.
	pub fn set_game_animation(&mut self, game_animation: bool) {
		if game_animation != self.game_animation {
			self.game_animation = game_animation;
			self.baseline = None;
		}
	}

	/// Returns `true` once the position has reached the end at least once.
	pub fn end_reached(&self) -> bool {
		self.end_reached
	}

	/// Returns the playback state.
	pub fn state(&self) -> PlaybackState {
		if self.play_once && self.end_reached {
			PlaybackState::Completed
		} else if self.baseline.is_none() && !self.end_reached {
			PlaybackState::Idle
		} else {
			PlaybackState::Running
		}
	}

	fn now(&self, clock: &dyn Clock) -> u64 {
		if self.game_animation {
			clock.game_ticks()
		} else {
			clock.wall_millis()
		}
	}

	/// Returns the frame at the current position, then advances playback.
	///
	/// The advance becomes visible on the following fetch. Returns `None`
	/// for an inactive animation or an unfilled slot. An inactive animation
	/// keeps its timing state untouched.
	pub fn next_frame(&mut self, clock: &dyn Clock) -> Option<&Arc<Sprite>> {
		if !self.active {
			warn!("frame fetched while animation is inactive");
			return None;
		}

		let shown = self.current_frame_index();
		if self.end_reached && self.play_once {
			return self.frame(shown);
		}

		let now = self.now(clock).saturating_mul(self.fps as u64);
		let baseline = *self.baseline.get_or_insert(now);

		let elapsed = now.saturating_sub(baseline);
		if self.fps > 0 && elapsed >= 1000 {
			let advance = elapsed / 1000;
			self.pos = self.pos.saturating_add(advance as usize);
			self.baseline = Some(baseline + advance * 1000);
		}

		let count = self.frames.len();
		if self.pos >= count {
			self.pos = match count {
				0 => 0,
				_ if self.play_once => count - 1,
				_ => self.pos % count,
			};
			self.end_reached = true;
			self.baseline = None;
		}

		self.frame(shown)
	}

	/// Returns the palette frames are drawn with.
	pub fn effective_palette<'a>(&'a self, frame: &'a Sprite) -> &'a Arc<Palette> {
		self.palette.as_ref().unwrap_or_else(|| frame.palette())
	}

	/// Returns the private palette, if any.
	pub fn palette(&self) -> Option<&Arc<Palette>> {
		self.palette.as_ref()
	}

	/// Applies a color table.
	///
	/// [`PaletteMode::Local`] lazily creates a private palette from the first
	/// frame and copies `colors` over it. [`PaletteMode::PerFrame`] writes
	/// `colors` into each frame, copying frames still shared with others.
	pub fn set_palette(&mut self, colors: Option<&Palette>, mode: PaletteMode) {
		match mode {
			PaletteMode::Local => {
				let palette = self.palette.get_or_insert_with(|| {
					let source = self.frames.first().and_then(Option::as_ref);
					source.map(|frame| Arc::clone(frame.palette())).unwrap_or_default()
				});
				if let Some(colors) = colors {
					Arc::make_mut(palette).copy_from(colors);
				}
			}
			PaletteMode::PerFrame => {
				let Some(colors) = colors else {
					return;
				};
				for frame in self.frames.iter_mut().flatten() {
					Arc::make_mut(frame).palette_mut().copy_from(colors);
				}
				self.ownership = FrameOwnership::Exclusive;
			}
		}
	}

	/// Replaces every frame with its horizontal mirror image.
	///
	/// The animation area is reflected about the anchor and the instance
	/// exclusively owns its frames afterwards.
	pub fn mirror(&mut self, renderer: &dyn Renderer) {
		for frame in self.frames.iter_mut().flatten() {
			*frame = Arc::new(renderer.mirror_horizontal(frame));
		}
		self.area = self.area.mirrored_horizontal();
		self.ownership = FrameOwnership::Exclusive;
	}
}
