//! Time sources driving playback.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Millisecond readings of the two clocks an animation can follow.
pub trait Clock {
	/// Monotonic wall-clock time in milliseconds.
	fn wall_millis(&self) -> u64;

	/// Simulation time in milliseconds, frozen while the game is paused.
	fn game_ticks(&self) -> u64;
}

/// Wall clock backed by [`Instant`], with game ticks advanced by the host.
#[derive(Debug)]
pub struct SystemClock {
	origin: Instant,
	game_ticks: AtomicU64,
}

impl SystemClock {
	/// Creates a clock whose wall time starts now.
	pub fn new() -> Self {
		Self {
			origin: Instant::now(),
			game_ticks: AtomicU64::new(0),
		}
	}

	/// Advances simulation time.
	pub fn advance_game(&self, millis: u64) {
		self.game_ticks.fetch_add(millis, Ordering::Relaxed);
	}

	/// Sets simulation time.
	pub fn set_game_ticks(&self, ticks: u64) {
		self.game_ticks.store(ticks, Ordering::Relaxed);
	}
}

impl Default for SystemClock {
	fn default() -> Self {
		Self::new()
	}
}

impl Clock for SystemClock {
	fn wall_millis(&self) -> u64 {
		self.origin.elapsed().as_millis() as u64
	}

	fn game_ticks(&self) -> u64 {
		self.game_ticks.load(Ordering::Relaxed)
	}
}

/// Clock whose readings are set explicitly.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
	wall: Cell<u64>,
	game: Cell<u64>,
}

impl ManualClock {
	/// Creates a clock with both readings at `millis`.
	pub fn new(millis: u64) -> Self {
		Self {
			wall: Cell::new(millis),
			game: Cell::new(millis),
		}
	}

	/// Sets the wall-clock reading.
	pub fn set_wall(&self, millis: u64) {
		self.wall.set(millis);
	}

	/// Advances the wall clock.
	pub fn advance_wall(&self, millis: u64) {
		self.wall.set(self.wall.get() + millis);
	}

	/// Sets the simulation reading.
	pub fn set_game(&self, millis: u64) {
		self.game.set(millis);
	}

	/// Advances simulation time.
	pub fn advance_game(&self, millis: u64) {
		self.game.set(self.game.get() + millis);
	}

	/// Advances both clocks.
	pub fn advance(&self, millis: u64) {
		self.advance_wall(millis);
		self.advance_game(millis);
	}
}

impl Clock for ManualClock {
	fn wall_millis(&self) -> u64 {
		self.wall.get()
	}

	fn game_ticks(&self) -> u64 {
		self.game.get()
	}
}
